//! Per-visitor display settings: locale and theme.
//!
//! Settings are loaded through a [`SettingsStore`] picked at the composition
//! root. The server reads them from the request, the browser from its cookies.

use std::sync::Mutex;

use http::{header, HeaderMap};
use serde::{Deserialize, Serialize};

pub const LOCALE_COOKIE: &str = "locale";
pub const THEME_COOKIE: &str = "theme";
const COOKIE_MAX_AGE: u32 = 60 * 60 * 24 * 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Es];

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Es => "Español",
        }
    }

    /// Matches on the primary subtag, so `es-MX` is Spanish.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag.trim().split(['-', '_']).next()?;
        Self::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(primary))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings {
    pub locale: Locale,
    pub theme: Theme,
}

impl Settings {
    /// Builds settings from a `Cookie` header value and the visitor's
    /// language preferences.
    pub fn resolve(cookies: Option<&str>, accept_language: Option<&str>) -> Self {
        let cookie_locale = cookies.and_then(|c| cookie_value(c, LOCALE_COOKIE));
        let theme = cookies
            .and_then(|c| cookie_value(c, THEME_COOKIE))
            .and_then(Theme::from_name)
            .unwrap_or_default();
        Self {
            locale: resolve_locale(cookie_locale, accept_language),
            theme,
        }
    }

    /// `Set-Cookie`/`document.cookie` strings persisting these settings.
    pub fn cookies(&self) -> [String; 2] {
        [
            format_cookie(LOCALE_COOKIE, self.locale.code()),
            format_cookie(THEME_COOKIE, self.theme.as_str()),
        ]
    }
}

fn format_cookie(name: &str, value: &str) -> String {
    format!("{name}={value}; Path=/; Max-Age={COOKIE_MAX_AGE}; SameSite=Lax")
}

/// Cookie first, then the best supported `Accept-Language` entry, then English.
pub fn resolve_locale(cookie: Option<&str>, accept_language: Option<&str>) -> Locale {
    cookie
        .and_then(Locale::from_tag)
        .or_else(|| accept_language.and_then(preferred_locale))
        .unwrap_or_default()
}

/// Joins a browser's ordered language list the way it would send it as
/// `Accept-Language`, so both sides resolve the same locale.
pub fn accept_language<I, S>(languages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    languages
        .into_iter()
        .enumerate()
        .map(|(i, tag)| match i {
            0 => tag.as_ref().to_string(),
            // 1.0, 0.9, 0.8 ... floored at 0.1
            _ => format!("{};q={:.1}", tag.as_ref(), (10 - i.min(9)) as f32 / 10.0),
        })
        .collect::<Vec<_>>()
        .join(",")
}

pub fn cookie_value<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
}

/// Highest-weighted supported language; `q=0` means "not acceptable".
fn preferred_locale(header: &str) -> Option<Locale> {
    let mut ranges = header
        .split(',')
        .filter_map(|range| {
            let mut parts = range.split(';');
            let tag = parts.next()?.trim();
            let q = parts
                .find_map(|p| p.trim().strip_prefix("q="))
                .map_or(Some(1.0), |q| q.trim().parse::<f32>().ok())?;
            (!tag.is_empty() && q > 0.0).then_some((tag, q))
        })
        .collect::<Vec<_>>();
    // stable, so equal weights keep header order
    ranges.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranges.into_iter().find_map(|(tag, _)| Locale::from_tag(tag))
}

pub trait SettingsStore: Send + Sync {
    fn load(&self) -> Settings;
    fn save(&self, settings: &Settings);
}

/// Read-only settings taken from an incoming request.
#[derive(Debug, Clone, Default)]
pub struct RequestSettings(Settings);

impl RequestSettings {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let cookies = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect::<Vec<_>>()
            .join("; ");
        let accept_language = headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok());
        Self(Settings::resolve(Some(&cookies), accept_language))
    }
}

impl SettingsStore for RequestSettings {
    fn load(&self) -> Settings {
        self.0
    }

    // the browser persists changes; nothing to write on the server
    fn save(&self, _settings: &Settings) {}
}

#[derive(Debug, Default)]
pub struct MemorySettings(Mutex<Settings>);

impl MemorySettings {
    pub fn new(settings: Settings) -> Self {
        Self(Mutex::new(settings))
    }
}

impl SettingsStore for MemorySettings {
    fn load(&self) -> Settings {
        *self.0.lock().expect("should be able to lock settings")
    }

    fn save(&self, settings: &Settings) {
        *self.0.lock().expect("should be able to lock settings") = *settings;
    }
}

#[cfg(feature = "hydrate")]
pub use browser::BrowserSettings;

#[cfg(feature = "hydrate")]
mod browser {
    use leptos::prelude::{document, window};
    use wasm_bindgen::JsCast;
    use web_sys::HtmlDocument;

    use super::{accept_language, Settings, SettingsStore};

    /// Settings kept in `document.cookie`, so the server sees them on the next request.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct BrowserSettings;

    fn html_document() -> Option<HtmlDocument> {
        document().dyn_into::<HtmlDocument>().ok()
    }

    impl SettingsStore for BrowserSettings {
        fn load(&self) -> Settings {
            let cookies = html_document().and_then(|d| d.cookie().ok());
            let languages = window()
                .navigator()
                .languages()
                .iter()
                .filter_map(|tag| tag.as_string())
                .collect::<Vec<_>>();
            let languages = (!languages.is_empty()).then(|| accept_language(&languages));
            Settings::resolve(cookies.as_deref(), languages.as_deref())
        }

        fn save(&self, settings: &Settings) {
            let Some(doc) = html_document() else {
                log::warn!("No HTML document; settings not saved");
                return;
            };
            for cookie in settings.cookies() {
                if let Err(e) = doc.set_cookie(&cookie) {
                    log::warn!("Couldn't write cookie: {e:?}");
                }
            }
        }
    }
}
