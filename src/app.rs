mod header;
mod homepage;
mod sections;
mod stats;

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{components::*, path};

use crate::{
    content::PORTFOLIO,
    i18n::translate,
    settings::{Locale, Settings, SettingsStore, Theme},
};

use header::Header;
use homepage::HomePage;

const BUILD_DATE: &str = env!("BUILD_DATE");

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html>
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <link rel="shortcut icon" type="image/ico" href="/favicon.ico" />
                <link rel="stylesheet" id="leptos" href="/pkg/portfolio-site.css" />
                <link
                    rel="stylesheet"
                    href="https://cdn.jsdelivr.net/gh/devicons/devicon@latest/devicon.min.css"
                />
                <MetaTags />
            </head>
            <body class="font-sans antialiased">
                <App />
            </body>
        </html>
    }
}

/// Locale and theme for the current visitor, provided at the root of the app.
#[derive(Clone, Copy)]
pub struct SettingsContext {
    settings: RwSignal<Settings>,
    store: StoredValue<Arc<dyn SettingsStore>>,
}

impl SettingsContext {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self {
            settings: RwSignal::new(store.load()),
            store: StoredValue::new(store),
        }
    }

    pub fn locale(&self) -> Locale {
        self.settings.get().locale
    }

    pub fn theme(&self) -> Theme {
        self.settings.get().theme
    }

    pub fn set_locale(&self, locale: Locale) {
        self.update(|s| s.locale = locale);
    }

    pub fn toggle_theme(&self) {
        self.update(|s| s.theme = s.theme.toggled());
    }

    /// Message for `key` in the current locale. Tracks the locale.
    pub fn t(&self, key: &str) -> String {
        translate(self.locale(), key)
    }

    fn update(&self, change: impl FnOnce(&mut Settings)) {
        self.settings.update(change);
        let settings = self.settings.get_untracked();
        self.store.with_value(|store| store.save(&settings));
    }
}

#[cfg(feature = "hydrate")]
fn settings_store() -> Arc<dyn SettingsStore> {
    Arc::new(crate::settings::BrowserSettings)
}

#[cfg(not(feature = "hydrate"))]
fn settings_store() -> Arc<dyn SettingsStore> {
    use crate::settings::{MemorySettings, RequestSettings};

    match use_context::<http::request::Parts>() {
        Some(parts) => Arc::new(RequestSettings::from_headers(&parts.headers)),
        None => Arc::new(MemorySettings::default()),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();
    let settings = SettingsContext::new(settings_store());
    provide_context(settings);

    view! {
        <Html {..} lang=move || settings.locale().code() class=move || settings.theme().as_str() />
        <Title formatter=|title| format!("{} - {title}", PORTFOLIO.profile.name) />

        <Router>
            <Header />
            <main class="flex flex-col flex-grow items-center mx-auto w-full">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=path!("/") view=HomePage />
                </Routes>
            </main>
            <Footer />
        </Router>
    }
}

#[component]
fn Footer() -> impl IntoView {
    let settings = expect_context::<SettingsContext>();
    view! {
        <footer class="py-8 text-center text-sm text-gray-500">
            <p>
                {format!("© {} · ", PORTFOLIO.profile.name)} {move || settings.t("footer.built")}
                {format!(" · {BUILD_DATE}")}
            </p>
        </footer>
    }
}
