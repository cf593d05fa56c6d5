use leptos::prelude::*;

use crate::{
    content::PORTFOLIO,
    settings::{Locale, Theme},
};

use super::SettingsContext;

/// Section anchor and message key for each nav entry.
const NAV_ITEMS: [(&str, &str); 5] = [
    ("about", "nav.about"),
    ("skills", "nav.skills"),
    ("projects", "nav.projects"),
    ("blog", "nav.blog"),
    ("stats", "nav.stats"),
];

#[component]
pub fn Header() -> impl IntoView {
    let settings = expect_context::<SettingsContext>();

    view! {
        <header class="sticky top-0 z-10 bg-white/80 dark:bg-gray-900/80 backdrop-blur shadow">
            <nav class="mx-auto max-w-5xl px-4 py-3 flex flex-wrap items-center justify-between gap-4">
                <a href="#about" class="text-lg font-bold text-cyan-600 dark:text-cyan-400">
                    {PORTFOLIO.profile.name.clone()}
                </a>
                <ul class="flex flex-wrap gap-4 text-sm font-medium">
                    {NAV_ITEMS
                        .into_iter()
                        .map(|(id, key)| {
                            view! {
                                <li>
                                    <a
                                        href=format!("#{id}")
                                        class="hover:text-cyan-500 transition-colors duration-200"
                                    >
                                        {move || settings.t(key)}
                                    </a>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
                <div class="flex items-center gap-2">
                    <LocaleSwitcher />
                    <ThemeToggle />
                </div>
            </nav>
        </header>
    }
}

#[component]
fn LocaleSwitcher() -> impl IntoView {
    let settings = expect_context::<SettingsContext>();

    view! {
        <label class="sr-only" for="locale">
            {move || settings.t("locale.label")}
        </label>
        <select
            id="locale"
            class="rounded-md border border-gray-300 dark:border-gray-700 bg-transparent px-2 py-1 text-sm"
            prop:value=move || settings.locale().code()
            on:change=move |ev| {
                match Locale::from_tag(&event_target_value(&ev)) {
                    Some(locale) => settings.set_locale(locale),
                    None => log::warn!("Unsupported locale selected"),
                }
            }
        >
            {Locale::ALL
                .into_iter()
                .map(|locale| {
                    view! { <option value=locale.code()>{locale.label()}</option> }
                })
                .collect_view()}
        </select>
    }
}

#[component]
fn ThemeToggle() -> impl IntoView {
    let settings = expect_context::<SettingsContext>();
    let label = move || {
        if settings.theme() == Theme::Dark {
            settings.t("theme.to_light")
        } else {
            settings.t("theme.to_dark")
        }
    };

    view! {
        <button
            type="button"
            class="rounded-md px-2 py-1 text-lg hover:bg-gray-200 dark:hover:bg-gray-800 transition-colors duration-200"
            title=label
            aria-label=label
            on:click=move |_| settings.toggle_theme()
        >
            {move || if settings.theme() == Theme::Dark { "☀" } else { "☾" }}
        </button>
    }
}
