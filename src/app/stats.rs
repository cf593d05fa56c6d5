use std::future::Future;

use chrono::Utc;
use leptos::{prelude::*, task::spawn_local};
use reqwest::Client;

use crate::{
    content::PORTFOLIO,
    stats::{fetch, load_once, LoadState, MountGuard, StatsOutcome, StatsSummary, WakaTimeStats},
};

use super::{sections::SectionTitle, SettingsContext};

/// Runs `load` once per mount and settles the returned state with its outcome.
///
/// If the component unmounts first, the late outcome is dropped.
fn use_one_shot<T, F, Fut>(load: F) -> ReadSignal<LoadState<T>>
where
    T: Send + Sync + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = StatsOutcome<T>> + 'static,
{
    let (state, set_state) = signal(LoadState::Loading);
    let guard = MountGuard::new();
    on_cleanup({
        let guard = guard.clone();
        move || guard.release()
    });

    // untracked, so the effect never re-runs within a mount
    Effect::new(move |_| {
        let pending = untrack(&load);
        let load = load_once(guard.clone(), pending, move |outcome| {
            set_state.update(|state| {
                state.settle(outcome);
            })
        });
        spawn_local(async move {
            load.await;
        });
    });

    state
}

/// Contribution summary straight from the public calendar API.
pub fn use_github_stats(url: String) -> ReadSignal<LoadState<StatsSummary>> {
    use_one_shot(move || {
        let url = url.clone();
        async move { fetch::github_stats(&Client::new(), &url, Utc::now().date_naive()).await }
    })
}

/// Coding-time stats through the site's own proxy.
pub fn use_wakatime_stats(path: String) -> ReadSignal<LoadState<WakaTimeStats>> {
    use_one_shot(move || {
        let url = same_origin(&path);
        async move { fetch::wakatime_stats(&Client::new(), &url).await }
    })
}

fn same_origin(path: &str) -> String {
    let origin = window().location().origin().unwrap_or_default();
    format!("{origin}{path}")
}

#[component]
pub fn StatsSection() -> impl IntoView {
    let github = use_github_stats(PORTFOLIO.contributions_url());
    let wakatime = use_wakatime_stats(PORTFOLIO.stats.wakatime_path.clone());

    view! {
        <SectionTitle message="stats.title" />
        <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
            <GithubStatsCard state=github />
            <LanguageBars state=wakatime />
        </div>
    }
}

fn skeleton() -> AnyView {
    view! {
        <div class="space-y-3">
            <div class="loading-skeleton h-6 rounded w-1/2"></div>
            <div class="loading-skeleton h-20 rounded"></div>
        </div>
    }
    .into_any()
}

fn stat_tile(
    label: impl Fn() -> String + Send + Sync + 'static,
    value: String,
) -> impl IntoView {
    view! {
        <div class="p-3 rounded-md bg-gray-100 dark:bg-gray-800">
            <div class="text-2xl font-bold text-cyan-700 dark:text-cyan-300">{value}</div>
            <div class="text-xs text-gray-500">{label}</div>
        </div>
    }
}

#[component]
pub fn GithubStatsCard(state: ReadSignal<LoadState<StatsSummary>>) -> impl IntoView {
    let settings = expect_context::<SettingsContext>();

    move || {
        let outcome = match state.get() {
            LoadState::Loading => return skeleton(),
            LoadState::Settled(outcome) => outcome,
        };
        let Some(summary) = outcome.data().copied() else {
            return ().into_any();
        };
        let sample = outcome.is_fallback();

        view! {
            <div class="p-4 rounded-lg border border-gray-200 dark:border-gray-700">
                <h3 class="font-semibold mb-4">{move || settings.t("stats.github_title")}</h3>
                <div class="grid grid-cols-2 sm:grid-cols-4 gap-3">
                    {stat_tile(move || settings.t("stats.total"), summary.total.to_string())}
                    {stat_tile(move || settings.t("stats.this_week"), summary.this_week.to_string())}
                    {stat_tile(move || settings.t("stats.best"), summary.best.to_string())}
                    {stat_tile(move || settings.t("stats.average"), format!("{:.1}", summary.average))}
                </div>
                {sample
                    .then(|| {
                        view! {
                            <p class="mt-3 text-xs text-gray-500 italic">
                                {move || settings.t("stats.sample_data")}
                            </p>
                        }
                    })}
            </div>
        }
        .into_any()
    }
}

#[component]
pub fn LanguageBars(state: ReadSignal<LoadState<WakaTimeStats>>) -> impl IntoView {
    let settings = expect_context::<SettingsContext>();

    move || {
        let stats = match state.get() {
            LoadState::Loading => return skeleton(),
            LoadState::Settled(StatsOutcome::Ok(stats) | StatsOutcome::Fallback(stats)) => stats,
            // loaded but nothing to show
            LoadState::Settled(StatsOutcome::Empty) => return ().into_any(),
        };
        let languages = stats.top_languages();
        if languages.is_empty() {
            return ().into_any();
        }

        view! {
            <div class="p-4 rounded-lg border border-gray-200 dark:border-gray-700">
                <h3 class="font-semibold mb-1">{move || settings.t("stats.languages_title")}</h3>
                {stats
                    .human_readable_total()
                    .map(|total| {
                        let total = total.to_string();
                        view! {
                            <p class="text-xs text-gray-500 mb-4">
                                {move || settings.t("stats.coding_time")} ": " {total}
                            </p>
                        }
                    })}
                <ul class="space-y-3">
                    {languages
                        .into_iter()
                        .map(|language| {
                            let width = format!("width: {:.1}%", language.percent.clamp(0.0, 100.0));
                            view! {
                                <li>
                                    <div class="flex justify-between text-sm mb-1">
                                        <span>{language.name}</span>
                                        <span class="text-gray-500">
                                            {format!("{:.1}%", language.percent)}
                                        </span>
                                    </div>
                                    <div class="h-2 rounded bg-gray-200 dark:bg-gray-800">
                                        <div class="h-2 rounded bg-cyan-500" style=width></div>
                                    </div>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </div>
        }
        .into_any()
    }
}
