use leptos::{html, prelude::*};
use leptos_use::use_element_visibility;

use crate::content::PORTFOLIO;

use super::SettingsContext;

/// Page section that fades in the first time it scrolls into view.
#[component]
pub fn Reveal(id: &'static str, children: Children) -> impl IntoView {
    let target = NodeRef::<html::Section>::new();
    let visible = use_element_visibility(target);
    let seen = RwSignal::new(false);
    Effect::new(move |_| {
        if visible.get() {
            seen.set(true);
        }
    });

    view! {
        <section
            id=id
            node_ref=target
            class=move || if seen.get() { "reveal is-visible scroll-mt-20" } else { "reveal scroll-mt-20" }
        >
            {children()}
        </section>
    }
}

#[component]
pub fn SectionTitle(message: &'static str) -> impl IntoView {
    let settings = expect_context::<SettingsContext>();
    view! { <h2 class="text-2xl font-bold mb-6">{move || settings.t(message)}</h2> }
}

#[component]
pub fn Hero() -> impl IntoView {
    let settings = expect_context::<SettingsContext>();
    let profile = &PORTFOLIO.profile;
    let mailto = format!("mailto:{}", profile.email);

    view! {
        <div class="flex flex-col gap-4 py-12">
            <p class="text-lg text-cyan-600 dark:text-cyan-400">
                {move || settings.t("hero.greeting")}
            </p>
            <h1 class="text-4xl lg:text-5xl font-bold">{profile.name.clone()}</h1>
            <p class="text-xl font-medium">{profile.role.clone()}</p>
            <p class="max-w-2xl text-base leading-relaxed text-gray-600 dark:text-gray-300">
                {profile.tagline.clone()}
            </p>
            <p class="text-sm text-gray-500">
                {move || settings.t("hero.based_in")} " " {profile.location.clone()}
            </p>
            <div class="flex flex-wrap items-center gap-4 mt-4">
                <a
                    href=mailto
                    class="bg-cyan-500/20 hover:bg-cyan-500/30 text-cyan-700 dark:text-cyan-300 px-6 py-3 rounded-md font-medium transition-all duration-200 border border-cyan-500/30"
                >
                    {move || settings.t("hero.contact")}
                </a>
                {profile
                    .links
                    .iter()
                    .map(|link| {
                        view! {
                            <a
                                href=link.url.clone()
                                target="_blank"
                                rel="noopener noreferrer"
                                class="text-2xl hover:text-cyan-500"
                                aria-label=link.label.clone()
                            >
                                <i class=link.icon.clone()></i>
                            </a>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
pub fn Skills() -> impl IntoView {
    view! {
        <SectionTitle message="skills.title" />
        <div class="grid grid-cols-1 sm:grid-cols-2 gap-6">
            {PORTFOLIO
                .skills
                .iter()
                .map(|group| {
                    view! {
                        <div class="p-4 rounded-lg border border-gray-200 dark:border-gray-700">
                            <h3 class="font-semibold mb-3">{group.category.clone()}</h3>
                            <div class="flex flex-wrap gap-2">
                                {group
                                    .items
                                    .iter()
                                    .map(|item| {
                                        view! {
                                            <span class="rounded-md px-2 py-1 bg-gray-200 dark:bg-gray-800 text-sm">
                                                {item.clone()}
                                            </span>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
pub fn Projects() -> impl IntoView {
    let settings = expect_context::<SettingsContext>();

    view! {
        <SectionTitle message="projects.title" />
        <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
            {PORTFOLIO
                .projects
                .iter()
                .map(|project| {
                    view! {
                        <article class="flex flex-col p-4 rounded-lg border border-gray-200 dark:border-gray-700 hover:shadow-lg transition-shadow duration-200">
                            <h3 class="text-lg font-semibold mb-2">{project.name.clone()}</h3>
                            <p class="text-sm flex-grow mb-4 text-gray-600 dark:text-gray-300">
                                {project.description.clone()}
                            </p>
                            <div class="flex flex-wrap gap-1 mb-4">
                                {project
                                    .tech
                                    .iter()
                                    .map(|t| {
                                        view! {
                                            <span class="bg-green-500/20 text-green-700 dark:text-green-300 px-2 py-1 rounded text-xs">
                                                {t.clone()}
                                            </span>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                            <div class="flex gap-4 text-sm font-medium">
                                {project
                                    .repo_url
                                    .clone()
                                    .map(|url| {
                                        view! {
                                            <a href=url target="_blank" rel="noopener noreferrer" class="text-cyan-600 dark:text-cyan-400">
                                                {move || settings.t("projects.source")}
                                            </a>
                                        }
                                    })}
                                {project
                                    .live_url
                                    .clone()
                                    .map(|url| {
                                        view! {
                                            <a href=url target="_blank" rel="noopener noreferrer" class="text-cyan-600 dark:text-cyan-400">
                                                {move || settings.t("projects.live")}
                                            </a>
                                        }
                                    })}
                            </div>
                        </article>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
pub fn Blog() -> impl IntoView {
    let settings = expect_context::<SettingsContext>();

    view! {
        <SectionTitle message="blog.title" />
        <div class="space-y-4">
            {PORTFOLIO
                .recent_posts()
                .into_iter()
                .map(|post| {
                    view! {
                        <a
                            href=post.url
                            target="_blank"
                            rel="noopener noreferrer"
                            class="block p-4 rounded-md hover:bg-gray-100 dark:hover:bg-gray-800 transition-colors duration-200"
                        >
                            <div class="flex flex-wrap items-baseline gap-3">
                                <span class="text-sm text-gray-500">
                                    {post.date.format("%b %e, %Y").to_string()}
                                </span>
                                <span class="text-lg font-medium text-cyan-700 dark:text-cyan-300">
                                    {post.title}
                                </span>
                            </div>
                            <p class="mt-1 text-sm">{post.summary}</p>
                            <div class="mt-2 flex flex-wrap gap-2 items-center">
                                {post
                                    .tags
                                    .into_iter()
                                    .map(|tag| {
                                        view! {
                                            <span class="rounded-md px-2 py-1 bg-gray-200 dark:bg-gray-800 text-xs">
                                                {tag}
                                            </span>
                                        }
                                    })
                                    .collect_view()}
                                <span class="text-xs text-gray-500 ml-auto">
                                    {move || settings.t("blog.read_more")} " →"
                                </span>
                            </div>
                        </a>
                    }
                })
                .collect_view()}
        </div>
    }
}
