use leptos::prelude::*;
use leptos_meta::Title;

use super::{
    sections::{Blog, Hero, Projects, Reveal, Skills},
    stats::StatsSection,
    SettingsContext,
};

#[component]
pub fn HomePage() -> impl IntoView {
    let settings = expect_context::<SettingsContext>();

    view! {
        <Title text=move || settings.t("page.title") />
        <div class="max-w-5xl w-full mx-auto px-4 space-y-24 pb-16">
            <Reveal id="about">
                <Hero />
            </Reveal>
            <Reveal id="skills">
                <Skills />
            </Reveal>
            <Reveal id="projects">
                <Projects />
            </Reveal>
            <Reveal id="blog">
                <Blog />
            </Reveal>
            <Reveal id="stats">
                <StatsSection />
            </Reveal>
        </div>
    }
}
