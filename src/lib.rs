#[cfg(feature = "ssr")]
pub mod api;
#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub mod app;
pub mod config;
pub mod content;
pub mod i18n;
pub mod settings;
pub mod stats;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        leptos::logging::warn!("console logger unavailable: {e}");
    }
    mark_scripted();
    leptos::mount::hydrate_body(App);
}

/// Lets the stylesheet hide not-yet-revealed sections. Without script they
/// stay visible.
#[cfg(feature = "hydrate")]
fn mark_scripted() {
    let Some(root) = leptos::prelude::document().document_element() else {
        return;
    };
    if let Err(e) = root.set_attribute("data-js", "") {
        log::warn!("Couldn't mark document as scripted: {e:?}");
    }
}
