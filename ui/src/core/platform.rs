//! Platform glue: page navigation and backend origin discovery.

use dioxus::document;
use tracing::info;

/// Origin of the processing backend, if the platform supplies one.
#[cfg(target_arch = "wasm32")]
pub fn server_origin() -> Option<String> {
    web_sys::window().and_then(|w| w.location().origin().ok())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn server_origin() -> Option<String> {
    std::env::var(super::config::SERVER_ENV).ok()
}

/// Point the page at `url`; downloads are served as attachments so the page stays put.
pub fn navigate_to(url: &str) {
    info!(%url, "navigating");
    let target = serde_json::Value::from(url).to_string();
    let _ = document::eval(&format!("window.location = {target};"));
}

/// Full reload; drops all client state.
pub fn reload_page() {
    info!("reloading page");
    let _ = document::eval("window.location.reload();");
}
