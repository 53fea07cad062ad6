use dioxus::prelude::*;
use tracing::trace;

use crate::components::MapClient;

#[component]
pub fn Home() -> Element {
    // Subscribe to the global language code (if provided) so we re-render on change.
    let lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let lang_current = lang_code
        .as_ref()
        .map(|s| s())
        .unwrap_or_else(|| "en-US".to_string());
    trace!(lang = %lang_current, "home render");

    rsx! {
        section { class: "page page-home",
            h1 { {crate::t!("page-map-title")} }
            p { class: "page-home__intro", {crate::t!("page-map-intro")} }

            MapClient {}
        }
    }
}
