//! Shared UI crate for the axial connectivity map. Upload, rendering and views
//! live here; the `web` and `desktop` crates only supply routing and launch.

pub mod core;
pub mod i18n;
pub mod map;
pub mod views;

pub mod components {
    // Localized application navbar (components/app_navbar.rs)
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;

    // Upload form, summary and map (components/map_client.rs)
    pub mod map_client;
    pub use map_client::MapClient;
}

use dioxus::prelude::manganis;

/// Shared theme stylesheet, linked by the web shell.
pub const THEME_CSS: dioxus::prelude::Asset = dioxus::prelude::asset!("/assets/theme/main.css");
