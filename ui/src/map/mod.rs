//! Map rendering: feature styling, bounds, the session that owns overlays and
//! the Leaflet surface that draws them.

pub mod bounds;
pub mod leaflet;
pub mod session;
pub mod style;
pub mod surface;

#[cfg(test)]
pub(crate) mod testing;

pub use session::MapSession;
pub use surface::{MapError, MapSurface};
