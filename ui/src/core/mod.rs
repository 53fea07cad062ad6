//! Platform-agnostic client logic: configuration, upload, formatting and view state.

pub mod config;
pub mod format;
pub mod page;
pub mod platform;
pub mod state;
pub mod upload;
