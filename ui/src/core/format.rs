//! Formatting helpers for presenting upload summaries.

pub const MISSING_VALUE: &str = "N/A";

pub fn format_connectivity(value: f64) -> String {
    format!("{value:.6}")
}

pub fn format_optional_connectivity(value: Option<f64>) -> String {
    value
        .map(format_connectivity)
        .unwrap_or_else(|| MISSING_VALUE.to_string())
}

/// Text shown in the summary panel for a failure.
pub fn error_line(message: &str) -> String {
    format!("Error: {message}")
}
