//! View state for the upload page, kept separate from the components so it can be tested.

use super::format::{error_line, format_optional_connectivity};
use super::upload::{ProcessedUpload, UploadSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Uploading,
}

impl SubmitState {
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Uploading)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLines {
    pub nodes: String,
    pub connectivity: String,
}

impl From<&UploadSummary> for SummaryLines {
    fn from(summary: &UploadSummary) -> Self {
        Self {
            nodes: summary.count.to_string(),
            connectivity: format!(
                "min {}, max {}",
                format_optional_connectivity(summary.min_connectivity),
                format_optional_connectivity(summary.max_connectivity)
            ),
        }
    }
}

impl SummaryLines {
    /// The two summary lines as shown, prefixed with the localized labels
    /// (`Nodes:` and `Connectivity:` in en-US).
    pub fn labelled(&self, nodes_label: &str, connectivity_label: &str) -> [String; 2] {
        [
            format!("{nodes_label} {}", self.nodes),
            format!("{connectivity_label} {}", self.connectivity),
        ]
    }
}

/// Content of the summary area; each new state overwrites the previous one.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum StatusPanel {
    #[default]
    Empty,
    Summary(SummaryLines),
    Error(String),
}

impl StatusPanel {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    pub fn error_text(&self) -> Option<String> {
        match self {
            Self::Error(message) => Some(error_line(message)),
            _ => None,
        }
    }
}

/// Download targets; present only once an upload has succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadLinks {
    pub shapefile: String,
    pub geojson: String,
}

impl From<&ProcessedUpload> for DownloadLinks {
    fn from(processed: &ProcessedUpload) -> Self {
        Self {
            shapefile: processed.shp_zip_url.clone(),
            geojson: processed.geojson_download_url(),
        }
    }
}

/// Button classes for the download controls.
pub fn download_button_class(links: Option<&DownloadLinks>) -> &'static str {
    if links.is_some() {
        "button button--primary"
    } else {
        "button button--disabled"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::FeatureCollection;

    fn summary(count: u64, min: Option<f64>, max: Option<f64>) -> UploadSummary {
        UploadSummary {
            count,
            min_connectivity: min,
            max_connectivity: max,
        }
    }

    #[test]
    fn summary_lines_format_bounds() {
        let lines = SummaryLines::from(&summary(10, Some(1.234567), Some(1.876543)));
        assert_eq!(
            lines.labelled("Nodes:", "Connectivity:"),
            [
                "Nodes: 10".to_string(),
                "Connectivity: min 1.234567, max 1.876543".to_string()
            ]
        );
    }

    #[test]
    fn summary_lines_show_na_for_null_bounds() {
        let lines = SummaryLines::from(&summary(0, None, None));
        assert_eq!(
            lines.labelled("Nodes:", "Connectivity:")[1],
            "Connectivity: min N/A, max N/A"
        );
    }

    #[test]
    fn error_panel_text() {
        let panel = StatusPanel::error("bad shapefile");
        assert_eq!(panel.error_text().as_deref(), Some("Error: bad shapefile"));
        assert_eq!(StatusPanel::Empty.error_text(), None);
    }

    #[test]
    fn downloads_follow_processed_urls() {
        let processed = ProcessedUpload {
            nodes: FeatureCollection {
                bbox: None,
                features: vec![],
                foreign_members: None,
            },
            axial: None,
            shp_zip_url: "/outputs/road_nodes_connectivity_shp.zip".into(),
            geojson_url: "/outputs/road_nodes_connectivity.geojson".into(),
            summary: summary(0, None, None),
        };
        let links = DownloadLinks::from(&processed);
        assert_eq!(links.shapefile, "/outputs/road_nodes_connectivity_shp.zip");
        assert_eq!(
            links.geojson,
            "/outputs/road_nodes_connectivity.geojson/download"
        );
        assert_eq!(download_button_class(Some(&links)), "button button--primary");
        assert_eq!(download_button_class(None), "button button--disabled");
    }

    #[test]
    fn idle_by_default() {
        assert!(!SubmitState::default().is_busy());
        assert!(SubmitState::Uploading.is_busy());
    }
}
