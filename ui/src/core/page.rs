//! Controller for the upload and map page.
//!
//! The component feeds user events and upload results in; everything the page
//! shows is read back out. Network and file access stay in the component so
//! this type can be driven synchronously in tests.

use tracing::debug;

use crate::map::session::{MapSession, RenderReport};
use crate::map::surface::MapSurface;

use super::state::{DownloadLinks, StatusPanel, SubmitState, SummaryLines};
use super::upload::{ProcessedUpload, UploadError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadKind {
    Shapefile,
    Geojson,
}

pub struct MapPage<S> {
    session: MapSession<S>,
    submit: SubmitState,
    status: StatusPanel,
    downloads: Option<DownloadLinks>,
    reset_hint: bool,
}

impl<S: MapSurface> MapPage<S> {
    pub fn new(session: MapSession<S>) -> Self {
        Self {
            session,
            submit: SubmitState::Idle,
            status: StatusPanel::Empty,
            downloads: None,
            reset_hint: true,
        }
    }

    pub fn session(&self) -> &MapSession<S> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut MapSession<S> {
        &mut self.session
    }

    pub fn submit_state(&self) -> SubmitState {
        self.submit
    }

    pub fn status(&self) -> &StatusPanel {
        &self.status
    }

    pub fn downloads(&self) -> Option<&DownloadLinks> {
        self.downloads.as_ref()
    }

    pub fn reset_hint_visible(&self) -> bool {
        self.reset_hint
    }

    /// Claim the single upload slot. Returns `false` while an upload is running;
    /// the caller must not start another one.
    pub fn begin_submit(&mut self) -> bool {
        if self.submit.is_busy() {
            debug!("upload already in flight; ignoring submit");
            return false;
        }
        self.submit = SubmitState::Uploading;
        self.status = StatusPanel::Empty;
        self.reset_hint = false;
        true
    }

    /// Apply the outcome of the running upload. Results arriving with no upload
    /// in flight (after a reset) are dropped.
    pub fn finish_submit(
        &mut self,
        outcome: Result<ProcessedUpload, UploadError>,
    ) -> Option<RenderReport> {
        if !self.submit.is_busy() {
            debug!("dropping upload result; no submission in flight");
            return None;
        }
        self.submit = SubmitState::Idle;

        match outcome {
            Ok(processed) => {
                let report = self
                    .session
                    .render(&processed.nodes, processed.axial.as_ref());
                self.downloads = Some(DownloadLinks::from(&processed));
                self.status = StatusPanel::Summary(SummaryLines::from(&processed.summary));
                Some(report)
            }
            Err(err) => {
                self.status = StatusPanel::error(err.user_message());
                None
            }
        }
    }

    pub fn download_target(&self, kind: DownloadKind) -> Option<&str> {
        let links = self.downloads.as_ref()?;
        Some(match kind {
            DownloadKind::Shapefile => links.shapefile.as_str(),
            DownloadKind::Geojson => links.geojson.as_str(),
        })
    }

    /// Detach the map and return to the initial state. Any upload still
    /// running is abandoned.
    pub fn reset(&mut self) {
        self.session.reset();
        self.submit = SubmitState::Idle;
        self.status = StatusPanel::Empty;
        self.downloads = None;
        self.reset_hint = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::download_button_class;
    use crate::core::upload::{UploadSummary, NO_FILE_MESSAGE};
    use crate::map::testing::{axial, nodes, RecordingSurface};

    fn page() -> MapPage<RecordingSurface> {
        MapPage::new(MapSession::new(RecordingSurface::default(), 16))
    }

    fn processed() -> ProcessedUpload {
        ProcessedUpload {
            nodes: nodes(),
            axial: Some(axial()),
            shp_zip_url: "/outputs/road_nodes_connectivity_shp.zip".into(),
            geojson_url: "/outputs/road_nodes_connectivity.geojson".into(),
            summary: UploadSummary {
                count: 3,
                min_connectivity: Some(1.1),
                max_connectivity: Some(1.5),
            },
        }
    }

    #[test]
    fn starts_with_downloads_disabled_and_hint_shown() {
        let page = page();
        assert!(page.downloads().is_none());
        assert_eq!(download_button_class(page.downloads()), "button button--disabled");
        assert!(page.reset_hint_visible());
        assert_eq!(page.status(), &StatusPanel::Empty);
    }

    #[test]
    fn second_submit_is_refused_while_uploading() {
        let mut page = page();
        assert!(page.begin_submit());
        assert!(page.submit_state().is_busy());
        assert!(!page.begin_submit());
    }

    #[test]
    fn submit_clears_summary_and_hides_hint() {
        let mut page = page();
        page.begin_submit();
        page.finish_submit(Err(UploadError::Backend("bad shapefile".into())));

        assert!(page.begin_submit());
        assert_eq!(page.status(), &StatusPanel::Empty);
        assert!(!page.reset_hint_visible());
    }

    #[test]
    fn success_renders_and_enables_downloads() {
        let mut page = page();
        page.begin_submit();
        let report = page.finish_submit(Ok(processed())).unwrap();

        assert_eq!(report.markers, 3);
        assert!(!page.submit_state().is_busy());
        assert!(page.session().points_layer().is_some());
        assert!(page.session().axial_layer().is_some());
        assert_eq!(download_button_class(page.downloads()), "button button--primary");
        assert_eq!(
            page.download_target(DownloadKind::Geojson),
            Some("/outputs/road_nodes_connectivity.geojson/download")
        );
        assert_eq!(
            page.download_target(DownloadKind::Shapefile),
            Some("/outputs/road_nodes_connectivity_shp.zip")
        );
        match page.status() {
            StatusPanel::Summary(lines) => assert_eq!(lines.nodes, "3"),
            other => panic!("expected summary, got {other:?}"),
        }
    }

    #[test]
    fn backend_failure_leaves_map_and_downloads_untouched() {
        let mut page = page();
        page.begin_submit();
        let report =
            page.finish_submit(Err(UploadError::Backend("bad shapefile".into())));

        assert!(report.is_none());
        assert!(!page.submit_state().is_busy());
        assert!(page.downloads().is_none());
        assert_eq!(page.download_target(DownloadKind::Shapefile), None);
        assert!(page.session().surface().ops.is_empty());
        assert_eq!(
            page.status().error_text().as_deref(),
            Some("Error: bad shapefile")
        );
    }

    #[test]
    fn missing_file_is_reported_without_rendering() {
        let mut page = page();
        page.begin_submit();
        page.finish_submit(Err(UploadError::NoFile));

        assert_eq!(
            page.status().error_text(),
            Some(format!("Error: {NO_FILE_MESSAGE}"))
        );
        assert!(!page.submit_state().is_busy());
    }

    #[test]
    fn reset_detaches_map_and_drops_late_results() {
        let mut page = page();
        page.begin_submit();
        page.finish_submit(Ok(processed()));

        page.begin_submit();
        page.reset();
        let surface = page.session().surface();
        assert!(surface.layers.is_empty());
        assert!(surface.controls.is_empty());
        assert!(page.downloads().is_none());
        assert!(!page.submit_state().is_busy());

        assert!(page.finish_submit(Ok(processed())).is_none());
        assert!(page.session().points_layer().is_none());
        assert_eq!(page.status(), &StatusPanel::Empty);
    }
}
