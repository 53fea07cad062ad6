//! Shapefile upload: posts the selected archive to the processing backend
//! and validates what comes back.

use std::sync::Arc;

use dioxus::html::FileEngine;
use geojson::FeatureCollection;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error, info};
use url::Url;

use super::config::ClientConfig;

pub const NO_FILE_MESSAGE: &str =
    "No ZIP file selected. Please upload a ZIP file containing a shapefile.";
pub const UNKNOWN_BACKEND_ERROR: &str = "Unknown error occurred.";
pub const FAILURE_PREFIX: &str = "Upload/processing failed: ";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No ZIP file selected. Please upload a ZIP file containing a shapefile.")]
    NoFile,
    #[error("could not read `{0}`")]
    FileRead(String),
    #[error("invalid upload endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
    #[error("response is missing `{0}`")]
    Incomplete(&'static str),
    #[error("{0}")]
    Backend(String),
}

impl UploadError {
    /// Message shown to the user (before the `Error: ` prefix of the summary panel).
    pub fn user_message(&self) -> String {
        match self {
            Self::NoFile | Self::Backend(_) => self.to_string(),
            _ => format!("{FAILURE_PREFIX}{self}"),
        }
    }
}

/// The archive picked in the file input.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadArchive {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadArchive {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Read the first selected file; `Ok(None)` when nothing is selected.
    pub async fn from_selection(
        files: Option<Arc<dyn FileEngine>>,
    ) -> Result<Option<Self>, UploadError> {
        let Some(engine) = files else {
            return Ok(None);
        };
        let Some(name) = engine.files().into_iter().next() else {
            return Ok(None);
        };
        let bytes = engine
            .read_file(&name)
            .await
            .ok_or_else(|| UploadError::FileRead(name.clone()))?;
        Ok(Some(Self::new(name, bytes)))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadSummary {
    pub count: u64,
    #[serde(default)]
    pub min_connectivity: Option<f64>,
    #[serde(default)]
    pub max_connectivity: Option<f64>,
}

/// Raw `/upload` response body. Success and failure share one shape.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub geojson: Option<FeatureCollection>,
    #[serde(default)]
    pub axial_geojson: Option<FeatureCollection>,
    #[serde(default)]
    pub shp_zip_url: Option<String>,
    #[serde(default)]
    pub geojson_url: Option<String>,
    #[serde(default)]
    pub summary: Option<UploadSummary>,
}

/// A successful, complete response.
#[derive(Debug, Clone)]
pub struct ProcessedUpload {
    pub nodes: FeatureCollection,
    pub axial: Option<FeatureCollection>,
    pub shp_zip_url: String,
    pub geojson_url: String,
    pub summary: UploadSummary,
}

impl ProcessedUpload {
    pub fn geojson_download_url(&self) -> String {
        format!("{}/download", self.geojson_url)
    }
}

impl UploadResponse {
    pub fn into_result(self) -> Result<ProcessedUpload, UploadError> {
        if !self.success {
            let message = self
                .error
                .filter(|msg| !msg.is_empty())
                .unwrap_or_else(|| UNKNOWN_BACKEND_ERROR.to_string());
            return Err(UploadError::Backend(message));
        }

        Ok(ProcessedUpload {
            nodes: self.geojson.ok_or(UploadError::Incomplete("geojson"))?,
            axial: self.axial_geojson,
            shp_zip_url: self
                .shp_zip_url
                .ok_or(UploadError::Incomplete("shp_zip_url"))?,
            geojson_url: self
                .geojson_url
                .ok_or(UploadError::Incomplete("geojson_url"))?,
            summary: self.summary.ok_or(UploadError::Incomplete("summary"))?,
        })
    }
}

pub struct UploadClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl UploadClient {
    pub fn new(config: &ClientConfig) -> Result<Self, UploadError> {
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint: config.upload_url()?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Post the archive as the `file` field. The body is parsed whatever the
    /// status: the backend reports failures as JSON with a 4xx code.
    pub async fn submit(&self, archive: UploadArchive) -> Result<ProcessedUpload, UploadError> {
        info!(file = %archive.file_name, bytes = archive.bytes.len(), "uploading archive");
        let part = Part::bytes(archive.bytes)
            .file_name(archive.file_name)
            .mime_str("application/zip")?;
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;
        debug!(status = %response.status(), "upload response");

        let body = response.bytes().await?;
        let parsed: UploadResponse = serde_json::from_slice(&body)?;
        parsed.into_result()
    }
}

/// Full submission: validates the selection, then uploads. No request is made without a file.
pub async fn submit_upload(
    client: &UploadClient,
    archive: Option<UploadArchive>,
) -> Result<ProcessedUpload, UploadError> {
    let archive = archive.ok_or(UploadError::NoFile)?;
    let outcome = client.submit(archive).await;
    match &outcome {
        Ok(processed) => info!(
            nodes = processed.summary.count,
            axial = processed.axial.is_some(),
            "upload processed"
        ),
        Err(UploadError::Backend(message)) => info!(%message, "backend rejected upload"),
        Err(err) => error!("upload failed: {err}"),
    }
    outcome
}
