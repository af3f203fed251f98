//! HTTP client for the sightings backend's fetch, submit, and image endpoints.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};
use wildtrack_core::{SightingRecord, SubmissionReply, SubmissionRequest};

use crate::SightingSource;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Client for a sightings backend rooted at `base_url`.
///
/// No timeout and no retry: a hung request stays pending until the server
/// answers or the connection drops.
pub struct SightingClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct SpeciesImageResponse {
    image: Option<String>,
}

impl SightingClient {
    /// `base_url` should be like `http://localhost:5000` (no trailing slash).
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch sightings, optionally filtered to one species.
    ///
    /// An empty `species` asks the backend for all species.
    pub async fn fetch_sightings(&self, species: &str) -> Result<Vec<SightingRecord>, SyncError> {
        let url = format!("{}/get_sightings", self.base_url);

        info!(url = %url, species = %species, "fetching sightings");
        let resp = self
            .client
            .get(&url)
            .query(&[("species", species)])
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SyncError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        let records: Vec<SightingRecord> = serde_json::from_str(&body)?;
        info!(count = records.len(), "fetched sightings");
        Ok(records)
    }

    /// Post a new sighting and return the server's message.
    ///
    /// The backend reports storage failures as `{message}` with a 5xx status,
    /// so any body that parses as a reply is returned as-is; the status is only
    /// logged. A non-success status with an unreadable body is a
    /// [`SyncError::Server`].
    pub async fn submit_sighting(
        &self,
        request: &SubmissionRequest,
    ) -> Result<SubmissionReply, SyncError> {
        let url = format!("{}/submit_sighting", self.base_url);

        info!(url = %url, name = %request.name, lat = request.lat, lng = request.lng, "submitting sighting");
        let resp = self.client.post(&url).json(request).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        let parsed = serde_json::from_str::<SubmissionReply>(&body);
        match parsed {
            Ok(reply) => {
                if status.is_success() {
                    info!(message = %reply.message, "submission accepted");
                } else {
                    warn!(status = status.as_u16(), message = %reply.message, "submission returned error status");
                }
                Ok(reply)
            }
            Err(_) if !status.is_success() => Err(SyncError::Server {
                status: status.as_u16(),
                body,
            }),
            Err(e) => Err(SyncError::Json(e)),
        }
    }

    /// Look up a representative photo URL for `species`.
    ///
    /// Empty species names return `None` without contacting the server.
    pub async fn species_image(&self, species: &str) -> Result<Option<String>, SyncError> {
        let species = species.trim();
        if species.is_empty() {
            return Ok(None);
        }
        let url = format!("{}/get_species_image", self.base_url);

        info!(url = %url, species = %species, "looking up species image");
        let resp = self
            .client
            .get(&url)
            .query(&[("species", species)])
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SyncError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        let parsed: SpeciesImageResponse = serde_json::from_str(&body)?;
        Ok(parsed.image.filter(|url| !url.is_empty()))
    }
}

#[async_trait]
impl SightingSource for SightingClient {
    async fn fetch(&self, species: &str) -> Result<Vec<SightingRecord>, SyncError> {
        self.fetch_sightings(species).await
    }

    async fn submit(&self, request: &SubmissionRequest) -> Result<SubmissionReply, SyncError> {
        self.submit_sighting(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sighting_array_parses() {
        let json = r#"[
            {"name": "Tiger", "lat": 28.7041, "lng": 77.1025, "observer": "Admin", "date": "2025-01-01", "image": null},
            {"name": "Koala", "lat": -27.47, "lng": 153.02, "observer": "jo", "date": "2025-02-11", "image": "https://static.example/photo.jpg"}
        ]"#;
        let parsed: Vec<SightingRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].image_url(), Some("https://static.example/photo.jpg"));
    }

    #[test]
    fn non_array_body_is_a_parse_error() {
        let err = serde_json::from_str::<Vec<SightingRecord>>(r#"{"results": []}"#).unwrap_err();
        let sync: SyncError = err.into();
        assert!(matches!(sync, SyncError::Json(_)));
    }

    #[test]
    fn species_image_response_null() {
        let parsed: SpeciesImageResponse = serde_json::from_str(r#"{"image": null}"#).unwrap();
        assert!(parsed.image.is_none());
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = SightingClient::new("http://localhost:5000/".into());
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[tokio::test]
    async fn empty_species_image_skips_request() {
        // Nothing listens on this port; a request would fail.
        let client = SightingClient::new("http://127.0.0.1:9".into());
        assert_eq!(client.species_image("  ").await.unwrap(), None);
    }
}
