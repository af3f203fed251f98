//! Dashboard state and the commands that drive it.
//!
//! A [`Dashboard`] owns the two map layers, the gallery, the analytics charts
//! and the submission message. Each command fetches fresh records and, only
//! once the fetch succeeds, replaces the affected surfaces wholesale. A failed
//! fetch is logged and leaves every surface as it was.

use thiserror::Error;
use tracing::{error, info};
use wildtrack_core::{SUBMIT_FAILED, SightingRecord, SubmissionInput, ValidationError};
use wildtrack_sync::{SightingSource, SyncError};
use wildtrack_view::{ChartPanel, GalleryView, LayerGroup, aggregate, render_onto};

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("invalid submission: {0}")]
    Validation(#[from] ValidationError),
    #[error("failed to load {surface}: {source}")]
    Fetch {
        surface: &'static str,
        #[source]
        source: SyncError,
    },
    #[error("submission failed: {0}")]
    Submit(#[source] SyncError),
}

/// Outcome shown next to the submission form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

pub struct Dashboard<S> {
    source: S,
    primary: LayerGroup,
    analytics: LayerGroup,
    gallery: GalleryView,
    charts: ChartPanel,
    submit_status: Option<StatusMessage>,
}

impl<S: SightingSource> Dashboard<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            primary: LayerGroup::new(),
            analytics: LayerGroup::new(),
            gallery: GalleryView::default(),
            charts: ChartPanel::default(),
            submit_status: None,
        }
    }

    /// Initial load: every species on both maps.
    pub async fn load(&mut self) -> Result<(), DashboardError> {
        let primary = self.refresh_primary("").await;
        let analytics = self.refresh_analytics("").await;
        primary.and(analytics).map(|_| ())
    }

    /// Search for `query` on the analytics view, then refresh the primary map
    /// and gallery with the same filter.
    ///
    /// Both refreshes run even if the first fails; the first error is returned.
    pub async fn on_search(&mut self, query: &str) -> Result<(), DashboardError> {
        let analytics = self.refresh_analytics(query).await;
        let primary = self.refresh_primary(query).await;
        analytics.and(primary).map(|_| ())
    }

    /// Validate and post a sighting. On success the server's message is shown
    /// and the primary map is reloaded filtered to the submitted species.
    ///
    /// A failed reload after a successful post is logged only; the submission
    /// still counts as delivered.
    pub async fn on_submit(&mut self, input: &SubmissionInput) -> Result<String, DashboardError> {
        let request = match input.validate() {
            Ok(request) => request,
            Err(e) => {
                info!(error = %e, "submission rejected");
                self.submit_status = Some(StatusMessage::error(e.user_message()));
                return Err(e.into());
            }
        };

        let reply = match self.source.submit(&request).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(error = %e, "submitting sighting failed");
                self.submit_status = Some(StatusMessage::error(SUBMIT_FAILED));
                return Err(DashboardError::Submit(e));
            }
        };

        self.submit_status = Some(StatusMessage::success(reply.message.clone()));
        // Already logged inside refresh_primary.
        let _ = self.refresh_primary(&request.name).await;
        Ok(reply.message)
    }

    /// Fetch `species` and redraw the primary map and the gallery.
    pub async fn refresh_primary(&mut self, species: &str) -> Result<usize, DashboardError> {
        let records = self.fetch_for("primary map", species).await?;
        render_onto(&mut self.primary, &records);
        self.gallery = GalleryView::from_records(&records);
        Ok(records.len())
    }

    /// Fetch `species` and redraw the analytics map, charts and note.
    pub async fn refresh_analytics(&mut self, species: &str) -> Result<usize, DashboardError> {
        let records = self.fetch_for("analytics", species).await?;
        render_onto(&mut self.analytics, &records);
        self.charts.plot(&aggregate(&records), records.len());
        Ok(records.len())
    }

    async fn fetch_for(
        &self,
        surface: &'static str,
        species: &str,
    ) -> Result<Vec<SightingRecord>, DashboardError> {
        self.source.fetch(species).await.map_err(|source| {
            error!(surface, species = %species, error = %source, "fetch failed; keeping previous display");
            DashboardError::Fetch { surface, source }
        })
    }

    pub fn primary_map(&self) -> &LayerGroup {
        &self.primary
    }

    pub fn analytics_map(&self) -> &LayerGroup {
        &self.analytics
    }

    pub fn gallery(&self) -> &GalleryView {
        &self.gallery
    }

    pub fn charts(&self) -> &ChartPanel {
        &self.charts
    }

    /// Caption under the charts; empty until analytics first loads.
    pub fn note(&self) -> &str {
        &self.charts.note
    }

    pub fn submit_status(&self) -> Option<&StatusMessage> {
        self.submit_status.as_ref()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
