//! Sync layer: the `SightingSource` seam and its HTTP implementation.

use async_trait::async_trait;
use wildtrack_core::{SightingRecord, SubmissionReply, SubmissionRequest};

pub mod http;

pub use http::{SightingClient, SyncError};

/// Where sighting records come from and where submissions go.
///
/// Every call goes to the source; nothing is cached between calls.
#[async_trait]
pub trait SightingSource: Send + Sync {
    /// Records for `species`, or for all species when it is empty.
    async fn fetch(&self, species: &str) -> Result<Vec<SightingRecord>, SyncError>;

    async fn submit(&self, request: &SubmissionRequest) -> Result<SubmissionReply, SyncError>;
}
