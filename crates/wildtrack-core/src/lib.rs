//! Core sighting types, the proximity classifier, and submission validation.

pub mod sighting;
pub mod submission;
pub mod zones;

pub use sighting::{ClassifiedSighting, SightingRecord};
pub use submission::{
    FILL_ALL_FIELDS, SUBMIT_FAILED, SubmissionInput, SubmissionReply, SubmissionRequest,
    ValidationError,
};
pub use zones::{DANGER_RADIUS_DEG, REFERENCE_ZONES, ReferenceZone, classify, nearest_zone};
