//! Sighting records as served by the backend's `/get_sightings` endpoint.

use serde::{Deserialize, Deserializer, Serialize};

use crate::zones;

/// A single reported wildlife observation.
///
/// Read-only to the client: records are fetched fresh on every query and
/// never merged with earlier results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SightingRecord {
    /// Species identifier, e.g. "Tiger". Expected non-empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// NaN when the backend sent `null` or omitted the field.
    #[serde(default = "nan", deserialize_with = "null_as_nan")]
    pub lat: f64,
    #[serde(default = "nan", deserialize_with = "null_as_nan")]
    pub lng: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub observer: String,
    /// Display string, not validated as a date.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date: String,
    /// Photo URL. `None` means no photo.
    #[serde(default)]
    pub image: Option<String>,
}

impl SightingRecord {
    /// The photo URL, treating an empty string the same as a missing one.
    pub fn image_url(&self) -> Option<&str> {
        self.image.as_deref().filter(|url| !url.is_empty())
    }

    /// Both coordinates are finite, so the record can be placed on a map.
    pub fn has_position(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Attach the proximity label to this record.
    pub fn classify(self) -> ClassifiedSighting {
        let is_dangerous = zones::classify(self.lat, self.lng);
        ClassifiedSighting {
            record: self,
            is_dangerous,
        }
    }
}

/// A sighting plus its derived proximity label.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedSighting {
    pub record: SightingRecord,
    /// Within 0.5° of a reference zone.
    pub is_dangerous: bool,
}

// User submissions are stored server-side with whatever fields the client sent,
// so any of them can come back as JSON null.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_nan<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

fn nan() -> f64 {
    f64::NAN
}
