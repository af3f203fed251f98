//! User sighting submissions: raw form input, validation, and the wire body
//! posted to `/submit_sighting`.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Message shown when a submission fails client-side validation.
pub const FILL_ALL_FIELDS: &str = "Please fill all fields.";

/// Message shown when the submission request itself fails.
pub const SUBMIT_FAILED: &str = "Error submitting sighting.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("species is empty")]
    MissingSpecies,
    #[error("latitude {0:?} is missing or not a number")]
    BadLatitude(String),
    #[error("longitude {0:?} is missing or not a number")]
    BadLongitude(String),
}

impl ValidationError {
    /// The fixed user-facing text for every validation failure.
    pub fn user_message(&self) -> &'static str {
        FILL_ALL_FIELDS
    }
}

/// Raw text fields as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct SubmissionInput {
    pub species: String,
    pub lat: String,
    pub lng: String,
}

impl SubmissionInput {
    pub fn new(
        species: impl Into<String>,
        lat: impl Into<String>,
        lng: impl Into<String>,
    ) -> Self {
        Self {
            species: species.into(),
            lat: lat.into(),
            lng: lng.into(),
        }
    }

    /// Check the fields and build the request body.
    ///
    /// Coordinates are read from their leading numeric prefix, so `"22.5N"`
    /// parses as 22.5. A coordinate of exactly zero is rejected as missing,
    /// which excludes points on the equator and the prime meridian.
    pub fn validate(&self) -> Result<SubmissionRequest, ValidationError> {
        if self.species.is_empty() {
            debug!("submission rejected: empty species");
            return Err(ValidationError::MissingSpecies);
        }
        let lat = parse_coordinate(&self.lat)
            .ok_or_else(|| ValidationError::BadLatitude(self.lat.clone()))?;
        let lng = parse_coordinate(&self.lng)
            .ok_or_else(|| ValidationError::BadLongitude(self.lng.clone()))?;
        Ok(SubmissionRequest {
            name: self.species.clone(),
            lat,
            lng,
        })
    }
}

/// JSON body for `POST /submit_sighting`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

/// JSON body returned by `POST /submit_sighting`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReply {
    pub message: String,
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    let value = parse_leading_float(raw)?;
    // Zero counts as "not filled in". Infinite values have no JSON encoding.
    if value == 0.0 || !value.is_finite() {
        return None;
    }
    Some(value)
}

/// Parse the longest decimal prefix of `raw` after leading whitespace.
///
/// Accepts an optional sign, digits with an optional fraction, and an
/// exponent only when at least one exponent digit follows.
fn parse_leading_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_submission() {
        let req = SubmissionInput::new("Tiger", "22.5", "88.3").validate().unwrap();
        assert_eq!(
            req,
            SubmissionRequest {
                name: "Tiger".into(),
                lat: 22.5,
                lng: 88.3
            }
        );
    }

    #[test]
    fn request_json_shape() {
        let req = SubmissionRequest {
            name: "Tiger".into(),
            lat: 22.5,
            lng: 88.3,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"name": "Tiger", "lat": 22.5, "lng": 88.3})
        );
    }

    #[test]
    fn empty_species_rejected() {
        let err = SubmissionInput::new("", "22.5", "88.3").validate().unwrap_err();
        assert_eq!(err, ValidationError::MissingSpecies);
        assert_eq!(err.user_message(), "Please fill all fields.");
    }

    #[test]
    fn whitespace_species_is_not_empty() {
        assert!(SubmissionInput::new(" ", "22.5", "88.3").validate().is_ok());
    }

    #[test]
    fn unparsable_coordinates_rejected() {
        assert_eq!(
            SubmissionInput::new("Tiger", "north", "88.3").validate(),
            Err(ValidationError::BadLatitude("north".into()))
        );
        assert_eq!(
            SubmissionInput::new("Tiger", "22.5", "").validate(),
            Err(ValidationError::BadLongitude(String::new()))
        );
    }

    #[test]
    fn zero_coordinates_rejected() {
        assert!(SubmissionInput::new("Tiger", "0", "88.3").validate().is_err());
        assert!(SubmissionInput::new("Tiger", "22.5", "0.0").validate().is_err());
        assert!(SubmissionInput::new("Tiger", "-0", "88.3").validate().is_err());
    }

    #[test]
    fn infinite_coordinates_rejected() {
        assert!(SubmissionInput::new("Tiger", "Infinity", "88.3").validate().is_err());
        assert!(SubmissionInput::new("Tiger", "22.5", "-Infinity").validate().is_err());
        assert_eq!(
            SubmissionInput::new("Tiger", "1e999", "88.3").validate(),
            Err(ValidationError::BadLatitude("1e999".into()))
        );
    }

    #[test]
    fn lenient_prefix_parsing() {
        assert_eq!(parse_leading_float("22.5abc"), Some(22.5));
        assert_eq!(parse_leading_float("  -13.25 "), Some(-13.25));
        assert_eq!(parse_leading_float(".5"), Some(0.5));
        assert_eq!(parse_leading_float("7."), Some(7.0));
        assert_eq!(parse_leading_float("1e2"), Some(100.0));
        assert_eq!(parse_leading_float("1e"), Some(1.0));
        assert_eq!(parse_leading_float("1e+"), Some(1.0));
        assert_eq!(parse_leading_float("+3"), Some(3.0));
        assert_eq!(parse_leading_float("-"), None);
        assert_eq!(parse_leading_float("."), None);
        assert_eq!(parse_leading_float("abc"), None);
    }

    #[test]
    fn reply_parses() {
        let reply: SubmissionReply =
            serde_json::from_str(r#"{"message": "Sighting submitted successfully!"}"#).unwrap();
        assert_eq!(reply.message, "Sighting submitted successfully!");
    }
}
