//! Map markers: one circle per sighting, coloured by proximity label.
//!
//! Rendering is full-replace. [`render_onto`] clears the target surface before
//! adding the new set, and never diffs against what was there.

use serde::Serialize;
use tracing::debug;
use wildtrack_core::{ClassifiedSighting, SightingRecord};

/// Initial map view over India.
pub const DEFAULT_CENTER: (f64, f64) = (20.5937, 78.9629);
pub const DEFAULT_ZOOM: u8 = 5;

pub const MARKER_RADIUS: f64 = 6.0;
pub const MARKER_FILL_OPACITY: f64 = 0.8;
/// Width in pixels of the photo inside a popup.
pub const POPUP_IMAGE_WIDTH: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Danger,
    Safe,
}

impl MarkerColor {
    pub fn from_danger(is_dangerous: bool) -> Self {
        if is_dangerous { Self::Danger } else { Self::Safe }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Danger => "danger",
            Self::Safe => "safe",
        }
    }

    /// Stroke/fill colour handed to the map library.
    pub fn css(&self) -> &'static str {
        match self {
            Self::Danger => "red",
            Self::Safe => "green",
        }
    }

    /// Indicator line shown at the bottom of the popup.
    pub fn indicator(&self) -> &'static str {
        match self {
            Self::Danger => "⚠️ DANGER",
            Self::Safe => "✅ Safe",
        }
    }
}

/// Popup content bound to a marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    pub name: String,
    pub observer: String,
    pub date: String,
    pub image: Option<String>,
    pub indicator: &'static str,
}

impl Popup {
    /// Popup markup, with record text escaped.
    pub fn to_html(&self) -> String {
        let image = match &self.image {
            Some(url) => format!(
                "<img src=\"{}\" width=\"{POPUP_IMAGE_WIDTH}\">",
                escape_html(url)
            ),
            None => String::new(),
        };
        format!(
            "<b>{}</b><br>Observer: {}<br>Date: {}<br>{}<br>{}",
            escape_html(&self.name),
            escape_html(&self.observer),
            escape_html(&self.date),
            image,
            self.indicator,
        )
    }
}

/// Everything the map library needs to draw one sighting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerDescriptor {
    pub lat: f64,
    pub lng: f64,
    pub color: MarkerColor,
    pub radius: f64,
    pub fill_opacity: f64,
    pub popup: Popup,
}

impl MarkerDescriptor {
    pub fn from_classified(sighting: &ClassifiedSighting) -> Self {
        let rec = &sighting.record;
        let color = MarkerColor::from_danger(sighting.is_dangerous);
        Self {
            lat: rec.lat,
            lng: rec.lng,
            color,
            radius: MARKER_RADIUS,
            fill_opacity: MARKER_FILL_OPACITY,
            popup: Popup {
                name: rec.name.clone(),
                observer: rec.observer.clone(),
                date: rec.date.clone(),
                image: rec.image_url().map(str::to_string),
                indicator: color.indicator(),
            },
        }
    }
}

/// A map layer that markers are drawn onto.
pub trait MapSurface {
    /// Remove every marker currently on the layer.
    fn clear(&mut self);
    fn add_marker(&mut self, marker: MarkerDescriptor);
}

/// In-memory marker layer. Holds exactly what the last render pass drew.
#[derive(Debug, Clone, Default)]
pub struct LayerGroup {
    markers: Vec<MarkerDescriptor>,
}

impl LayerGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markers(&self) -> &[MarkerDescriptor] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Number of markers labelled dangerous.
    pub fn danger_count(&self) -> usize {
        self.markers
            .iter()
            .filter(|m| m.color == MarkerColor::Danger)
            .count()
    }
}

impl MapSurface for LayerGroup {
    fn clear(&mut self) {
        self.markers.clear();
    }

    fn add_marker(&mut self, marker: MarkerDescriptor) {
        self.markers.push(marker);
    }
}

/// Classify each record and build its marker.
///
/// Records without a finite position are left off the map.
pub fn render(records: &[SightingRecord]) -> Vec<MarkerDescriptor> {
    records
        .iter()
        .filter(|rec| {
            let placeable = rec.has_position();
            if !placeable {
                debug!(name = %rec.name, "skipping sighting without coordinates");
            }
            placeable
        })
        .map(|rec| MarkerDescriptor::from_classified(&rec.clone().classify()))
        .collect()
}

/// Replace everything on `surface` with markers for `records`.
///
/// Returns the number of markers drawn.
pub fn render_onto<S: MapSurface + ?Sized>(surface: &mut S, records: &[SightingRecord]) -> usize {
    let markers = render(records);
    let count = markers.len();
    surface.clear();
    for marker in markers {
        surface.add_marker(marker);
    }
    debug!(count, "rendered markers");
    count
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, lat: f64, lng: f64, image: Option<&str>) -> SightingRecord {
        SightingRecord {
            name: name.into(),
            lat,
            lng,
            observer: "Admin".into(),
            date: "2025-01-01".into(),
            image: image.map(String::from),
        }
    }

    #[test]
    fn lion_near_delhi_is_danger() {
        let markers = render(&[record("Lion", 28.61, 77.20, None)]);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].color, MarkerColor::Danger);
        assert_eq!(markers[0].color.as_str(), "danger");
        assert_eq!(markers[0].color.css(), "red");
        assert_eq!(markers[0].popup.indicator, "⚠️ DANGER");
    }

    #[test]
    fn lion_far_away_is_safe() {
        let markers = render(&[record("Lion", 10.0, 10.0, None)]);
        assert_eq!(markers[0].color, MarkerColor::Safe);
        assert_eq!(markers[0].color.as_str(), "safe");
        assert_eq!(markers[0].popup.indicator, "✅ Safe");
    }

    #[test]
    fn marker_carries_position_and_style() {
        let markers = render(&[record("Tiger", 22.5, 88.3, Some("http://img/t.jpg"))]);
        let m = &markers[0];
        assert_eq!((m.lat, m.lng), (22.5, 88.3));
        assert_eq!(m.radius, 6.0);
        assert_eq!(m.fill_opacity, 0.8);
        assert_eq!(m.popup.name, "Tiger");
        assert_eq!(m.popup.observer, "Admin");
        assert_eq!(m.popup.date, "2025-01-01");
        assert_eq!(m.popup.image.as_deref(), Some("http://img/t.jpg"));
    }

    #[test]
    fn popup_html_includes_image_only_when_present() {
        let with_markers = render(&[record("Tiger", 22.5, 88.3, Some("http://img/t.jpg"))]);
        let with = &with_markers[0];
        let html = with.popup.to_html();
        assert!(html.contains("<b>Tiger</b>"));
        assert!(html.contains("Observer: Admin"));
        assert!(html.contains("<img src=\"http://img/t.jpg\" width=\"100\">"));
        assert!(html.ends_with("✅ Safe"));

        let without_markers = render(&[record("Tiger", 22.5, 88.3, Some(""))]);
        let without = &without_markers[0];
        assert!(without.popup.image.is_none());
        assert!(!without.popup.to_html().contains("<img"));
    }

    #[test]
    fn popup_html_escapes_record_text() {
        let markers = render(&[record("<script>", 10.0, 10.0, None)]);
        let m = &markers[0];
        let html = m.popup.to_html();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn render_onto_replaces_previous_markers() {
        let mut layer = LayerGroup::new();
        render_onto(
            &mut layer,
            &[
                record("Tiger", 28.7041, 77.1025, None),
                record("Leopard", 19.0760, 72.8777, None),
                record("Elephant", 10.0, 10.0, None),
            ],
        );
        assert_eq!(layer.len(), 3);
        assert_eq!(layer.danger_count(), 2);

        let drawn = render_onto(&mut layer, &[record("Koala", -27.0, 153.0, None)]);
        assert_eq!(drawn, 1);
        assert_eq!(layer.len(), 1);
        assert_eq!(layer.markers()[0].popup.name, "Koala");

        render_onto(&mut layer, &[]);
        assert!(layer.is_empty());
    }

    #[test]
    fn records_without_coordinates_are_not_drawn() {
        let mut layer = LayerGroup::new();
        let drawn = render_onto(
            &mut layer,
            &[
                record("Tiger", 28.7041, 77.1025, None),
                record("x", f64::NAN, f64::NAN, None),
                record("Koala", -27.0, f64::NAN, None),
            ],
        );
        assert_eq!(drawn, 1);
        assert_eq!(layer.markers()[0].popup.name, "Tiger");
    }

    #[test]
    fn marker_serializes_color_lowercase() {
        let markers = render(&[record("Lion", 28.61, 77.20, None)]);
        let m = &markers[0];
        let json = serde_json::to_value(m).unwrap();
        assert_eq!(json["color"], "danger");
    }
}
