//! Terminal rendering of dashboard state.
//!
//! Prints each surface as a titled section: marker layers as one row per
//! sighting, the gallery as a list of photo URLs (or the placeholder), and the
//! charts as text bars.

use serde::Serialize;
use wildtrack_core::nearest_zone;
use wildtrack_dashboard::{Dashboard, StatusKind};
use wildtrack_sync::SightingSource;
use wildtrack_view::{
    ChartPanel, DEFAULT_CENTER, DEFAULT_ZOOM, GalleryView, LayerGroup, MarkerColor,
    MarkerDescriptor, NO_IMAGES, SeriesPoint,
};

const MAX_LIST_ITEMS: usize = 25;
const BAR_WIDTH: usize = 40;

#[derive(Serialize)]
struct Snapshot<'a> {
    primary: &'a [MarkerDescriptor],
    analytics: &'a [MarkerDescriptor],
    gallery: &'a GalleryView,
    charts: &'a ChartPanel,
    status: Option<StatusJson<'a>>,
}

#[derive(Serialize)]
struct StatusJson<'a> {
    ok: bool,
    message: &'a str,
}

// ── Public API ──

/// Print every surface of `dash`, as text cards or as one JSON document.
pub fn show<S: SightingSource>(dash: &Dashboard<S>, json: bool) -> anyhow::Result<()> {
    if json {
        let snapshot = Snapshot {
            primary: dash.primary_map().markers(),
            analytics: dash.analytics_map().markers(),
            gallery: dash.gallery(),
            charts: dash.charts(),
            status: dash.submit_status().map(|s| StatusJson {
                ok: s.kind == StatusKind::Success,
                message: &s.text,
            }),
        };
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    if let Some(status) = dash.submit_status() {
        let tag = match status.kind {
            StatusKind::Success => "ok",
            StatusKind::Error => "error",
        };
        println!("[{tag}] {}", status.text);
        println!();
    }

    print_layer("Sightings Map", dash.primary_map());
    print_gallery(dash.gallery());
    print_layer("Analytics Map", dash.analytics_map());
    print_charts(dash.charts());
    Ok(())
}

// ── Section rendering ──

fn print_layer(header: &str, layer: &LayerGroup) {
    println!(
        "=== {header} (center {:.4},{:.4} zoom {DEFAULT_ZOOM}) ===",
        DEFAULT_CENTER.0, DEFAULT_CENTER.1
    );
    if layer.is_empty() {
        println!("  (no markers)");
        println!();
        return;
    }
    println!(
        "  {} markers, {} near a human zone",
        layer.len(),
        layer.danger_count()
    );

    let show = layer.len().min(MAX_LIST_ITEMS);
    for marker in &layer.markers()[..show] {
        print_marker(marker);
    }
    if layer.len() > MAX_LIST_ITEMS {
        println!("  ... and {} more", layer.len() - MAX_LIST_ITEMS);
    }
    println!();
}

fn print_marker(marker: &MarkerDescriptor) {
    let popup = &marker.popup;
    let name = if popup.name.is_empty() { "-" } else { popup.name.as_str() };
    print!(
        "  {:<26} {:>9.4} {:>9.4}  {:<12}",
        name, marker.lat, marker.lng, popup.indicator
    );
    if marker.color == MarkerColor::Danger
        && let Some((zone, d)) = nearest_zone(marker.lat, marker.lng)
    {
        print!("  ({:.2}° from {})", d, zone.name);
    }
    println!();

    let mut detail = format!("      observer: {}  date: {}", popup.observer, popup.date);
    if let Some(url) = &popup.image {
        detail.push_str(&format!("  photo: {url}"));
    }
    println!("{detail}");
}

fn print_gallery(gallery: &GalleryView) {
    println!("=== Gallery ===");
    match gallery {
        GalleryView::Placeholder => println!("  {NO_IMAGES}"),
        GalleryView::Images(images) => {
            let show = images.len().min(MAX_LIST_ITEMS);
            for image in &images[..show] {
                println!("  {:<26} {}", image.alt_text, image.url);
            }
            if images.len() > MAX_LIST_ITEMS {
                println!("  ... and {} more", images.len() - MAX_LIST_ITEMS);
            }
        }
    }
    println!();
}

fn print_charts(charts: &ChartPanel) {
    if charts.note.is_empty() {
        return;
    }

    let max = charts.bars.iter().map(|(_, c)| *c).max().unwrap_or(0);
    println!("=== Observations by Species ===");
    print_bars(&charts.bars, max);
    println!();

    println!("=== Top Observed Species ===");
    print_bars(&charts.top, max);
    println!();

    println!("=== Sightings Trend ===");
    print_trend(&charts.trend);
    println!();

    println!("{}", charts.note);
}

fn print_bars(bars: &[(String, usize)], max: usize) {
    for (name, count) in bars {
        let name = if name.is_empty() { "-" } else { name.as_str() };
        println!("  {:<26} {:>5} {}", name, count, bar(*count, max));
    }
}

fn print_trend(trend: &[SeriesPoint]) {
    let (Some(first), Some(last)) = (trend.first(), trend.last()) else {
        println!("  (no data)");
        return;
    };
    println!(
        "  {} points from {} to {}, total {}",
        trend.len(),
        first.timestamp.format("%Y-%m-%d %H:%M:%S"),
        last.timestamp.format("%Y-%m-%d %H:%M:%S"),
        last.value
    );
}

// ── Helpers ──

fn bar(count: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let width = (count * BAR_WIDTH).div_ceil(max);
    "█".repeat(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_scales_to_max() {
        assert_eq!(bar(10, 10).chars().count(), BAR_WIDTH);
        assert_eq!(bar(5, 10).chars().count(), BAR_WIDTH / 2);
        assert_eq!(bar(1, 1000).chars().count(), 1);
        assert_eq!(bar(0, 0), "");
    }
}
