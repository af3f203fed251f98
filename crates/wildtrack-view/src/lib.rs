//! Display layer: turns fetched sighting records into map markers, a photo
//! gallery, and per-species chart data.

pub mod analytics;
pub mod gallery;
pub mod marker;

pub use analytics::{
    AnalyticsSummary, ChartPanel, SeriesPoint, TOP_SPECIES_LIMIT, aggregate, aggregate_at,
    data_note,
};
pub use gallery::{GalleryView, ImageRef, NO_IMAGES, build_gallery};
pub use marker::{
    DEFAULT_CENTER, DEFAULT_ZOOM, LayerGroup, MapSurface, MarkerColor, MarkerDescriptor, Popup,
    render, render_onto,
};
