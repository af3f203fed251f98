//! Photo gallery built from the same records as the map.

use serde::Serialize;
use wildtrack_core::SightingRecord;

/// Shown in place of the gallery when no record has a photo.
pub const NO_IMAGES: &str = "No images available for this search.";

/// Thumbnail width in pixels.
pub const THUMBNAIL_WIDTH: u32 = 150;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    pub url: String,
    /// The species name.
    pub alt_text: String,
}

/// Photos of records that have one, in record order.
pub fn build_gallery(records: &[SightingRecord]) -> Vec<ImageRef> {
    records
        .iter()
        .filter_map(|rec| {
            rec.image_url().map(|url| ImageRef {
                url: url.to_string(),
                alt_text: rec.name.clone(),
            })
        })
        .collect()
}

/// What the gallery surface currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "images", rename_all = "lowercase")]
pub enum GalleryView {
    Images(Vec<ImageRef>),
    /// No photos; the surface shows [`NO_IMAGES`].
    #[default]
    Placeholder,
}

impl GalleryView {
    /// An empty image list becomes the placeholder, never an empty gallery.
    pub fn from_images(images: Vec<ImageRef>) -> Self {
        if images.is_empty() {
            Self::Placeholder
        } else {
            Self::Images(images)
        }
    }

    pub fn from_records(records: &[SightingRecord]) -> Self {
        Self::from_images(build_gallery(records))
    }

    pub fn images(&self) -> &[ImageRef] {
        match self {
            Self::Images(images) => images,
            Self::Placeholder => &[],
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }
}
