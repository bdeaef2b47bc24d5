//! Gallery view rendering
//!
//! Maps records to image tiles. Rendering is pure: the same records always
//! yield the same tiles, and hosts replace whatever they showed before.

use serde::Serialize;

use crate::record::Record;

pub const DEFAULT_IMAGE_PREFIX: &str = "maps/";
pub const DEFAULT_IMAGE_EXTENSION: &str = ".png";

/// Builds image references from thumbnail ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLocator {
    pub prefix: String,
    pub extension: String,
}

impl ImageLocator {
    pub fn new(prefix: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            extension: extension.into(),
        }
    }

    /// `prefix + thumbnail_id + extension`
    pub fn src_for(&self, thumbnail_id: &str) -> String {
        format!("{}{}{}", self.prefix, thumbnail_id, self.extension)
    }
}

impl Default for ImageLocator {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_PREFIX, DEFAULT_IMAGE_EXTENSION)
    }
}

/// One displayed gallery entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tile {
    /// Image source reference
    pub src: String,
    /// Accessible alternate text (the full image id)
    pub alt: String,
}

/// Render records into tiles, one per record, in input order
pub fn render<'a, I>(records: I, locator: &ImageLocator) -> Vec<Tile>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .map(|r| Tile {
            src: locator.src_for(&r.thumbnail_id),
            alt: r.full_image_id.clone(),
        })
        .collect()
}
