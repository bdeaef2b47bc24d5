//! # Map Gallery Common Library
//!
//! The gallery engine shared by every host:
//! - Dataset parsing into map records
//! - Filter vocabulary from the canonical filter order
//! - Active filter state and the AND predicate
//! - Tile rendering
//! - Session state machine and the surface/controller event contract
//! - Dataset fetching and configuration loading

pub mod config;
pub mod error;
pub mod filter;
pub mod record;
pub mod render;
pub mod session;
pub mod source;
pub mod surface;
pub mod vocabulary;

pub use error::{Error, FilterError, Result};
pub use filter::{matching, ActiveFilters};
pub use record::{parse_records, Record};
pub use render::{render, ImageLocator, Tile};
pub use session::{Catalog, FilterControl, GallerySession, GalleryView, Phase};
pub use source::DatasetSource;
pub use surface::{GalleryController, GallerySurface, ViewSnapshot};
pub use vocabulary::{vocabulary, FilterOrder};
