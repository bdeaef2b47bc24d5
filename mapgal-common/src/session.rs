//! Gallery session state
//!
//! One session per running gallery. The catalog (records and vocabulary) is
//! built once when the dataset arrives and never changes afterwards; only the
//! active filter set mutates.
//!
//! ```text
//! Unloaded --load--> Unfiltered <--toggle/select--> Filtered(labels)
//! ```

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::filter::{matching, ActiveFilters};
use crate::record::{parse_records, Record};
use crate::render::{render, ImageLocator, Tile};
use crate::vocabulary::{unlisted_tags, vocabulary, FilterOrder};
use crate::{Error, FilterError, Result};

/// Immutable data produced by a successful load
#[derive(Debug)]
pub struct Catalog {
    pub records: Vec<Record>,
    pub vocabulary: Vec<String>,
}

impl Catalog {
    pub fn build(records: Vec<Record>, order: &FilterOrder) -> Self {
        let vocabulary = vocabulary(&records, order);
        Self { records, vocabulary }
    }
}

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Unloaded,
    Unfiltered,
    Filtered,
}

/// A filter checkbox as the host should draw it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterControl {
    pub label: String,
    pub active: bool,
}

/// Everything a host needs to draw the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryView {
    pub phase: Phase,
    pub filters: Vec<FilterControl>,
    pub tiles: Vec<Tile>,
    /// Records in the dataset
    pub total: usize,
    /// Records currently shown
    pub shown: usize,
}

pub struct GallerySession {
    order: FilterOrder,
    locator: ImageLocator,
    catalog: Option<Arc<Catalog>>,
    active: ActiveFilters,
}

impl GallerySession {
    pub fn new(order: FilterOrder, locator: ImageLocator) -> Self {
        Self {
            order,
            locator,
            catalog: None,
            active: ActiveFilters::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        match (&self.catalog, self.active.is_empty()) {
            (None, _) => Phase::Unloaded,
            (Some(_), true) => Phase::Unfiltered,
            (Some(_), false) => Phase::Filtered,
        }
    }

    pub fn catalog(&self) -> Option<&Arc<Catalog>> {
        self.catalog.as_ref()
    }

    pub fn active(&self) -> &ActiveFilters {
        &self.active
    }

    pub fn locator(&self) -> &ImageLocator {
        &self.locator
    }

    /// Parse the dataset and build the catalog
    ///
    /// Allowed exactly once per session.
    pub fn load(&mut self, text: &str) -> Result<Arc<Catalog>> {
        if self.catalog.is_some() {
            return Err(Error::AlreadyLoaded);
        }

        let records = parse_records(text);
        let unlisted = unlisted_tags(&records, &self.order);
        if !unlisted.is_empty() {
            warn!(
                "{} tag(s) are not in the filter order and cannot be filtered: {}",
                unlisted.len(),
                unlisted.join(", ")
            );
        }

        let catalog = Arc::new(Catalog::build(records, &self.order));
        info!(
            "Loaded {} maps with {} filters",
            catalog.records.len(),
            catalog.vocabulary.len()
        );
        self.catalog = Some(Arc::clone(&catalog));
        Ok(catalog)
    }

    fn check_label(&self, label: &str) -> std::result::Result<(), FilterError> {
        let catalog = self.catalog.as_ref().ok_or(FilterError::NotLoaded)?;
        if !catalog.vocabulary.iter().any(|l| l == label) {
            return Err(FilterError::UnknownFilter(label.to_string()));
        }
        Ok(())
    }

    /// Flip `label` and return whether it is now active
    ///
    /// Only vocabulary labels may be toggled.
    pub fn toggle(&mut self, label: &str) -> std::result::Result<bool, FilterError> {
        self.check_label(label)?;
        let now_active = self.active.toggle(label);
        debug!("Filter '{}' {}", label, if now_active { "on" } else { "off" });
        Ok(now_active)
    }

    /// Replace the active set with exactly `labels`
    ///
    /// Every label must be in the vocabulary; on error nothing changes.
    pub fn select<I, S>(&mut self, labels: I) -> std::result::Result<(), FilterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.catalog.is_none() {
            return Err(FilterError::NotLoaded);
        }
        let labels: Vec<S> = labels.into_iter().collect();
        for label in &labels {
            self.check_label(label.as_ref())?;
        }

        self.active = labels.iter().map(|l| l.as_ref().to_string()).collect();
        debug!("Selected {} filter(s)", self.active.len());
        Ok(())
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    /// Filter controls in vocabulary order
    pub fn filter_controls(&self) -> Vec<FilterControl> {
        self.catalog
            .as_ref()
            .map(|c| {
                c.vocabulary
                    .iter()
                    .map(|label| FilterControl {
                        label: label.clone(),
                        active: self.active.contains(label),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Tiles for the records matching the active filters
    pub fn tiles(&self) -> Vec<Tile> {
        match &self.catalog {
            Some(c) => render(matching(&c.records, &self.active), &self.locator),
            None => Vec::new(),
        }
    }

    pub fn view(&self) -> GalleryView {
        let tiles = self.tiles();
        GalleryView {
            phase: self.phase(),
            filters: self.filter_controls(),
            total: self.catalog.as_ref().map_or(0, |c| c.records.len()),
            shown: tiles.len(),
            tiles,
        }
    }
}

impl Default for GallerySession {
    fn default() -> Self {
        Self::new(FilterOrder::default(), ImageLocator::default())
    }
}
