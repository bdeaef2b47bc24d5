//! Display surfaces and the event controller
//!
//! A host (web page bridge, terminal, test harness) implements
//! [`GallerySurface`]; [`GalleryController`] turns host events into engine
//! calls and pushes the results back. Every event runs to completion before
//! the next one is handled.

use tracing::{debug, warn};

use crate::session::{FilterControl, GallerySession, GalleryView};
use crate::render::Tile;
use crate::{Error, FilterError, Result};

/// Where filters and gallery tiles are displayed
pub trait GallerySurface {
    /// Whether both the filter and gallery containers exist
    fn is_mounted(&self) -> bool {
        true
    }

    /// Replace the filter controls
    fn show_filters(&mut self, filters: &[FilterControl]);

    /// Replace the displayed gallery
    fn show_gallery(&mut self, tiles: &[Tile]);
}

/// Surface that keeps the last displayed state in memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewSnapshot {
    pub filters: Vec<FilterControl>,
    pub tiles: Vec<Tile>,
    /// Number of gallery redraws so far
    pub renders: u64,
}

impl GallerySurface for ViewSnapshot {
    fn show_filters(&mut self, filters: &[FilterControl]) {
        self.filters = filters.to_vec();
    }

    fn show_gallery(&mut self, tiles: &[Tile]) {
        self.tiles = tiles.to_vec();
        self.renders += 1;
    }
}

/// Routes user events through the session to a surface
pub struct GalleryController<S> {
    session: GallerySession,
    surface: S,
}

impl<S: GallerySurface> GalleryController<S> {
    /// Attach a session to a surface
    ///
    /// Fails with [`Error::MissingMount`] when the surface has nowhere to
    /// draw; the gallery then never runs.
    pub fn attach(session: GallerySession, surface: S) -> Result<Self> {
        if !surface.is_mounted() {
            warn!("Gallery surface is not mounted; gallery disabled");
            return Err(Error::MissingMount);
        }
        Ok(Self { session, surface })
    }

    pub fn session(&self) -> &GallerySession {
        &self.session
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn view(&self) -> GalleryView {
        self.session.view()
    }

    /// Dataset arrived: build the catalog, draw filters and the full gallery
    pub fn on_loaded(&mut self, text: &str) -> Result<()> {
        let catalog = self.session.load(text)?;
        if !catalog.records.is_empty() {
            self.surface.show_filters(&self.session.filter_controls());
        }
        self.redraw();
        Ok(())
    }

    /// A filter checkbox changed
    pub fn on_toggle(&mut self, label: &str) -> std::result::Result<GalleryView, FilterError> {
        self.session.toggle(label)?;
        Ok(self.redraw())
    }

    /// The host reports its complete set of checked filters
    ///
    /// Filter controls are redrawn so they agree with what was applied.
    pub fn on_select<I, L>(&mut self, labels: I) -> std::result::Result<GalleryView, FilterError>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        self.session.select(labels)?;
        self.surface.show_filters(&self.session.filter_controls());
        Ok(self.redraw())
    }

    /// Uncheck every filter
    pub fn on_reset(&mut self) -> std::result::Result<GalleryView, FilterError> {
        self.on_select(std::iter::empty::<&str>())
    }

    fn redraw(&mut self) -> GalleryView {
        let view = self.session.view();
        debug!("Rendering {} tiles", view.tiles.len());
        self.surface.show_gallery(&view.tiles);
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Detached;

    impl GallerySurface for Detached {
        fn is_mounted(&self) -> bool {
            false
        }
        fn show_filters(&mut self, _: &[FilterControl]) {
            panic!("detached surface drawn");
        }
        fn show_gallery(&mut self, _: &[Tile]) {
            panic!("detached surface drawn");
        }
    }

    fn controller() -> GalleryController<ViewSnapshot> {
        GalleryController::attach(GallerySession::default(), ViewSnapshot::default()).unwrap()
    }

    #[test]
    fn test_unmounted_surface_declines() {
        let result = GalleryController::attach(GallerySession::default(), Detached);
        assert!(matches!(result, Err(Error::MissingMount)));
    }

    #[test]
    fn test_nothing_drawn_until_loaded() {
        let c = controller();
        assert_eq!(c.surface(), &ViewSnapshot::default());
    }

    #[test]
    fn test_load_draws_filters_and_gallery() {
        let mut c = controller();
        c.on_loaded("m1,loc1,Snow,2\nm2,loc2,Cavern").unwrap();

        let labels: Vec<&str> = c.surface().filters.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["Snow", "Cavern", "2"]);
        assert_eq!(c.surface().tiles.len(), 2);
        assert_eq!(c.surface().renders, 1);
    }

    #[test]
    fn test_empty_dataset_draws_no_filters() {
        let mut c = controller();
        c.on_loaded("\n  \n").unwrap();
        assert!(c.surface().filters.is_empty());
        assert!(c.surface().tiles.is_empty());
        assert_eq!(c.surface().renders, 1);
    }

    #[test]
    fn test_toggle_replaces_gallery() {
        let mut c = controller();
        c.on_loaded("m1,loc1,Snow\nm2,loc2,Snow,,Tree").unwrap();

        c.on_toggle("Snow").unwrap();
        assert_eq!(c.surface().tiles.len(), 2);

        let view = c.on_toggle("Tree").unwrap();
        assert_eq!(view.shown, 1);
        assert_eq!(c.surface().tiles, view.tiles);
        assert_eq!(c.surface().tiles[0].alt, "loc2");
        assert_eq!(c.surface().renders, 3);
    }

    #[test]
    fn test_rejected_toggle_does_not_redraw() {
        let mut c = controller();
        c.on_loaded("m1,loc1,Snow").unwrap();
        assert!(c.on_toggle("Nope").is_err());
        assert_eq!(c.surface().renders, 1);
    }

    #[test]
    fn test_select_redraws_filters_and_gallery() {
        let mut c = controller();
        c.on_loaded("m1,loc1,Snow\nm2,loc2,Snow,,Tree\nm3,loc3,Cavern,,Tree").unwrap();
        c.on_toggle("Cavern").unwrap();

        let view = c.on_select(["Snow", "Tree"]).unwrap();
        assert_eq!(view.shown, 1);
        assert_eq!(c.surface().tiles, view.tiles);
        assert_eq!(c.surface().filters, view.filters);

        let checked: Vec<&str> = c
            .surface()
            .filters
            .iter()
            .filter(|f| f.active)
            .map(|f| f.label.as_str())
            .collect();
        assert_eq!(checked, vec!["Snow", "Tree"]);
    }

    #[test]
    fn test_rejected_select_keeps_previous_state() {
        let mut c = controller();
        c.on_loaded("m1,loc1,Snow\nm2,loc2,Cavern").unwrap();
        c.on_select(["Snow"]).unwrap();
        let renders = c.surface().renders;

        assert_eq!(
            c.on_select(["Snow", "Lava"]),
            Err(FilterError::UnknownFilter("Lava".to_string()))
        );
        assert_eq!(c.surface().renders, renders);
        assert_eq!(c.view().shown, 1);
    }

    #[test]
    fn test_reset_requires_load() {
        let mut c = controller();
        assert_eq!(c.on_reset(), Err(FilterError::NotLoaded));
    }

    #[test]
    fn test_reset_unchecks_everything() {
        let mut c = controller();
        c.on_loaded("m1,loc1,Snow\nm2,loc2,Cavern").unwrap();
        c.on_toggle("Snow").unwrap();

        let view = c.on_reset().unwrap();
        assert_eq!(view.shown, 2);
        assert!(c.surface().filters.iter().all(|f| !f.active));
    }
}
