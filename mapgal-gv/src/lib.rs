//! mapgal-gv library - Gallery Viewer
//!
//! Serves the map gallery page and the JSON API its checkboxes drive.
//! All filtering happens in the shared gallery engine; the page only draws
//! what the API returns.

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use mapgal_common::{DatasetSource, GalleryController, ViewSnapshot};
use tokio::sync::RwLock;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod api;

/// Thumbnail directory and the URL path it is served under
#[derive(Debug, Clone)]
pub struct ImageMount {
    pub route: String,
    pub dir: PathBuf,
}

/// Application state shared across HTTP handlers
///
/// Toggles take the write lock, so each one recomputes and re-renders
/// before the next is handled.
#[derive(Clone)]
pub struct AppState {
    pub gallery: Arc<RwLock<GalleryController<ViewSnapshot>>>,
    pub images: Option<ImageMount>,
}

impl AppState {
    pub fn new(controller: GalleryController<ViewSnapshot>, images: Option<ImageMount>) -> Self {
        Self {
            gallery: Arc::new(RwLock::new(controller)),
            images,
        }
    }
}

/// Fetch the dataset and hand it to the gallery
///
/// On error the gallery stays unloaded; there is no retry.
pub async fn load_dataset(state: &AppState, source: &DatasetSource) -> mapgal_common::Result<()> {
    let text = source.fetch().await?;
    state.gallery.write().await.on_loaded(&text)
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, put};

    let api = Router::new()
        .route("/api/gallery", get(api::get_gallery))
        .route(
            "/api/filters",
            put(api::select_filters).delete(api::clear_filters),
        )
        .route("/api/buildinfo", get(api::get_build_info));

    let public = Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .route("/static/gallery.css", get(api::serve_gallery_css))
        .merge(api::health_routes());

    let mut router = Router::new().merge(api).merge(public);
    if let Some(mount) = &state.images {
        router = router.nest_service(&mount.route, ServeDir::new(&mount.dir));
    }

    router
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
