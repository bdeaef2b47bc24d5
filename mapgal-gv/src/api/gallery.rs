//! Gallery view and filter selection
//!
//! Every response carries the complete view; the page replaces both its
//! checkboxes and its gallery with it. Pages always send the whole set of
//! filters they want checked, so the returned tiles depend only on that
//! request, however requests from several pages interleave.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mapgal_common::{FilterError, GalleryView};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::AppState;

/// Body of PUT /api/filters
#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    /// Every filter that should be checked; all others are unchecked
    pub active: Vec<String>,
}

/// GET /api/gallery
///
/// Current filters and tiles. Empty while the dataset is not loaded.
pub async fn get_gallery(State(state): State<AppState>) -> Json<GalleryView> {
    Json(state.gallery.read().await.view())
}

/// PUT /api/filters
///
/// Replaces the checked filters and returns the re-rendered view. A request
/// naming any label outside the vocabulary changes nothing.
pub async fn select_filters(
    State(state): State<AppState>,
    Json(request): Json<SelectRequest>,
) -> Result<Json<GalleryView>, GalleryError> {
    let mut gallery = state.gallery.write().await;
    let view = gallery.on_select(&request.active)?;
    debug!(
        "Selected [{}]: {} of {} maps shown",
        request.active.join(", "),
        view.shown,
        view.total
    );
    Ok(Json(view))
}

/// DELETE /api/filters
///
/// Unchecks every filter.
pub async fn clear_filters(
    State(state): State<AppState>,
) -> Result<Json<GalleryView>, GalleryError> {
    let view = state.gallery.write().await.on_reset()?;
    Ok(Json(view))
}

/// Gallery API errors
#[derive(Debug)]
pub enum GalleryError {
    NotLoaded,
    UnknownFilter(String),
}

impl From<FilterError> for GalleryError {
    fn from(err: FilterError) -> Self {
        match err {
            FilterError::NotLoaded => GalleryError::NotLoaded,
            FilterError::UnknownFilter(label) => GalleryError::UnknownFilter(label),
        }
    }
}

impl IntoResponse for GalleryError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            GalleryError::NotLoaded => {
                (StatusCode::CONFLICT, "Gallery not loaded".to_string())
            }
            GalleryError::UnknownFilter(label) => {
                (StatusCode::BAD_REQUEST, format!("Unknown filter: {}", label))
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
