//! HTTP API handlers for mapgal-gv

pub mod buildinfo;
pub mod gallery;
pub mod health;
pub mod ui;

pub use buildinfo::get_build_info;
pub use gallery::{clear_filters, get_gallery, select_filters};
pub use health::health_routes;
pub use ui::{serve_app_js, serve_gallery_css, serve_index};
