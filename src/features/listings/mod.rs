pub mod handlers;
pub mod memory;
pub mod models;
pub mod repository;
pub mod schemas;
pub mod selector;

use axum::{Router, routing::get};

use crate::utilities::app_state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/houses", get(handlers::get_many_listings_page_handler))
        .route("/houses/{id}", get(handlers::get_one_listing_page_handler))
        .route("/api/v1/houses", get(handlers::get_many_listings_handler))
        .route("/api/v1/houses/{id}", get(handlers::get_one_listing_handler))
}
