pub mod features;
pub mod services;
pub mod utilities;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::utilities::app_state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(features::listings::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
