use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use super::{handlers, middleware::metrics_middleware, movies};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Front-end assets (index.html, scripts, styles)
    let serve_dir = ServeDir::new(state.static_dir());

    // Full paths: a nested "/" would not match the trailing-slash form
    Router::new()
        .route("/api", get(handlers::index))
        .route("/api/", get(handlers::index))
        .route("/api/movies", get(movies::list_movies))
        .route("/api/config", get(handlers::get_config))
        .route("/metrics", get(handlers::metrics))
        .with_state(state)
        .fallback_service(serve_dir)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
}
