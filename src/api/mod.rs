pub mod assets;
pub mod search;
pub mod server;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the HTTP router / 构建路由
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(server::health_check))
        .route("/api/busca", get(search::search))
        .route("/", get(assets::index_page))
        .route("/style.css", get(assets::stylesheet))
        .route("/favicon.png", get(assets::favicon))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
