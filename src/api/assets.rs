//! Static page assets / 静态页面资源
//!
//! Serves the search page files from the configured static directory.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;

use crate::state::AppState;

/// Read a file with its guessed content type / 读取文件并推断类型
async fn read_asset(dir: &Path, name: &str) -> Option<Response> {
    let path = dir.join(name);
    match tokio::fs::read(&path).await {
        Ok(data) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            Some(([(header::CONTENT_TYPE, mime.to_string())], data).into_response())
        }
        Err(e) => {
            tracing::debug!("Static file {:?} unavailable: {}", path, e);
            None
        }
    }
}

async fn serve_or_not_found(dir: &Path, name: &str) -> Response {
    match read_asset(dir, name).await {
        Some(response) => response,
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

/// GET / - 搜索页面
pub async fn index_page(State(state): State<Arc<AppState>>) -> Response {
    serve_or_not_found(&state.static_dir, "index.html").await
}

/// GET /style.css
pub async fn stylesheet(State(state): State<Arc<AppState>>) -> Response {
    serve_or_not_found(&state.static_dir, "style.css").await
}

/// GET /favicon.png - 缺失时返回 JSON 错误而非 404
pub async fn favicon(State(state): State<Arc<AppState>>) -> Response {
    match read_asset(&state.static_dir, "favicon.png").await {
        Some(response) => response,
        None => Json(json!({ "error": "Imagem não encontrada" })).into_response(),
    }
}
