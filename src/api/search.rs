use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::search::SearchPage;
use crate::state::AppState;

/// 搜索请求参数
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default)]
    pub pagina: Option<i64>,
    #[serde(default)]
    pub limite: Option<i64>,
}

fn default_page() -> i64 { 1 }

fn bad_request(message: String) -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

/// GET /api/busca - 搜索消息
///
/// 每次请求都重新读取数据目录（阻塞 IO 放到 spawn_blocking）
pub async fn search(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchPage>, (StatusCode, Json<Value>)> {
    let Query(params) = params.map_err(|e| bad_request(e.body_text()))?;

    let page = params.pagina.unwrap_or_else(default_page);
    let page_size = params.limite.unwrap_or(state.default_page_size);
    let engine = state.engine.clone();

    let result = tokio::task::spawn_blocking(move || engine.search(&params.q, page, page_size))
        .await
        .map_err(|e| {
            tracing::error!("Search task failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "search task failed" })),
            )
        })?;

    result.map(Json).map_err(|e| {
        tracing::debug!("Rejected search: {}", e);
        bad_request(e.to_string())
    })
}
