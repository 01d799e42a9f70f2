use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use msgsearch_backend::api::build_router;
use msgsearch_backend::search::{CorpusLoader, SearchEngine};
use msgsearch_backend::state::AppState;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

struct Fixture {
    data: TempDir,
    statics: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            data: TempDir::new().unwrap(),
            statics: TempDir::new().unwrap(),
        }
    }

    fn data_file(&self, name: &str, content: &Value) {
        std::fs::write(self.data.path().join(name), content.to_string()).unwrap();
    }

    fn static_file(&self, name: &str, content: &[u8]) {
        std::fs::write(self.statics.path().join(name), content).unwrap();
    }

    fn router(&self) -> Router {
        router_for(self.data.path(), self.statics.path())
    }
}

fn router_for(data_dir: &Path, static_dir: &Path) -> Router {
    let engine = SearchEngine::new(Arc::new(CorpusLoader::new(data_dir)));
    build_router(Arc::new(AppState::new(engine, static_dir.to_path_buf(), 5)))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

fn texts(body: &Value) -> Vec<String> {
    body["resultados"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["text"].as_str().unwrap_or("").to_string())
        .collect()
}

#[tokio::test]
async fn search_aggregates_files_in_name_order() {
    let fx = Fixture::new();
    fx.data_file("a.json", &json!([{"text": "hi there"}]));
    fx.data_file("b.json", &json!({"messages": [{"text": "hi again"}]}));

    let (status, body) = get_json(fx.router(), "/api/busca?q=hi").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(texts(&body), vec!["hi there", "hi again"]);
    assert_eq!(body["total_resultados"], 2);
    assert_eq!(body["total_paginas"], 1);
    assert_eq!(body["pagina"], 1);
}

#[tokio::test]
async fn search_returns_full_records_sorted_recent_first() {
    let fx = Fixture::new();
    fx.data_file(
        "chat.json",
        &json!({"messages": [
            {"text": "reunião antiga", "created_date": "2023-01-01", "id": 1},
            {"text": "reunião sem data", "id": 2},
            {"text": "Reunião nova", "created_date": "2024-06-01", "id": 3,
             "creator": {"name": "Bia", "email": "bia@example.com"}},
            {"text": "reunião apagada", "created_date": "2025-01-01", "message_state": "DELETED"}
        ]}),
    );

    let (status, body) = get_json(fx.router(), "/api/busca?q=REUNI%C3%83O").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_resultados"], 3);
    assert_eq!(
        body["resultados"][0],
        json!({"text": "Reunião nova", "created_date": "2024-06-01", "id": 3,
               "creator": {"name": "Bia", "email": "bia@example.com"}})
    );
    assert_eq!(body["resultados"][1]["id"], 1);
    assert_eq!(body["resultados"][2]["id"], 2);
}

#[tokio::test]
async fn search_paginates_with_defaults_and_params() {
    let fx = Fixture::new();
    let records: Vec<Value> = (0..12)
        .map(|i| json!({"text": format!("item {}", i), "created_date": format!("2024-02-{:02}", 28 - i)}))
        .collect();
    fx.data_file("items.json", &Value::Array(records));

    let (_, body) = get_json(fx.router(), "/api/busca?q=item").await;
    assert_eq!(body["total_paginas"], 3);
    assert_eq!(texts(&body).len(), 5);

    let (_, body) = get_json(fx.router(), "/api/busca?q=item&pagina=3&limite=5").await;
    assert_eq!(texts(&body), vec!["item 10", "item 11"]);
    assert_eq!(body["pagina"], 3);

    let (status, body) = get_json(fx.router(), "/api/busca?q=item&pagina=4").await;
    assert_eq!(status, StatusCode::OK);
    assert!(texts(&body).is_empty());
    assert_eq!(body["total_paginas"], 3);
    assert_eq!(body["total_resultados"], 12);
}

#[tokio::test]
async fn empty_query_short_circuits() {
    let fx = Fixture::new();
    fx.data_file("a.json", &json!([{"text": "anything"}]));

    let (status, body) = get_json(fx.router(), "/api/busca?q=&pagina=7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"resultados": [], "pagina": 1, "total_paginas": 0, "total_resultados": 0})
    );
}

#[tokio::test]
async fn missing_data_directory_gives_empty_results() {
    let statics = TempDir::new().unwrap();
    let app = router_for(&statics.path().join("Dados"), statics.path());

    let (status, body) = get_json(app, "/api/busca?q=hi").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_resultados"], 0);
    assert_eq!(body["total_paginas"], 0);
}

#[tokio::test]
async fn malformed_files_do_not_fail_the_request() {
    let fx = Fixture::new();
    std::fs::write(fx.data.path().join("broken.json"), "{ nope").unwrap();
    fx.data_file("ok.json", &json!([{"text": "still here"}, "not a record", 12]));

    let (status, body) = get_json(fx.router(), "/api/busca?q=here").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(texts(&body), vec!["still here"]);
}

#[tokio::test]
async fn non_positive_page_size_is_rejected() {
    let fx = Fixture::new();
    fx.data_file("a.json", &json!([{"text": "hi"}]));

    for uri in ["/api/busca?q=hi&limite=0", "/api/busca?q=hi&limite=-3"] {
        let (status, body) = get_json(fx.router(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("page size"));
    }
}

#[tokio::test]
async fn invalid_query_string_is_bad_request() {
    let fx = Fixture::new();

    for uri in ["/api/busca", "/api/busca?q=hi&pagina=abc"] {
        let (status, body) = get_json(fx.router(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn repeated_searches_reflect_current_files() {
    let fx = Fixture::new();
    fx.data_file("a.json", &json!([{"text": "novo"}]));

    let (_, first) = get_json(fx.router(), "/api/busca?q=novo").await;
    let (_, second) = get_json(fx.router(), "/api/busca?q=novo").await;
    assert_eq!(first, second);

    fx.data_file("b.json", &json!([{"text": "novo também"}]));
    let (_, third) = get_json(fx.router(), "/api/busca?q=novo").await;
    assert_eq!(third["total_resultados"], 2);
}

#[tokio::test]
async fn serves_static_assets() {
    let fx = Fixture::new();
    fx.static_file("index.html", b"<html>busca</html>");
    fx.static_file("style.css", b"body { margin: 0 }");

    let response = fx
        .router()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let (status, body) = get(fx.router(), "/style.css").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"body { margin: 0 }");
}

#[tokio::test]
async fn missing_assets() {
    let fx = Fixture::new();

    let (status, _) = get(fx.router(), "/style.css").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get_json(fx.router(), "/favicon.png").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"error": "Imagem não encontrada"}));

    fx.static_file("favicon.png", &[0x89, b'P', b'N', b'G']);
    let (status, body) = get(fx.router(), "/favicon.png").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, vec![0x89, b'P', b'N', b'G']);
}

#[tokio::test]
async fn health_check() {
    let fx = Fixture::new();
    let (status, body) = get_json(fx.router(), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
