//! API integration tests against the in-memory book store

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use biblioteca_server::{
    api::create_router, repository::MemoryBookRepository, services::Services, AppConfig,
    AppState,
};

fn app() -> Router {
    let services = Services::new(Arc::new(MemoryBookRepository::new()));
    create_router(AppState::new(AppConfig::in_memory(), services))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn dom_casmurro() -> Value {
    json!({
        "titulo": "Dom Casmurro",
        "autor": "Machado de Assis",
        "isbn": "978-85-359-0277-5",
        "anoPublicacao": 1899,
        "editora": "Companhia das Letras",
        "descricao": "Romance clássico da literatura brasileira"
    })
}

fn iracema() -> Value {
    json!({
        "titulo": "Iracema",
        "autor": "José de Alencar",
        "isbn": "978-85-00-00000-1",
        "anoPublicacao": 1865,
        "disponivel": false
    })
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, Method::GET, "/api/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_create_and_get_book() {
    let app = app();
    let (status, created) = send(&app, Method::POST, "/api/livros", Some(dom_casmurro())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
    assert_eq!(created["titulo"], "Dom Casmurro");
    assert_eq!(created["disponivel"], true);

    let (status, fetched) = send(&app, Method::GET, "/api/livros/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, list) = send(&app, Method::GET, "/api/livros", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_get_missing_book_is_404() {
    let app = app();
    let (status, _) = send(&app, Method::GET, "/api/livros/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/api/livros/isbn/000", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_duplicate_isbn() {
    let app = app();
    send(&app, Method::POST, "/api/livros", Some(dom_casmurro())).await;

    let mut copy = iracema();
    copy["isbn"] = json!("978-85-359-0277-5");
    let (status, body) = send(&app, Method::POST, "/api/livros", Some(copy)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["erro"], "a book with this ISBN already exists");

    let (_, list) = send(&app, Method::GET, "/api/livros", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_invalid_payload() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/api/livros", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["erro"].as_str().unwrap().contains("title is required"));

    let mut blank = dom_casmurro();
    blank["autor"] = json!("   ");
    let (status, body) = send(&app, Method::POST, "/api/livros", Some(blank)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["erro"].is_string());

    let mut wrong_type = dom_casmurro();
    wrong_type["anoPublicacao"] = json!("mil oitocentos");
    let (status, body) = send(&app, Method::POST, "/api/livros", Some(wrong_type)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["erro"].is_string());

    let (_, list) = send(&app, Method::GET, "/api/livros", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_update_book() {
    let app = app();
    send(&app, Method::POST, "/api/livros", Some(dom_casmurro())).await;

    let update = json!({
        "titulo": "Dom Casmurro - Edição Especial",
        "autor": "Machado de Assis",
        "isbn": "978-85-359-0277-5",
        "anoPublicacao": 1899,
        "disponivel": false
    });
    let (status, body) = send(&app, Method::PUT, "/api/livros/1", Some(update)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["titulo"], "Dom Casmurro - Edição Especial");
    assert_eq!(body["disponivel"], false);
    // Full replace: omitted optional fields are cleared
    assert!(body["editora"].is_null());
    assert!(body["descricao"].is_null());
}

#[tokio::test]
async fn test_update_missing_book_is_400() {
    let app = app();
    let (status, body) = send(&app, Method::PUT, "/api/livros/999", Some(dom_casmurro())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["erro"], "book not found");

    let (_, list) = send(&app, Method::GET, "/api/livros", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_update_to_taken_isbn() {
    let app = app();
    send(&app, Method::POST, "/api/livros", Some(dom_casmurro())).await;
    send(&app, Method::POST, "/api/livros", Some(iracema())).await;

    let mut update = dom_casmurro();
    update["isbn"] = json!("978-85-00-00000-1");
    let (status, body) = send(&app, Method::PUT, "/api/livros/1", Some(update)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["erro"], "a book with this ISBN already exists");
}

#[tokio::test]
async fn test_delete_book() {
    let app = app();
    send(&app, Method::POST, "/api/livros", Some(dom_casmurro())).await;

    let (status, body) = send(&app, Method::DELETE, "/api/livros/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["mensagem"].is_string());

    let (status, _) = send(&app, Method::GET, "/api/livros/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::DELETE, "/api/livros/1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["erro"], "book not found");
}

#[tokio::test]
async fn test_search_and_available() {
    let app = app();
    send(&app, Method::POST, "/api/livros", Some(dom_casmurro())).await;
    send(&app, Method::POST, "/api/livros", Some(iracema())).await;

    let (status, found) = send(&app, Method::GET, "/api/livros/buscar?termo=Machado", None).await;
    assert_eq!(status, StatusCode::OK);
    let found = found.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["autor"], "Machado de Assis");

    let (_, found) = send(&app, Method::GET, "/api/livros/buscar?termo=companhia", None).await;
    assert_eq!(found.as_array().unwrap().len(), 1);

    let (_, found) = send(&app, Method::GET, "/api/livros/titulo?q=irac", None).await;
    assert_eq!(found[0]["titulo"], "Iracema");

    let (_, found) = send(&app, Method::GET, "/api/livros/autor?q=ALENCAR", None).await;
    assert_eq!(found.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, Method::GET, "/api/livros/buscar", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["erro"].is_string());

    let (_, available) = send(&app, Method::GET, "/api/livros/disponiveis", None).await;
    let available = available.as_array().unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0]["titulo"], "Dom Casmurro");
}

#[tokio::test]
async fn test_statistics_scenario() {
    let app = app();
    let (_, created) = send(&app, Method::POST, "/api/livros", Some(dom_casmurro())).await;
    assert_eq!(created["id"], 1);

    let mut duplicate = iracema();
    duplicate["isbn"] = json!("978-85-359-0277-5");
    let (status, _) = send(&app, Method::POST, "/api/livros", Some(duplicate)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    send(&app, Method::POST, "/api/livros", Some(iracema())).await;

    let (status, stats) = send(&app, Method::GET, "/api/livros/estatisticas", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats, json!({"total": 2, "disponiveis": 1}));
}

#[tokio::test]
async fn test_non_numeric_id_is_400() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/livros/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["erro"].is_string());
}
