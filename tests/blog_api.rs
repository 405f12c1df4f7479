//! End-to-end tests of the HTTP surface over the in-memory store.

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use blog_api::{app, AppState, MemoryStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    store: Arc<MemoryStore>,
}

impl TestApp {
    fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let router = app(AppState::new(store.clone()));
        TestApp { router, store }
    }

    /// App with status 1 ("Publicado") and status 2 ("Rascunho").
    async fn seeded() -> Result<Self, String> {
        let app = TestApp::new();
        let (s, _) = app
            .request(Method::POST, "/status", Some(json!({"label": "Publicado", "order": 1})))
            .await?;
        assert_eq!(s, StatusCode::CREATED);
        let (s, _) = app
            .request(Method::POST, "/status", Some(json!({"label": "Rascunho", "order": 2, "is_active": false})))
            .await?;
        assert_eq!(s, StatusCode::CREATED);
        Ok(app)
    }

    async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Result<(StatusCode, Value), String> {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(payload) => {
                let bytes = serde_json::to_vec(&payload).map_err(|e| format!("serialize request body: {e}"))?;
                builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(bytes))
                    .map_err(|e| format!("build request: {e}"))?
            }
            None => builder.body(Body::empty()).map_err(|e| format!("build request: {e}"))?,
        };
        let (status, _, body) = self.send(req).await?;
        let parsed = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).map_err(|e| format!("parse response body: {e}"))?
        };
        Ok((status, parsed))
    }

    /// Sends a prepared request and returns the raw response parts.
    async fn send(&self, req: Request<Body>) -> Result<(StatusCode, HeaderMap, Vec<u8>), String> {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .map_err(|e| format!("route request: {e}"))?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .map_err(|e| format!("read response body: {e}"))?;
        Ok((status, headers, body.to_vec()))
    }

    /// Sends `body` as-is, with an optional content type, and parses the JSON reply.
    async fn send_raw(&self, method: Method, uri: &str, content_type: Option<&str>, body: &str) -> Result<(StatusCode, Value), String> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(ct) = content_type {
            builder = builder.header(header::CONTENT_TYPE, ct);
        }
        let req = builder
            .body(Body::from(body.to_owned()))
            .map_err(|e| format!("build request: {e}"))?;
        let (status, headers, bytes) = self.send(req).await?;
        let ct = headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()).unwrap_or_default();
        assert!(ct.starts_with("application/json"), "reply is not JSON: {ct}");
        let parsed = serde_json::from_slice(&bytes).map_err(|e| format!("parse response body: {e}"))?;
        Ok((status, parsed))
    }

    async fn create_blog(&self, title: &str, content: &str, status_id: i64) -> Result<Value, String> {
        let (status, body) = self
            .request(
                Method::POST,
                "/blogs",
                Some(json!({"title": title, "content": content, "statusId": status_id})),
            )
            .await?;
        assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
        Ok(body)
    }
}

fn ids(v: &Value) -> Vec<i64> {
    v.as_array()
        .map(|a| a.iter().filter_map(|x| x["id"].as_i64()).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn root_reports_running() -> Result<(), String> {
    let app = TestApp::new();
    let (status, body) = app.request(Method::GET, "/", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "API is running!"}));
    Ok(())
}

#[tokio::test]
async fn probes_and_docs_respond() -> Result<(), String> {
    let app = TestApp::new();
    let (status, body) = app.request(Method::GET, "/health", None).await?;
    assert_eq!((status, body), (StatusCode::OK, json!({"status": "ok"})));
    let (status, body) = app.request(Method::GET, "/ready", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");
    let (status, body) = app.request(Method::GET, "/version", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "blog-api");
    let (status, body) = app.request(Method::GET, "/api-docs/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/blog-alunos/busca"].is_object());
    Ok(())
}

#[tokio::test]
async fn api_docs_lead_to_swagger_ui() -> Result<(), String> {
    let app = TestApp::new();
    let req = Request::builder()
        .uri("/api-docs")
        .body(Body::empty())
        .map_err(|e| format!("build request: {e}"))?;
    let (status, headers, _) = app.send(req).await?;
    assert!(status.is_redirection(), "{status}");
    assert_eq!(
        headers.get(header::LOCATION).and_then(|v| v.to_str().ok()),
        Some("/swagger-ui/")
    );

    let req = Request::builder()
        .uri("/swagger-ui/")
        .body(Body::empty())
        .map_err(|e| format!("build request: {e}"))?;
    let (status, _, page) = app.send(req).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8_lossy(&page).to_lowercase().contains("swagger"));
    Ok(())
}

#[tokio::test]
async fn status_create_and_list() -> Result<(), String> {
    let app = TestApp::seeded().await?;
    let (status, body) = app.request(Method::GET, "/status", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"id": 1, "label": "Publicado", "order": 1, "is_active": true},
            {"id": 2, "label": "Rascunho", "order": 2, "is_active": false},
        ])
    );
    Ok(())
}

#[tokio::test]
async fn status_without_label_is_a_500() -> Result<(), String> {
    let app = TestApp::new();
    let (status, body) = app.request(Method::POST, "/status", Some(json!({"order": 1}))).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap_or_default().contains("label"));
    Ok(())
}

#[tokio::test]
async fn create_then_fetch_round_trips() -> Result<(), String> {
    let app = TestApp::seeded().await?;
    let created = app.create_blog("Blog de Teste", "Conteudo de teste", 1).await?;
    let id = created["id"].as_i64().ok_or("created blog has no id")?;
    assert!(created.get("status").is_none());

    let (status, fetched) = app.request(Method::GET, &format!("/blogs/{id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "Blog de Teste");
    assert_eq!(fetched["content"], "Conteudo de teste");
    assert_eq!(fetched["statusId"], 1);
    assert!(fetched["createdDateTime"].is_string());
    assert!(fetched["updatedDateTime"].is_string());
    assert_eq!(fetched["status"]["label"], "Publicado");
    Ok(())
}

#[tokio::test]
async fn list_blogs_joins_status() -> Result<(), String> {
    let app = TestApp::seeded().await?;
    app.create_blog("a", "x", 1).await?;
    app.create_blog("b", "y", 2).await?;
    let (status, body) = app.request(Method::GET, "/blogs", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 2]);
    assert_eq!(body[1]["status"]["label"], "Rascunho");
    Ok(())
}

#[tokio::test]
async fn fetching_missing_blog_is_404() -> Result<(), String> {
    let app = TestApp::seeded().await?;
    let (status, body) = app.request(Method::GET, "/blogs/99999", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Blog not found"}));
    Ok(())
}

#[tokio::test]
async fn non_numeric_id_fails_as_data_access() -> Result<(), String> {
    let app = TestApp::seeded().await?;
    for method in [Method::GET, Method::DELETE] {
        let (status, body) = app.request(method, "/blogs/abc", None).await?;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let msg = body["error"].as_str().unwrap_or_default();
        assert!(msg.contains("invalid input syntax for type integer"), "{msg}");
    }
    Ok(())
}

#[tokio::test]
async fn id_beyond_integer_range_is_404() -> Result<(), String> {
    let app = TestApp::seeded().await?;
    app.create_blog("fica", "aqui", 1).await?;
    let (status, body) = app.request(Method::GET, "/blogs/3000000000", None).await?;
    assert_eq!((status, body), (StatusCode::NOT_FOUND, json!({"error": "Blog not found"})));
    let (status, _) = app
        .request(Method::PUT, "/blogs/3000000000", Some(json!({"title": "X"})))
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.request(Method::DELETE, "/blogs/3000000000", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(app.store.blog_count().map_err(|e| e.to_string())?, 1);
    Ok(())
}

#[tokio::test]
async fn partial_update_keeps_omitted_fields() -> Result<(), String> {
    let app = TestApp::seeded().await?;
    let created = app.create_blog("antes", "corpo", 2).await?;
    let id = created["id"].as_i64().ok_or("no id")?;

    let (status, updated) = app
        .request(Method::PUT, &format!("/blogs/{id}"), Some(json!({"title": "X"})))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "X");
    assert_eq!(updated["content"], "corpo");
    assert_eq!(updated["statusId"], 2);
    assert_eq!(updated["createdDateTime"], created["createdDateTime"]);

    let (status, updated) = app
        .request(Method::PUT, &format!("/blogs/{id}"), Some(json!({"content": null, "statusId": 1})))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "X");
    assert_eq!(updated["content"], "corpo");
    assert_eq!(updated["statusId"], 1);
    Ok(())
}

#[tokio::test]
async fn updating_missing_blog_is_404() -> Result<(), String> {
    let app = TestApp::seeded().await?;
    let (status, body) = app
        .request(Method::PUT, "/blogs/12345", Some(json!({"title": "X"})))
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Blog not found");
    Ok(())
}

#[tokio::test]
async fn updating_missing_blog_with_unknown_status_is_404() -> Result<(), String> {
    let app = TestApp::seeded().await?;
    let (status, body) = app
        .request(Method::PUT, "/blogs/999", Some(json!({"statusId": 42})))
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Blog not found"}));
    Ok(())
}

#[tokio::test]
async fn updating_existing_blog_to_unknown_status_fails_in_the_store() -> Result<(), String> {
    let app = TestApp::seeded().await?;
    let created = app.create_blog("t", "c", 1).await?;
    let id = created["id"].as_i64().ok_or("no id")?;
    let (status, body) = app
        .request(Method::PUT, &format!("/blogs/{id}"), Some(json!({"statusId": 42})))
        .await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap_or_default().contains("foreign key"));
    let (_, fetched) = app.request(Method::GET, &format!("/blogs/{id}"), None).await?;
    assert_eq!(fetched["statusId"], 1);
    Ok(())
}

#[tokio::test]
async fn mistyped_body_is_reported_as_json_error() -> Result<(), String> {
    let app = TestApp::seeded().await?;
    let (status, body) = app
        .request(Method::POST, "/blogs", Some(json!({"title": 5, "content": "c", "statusId": 1})))
        .await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
    assert_eq!(app.store.blog_count().map_err(|e| e.to_string())?, 0);

    let (status, body) = app
        .send_raw(Method::POST, "/status", Some("application/json"), "{\"label\":")
        .await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
    Ok(())
}

#[tokio::test]
async fn body_without_json_content_type_is_reported_as_json_error() -> Result<(), String> {
    let app = TestApp::seeded().await?;
    let payload = r#"{"title": "t", "content": "c", "statusId": 1}"#;
    let (status, body) = app.send_raw(Method::POST, "/blogs", None, payload).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap_or_default().contains("Content-Type"));

    let (status, body) = app.send_raw(Method::PUT, "/blogs/1", Some("text/plain"), payload).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap_or_default().contains("Content-Type"));
    assert_eq!(app.store.blog_count().map_err(|e| e.to_string())?, 0);
    Ok(())
}

#[tokio::test]
async fn deleting_missing_blog_is_404_and_changes_nothing() -> Result<(), String> {
    let app = TestApp::seeded().await?;
    app.create_blog("fica", "aqui", 1).await?;
    let (status, body) = app.request(Method::DELETE, "/blogs/99999", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Blog not found");
    assert_eq!(app.store.blog_count().map_err(|e| e.to_string())?, 1);
    Ok(())
}

#[tokio::test]
async fn delete_removes_the_row() -> Result<(), String> {
    let app = TestApp::seeded().await?;
    let created = app.create_blog("vai", "embora", 1).await?;
    let id = created["id"].as_i64().ok_or("no id")?;
    let (status, body) = app.request(Method::DELETE, &format!("/blogs/{id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Blog deleted"}));
    let (status, _) = app.request(Method::GET, &format!("/blogs/{id}"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn blog_with_unknown_status_fails_in_the_store() -> Result<(), String> {
    let app = TestApp::seeded().await?;
    let (status, body) = app
        .request(Method::POST, "/blogs", Some(json!({"title": "t", "content": "c", "statusId": 77})))
        .await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap_or_default().contains("foreign key"));
    Ok(())
}

#[tokio::test]
async fn published_listing_has_only_status_one_in_reduced_shape() -> Result<(), String> {
    let app = TestApp::seeded().await?;
    app.create_blog("Publicado A", "um", 1).await?;
    app.create_blog("Rascunho", "dois", 2).await?;
    app.create_blog("Publicado B", "tres", 1).await?;

    let (status, body) = app.request(Method::GET, "/blog-alunos", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 3]);
    let first = body[0].as_object().ok_or("projection is not an object")?;
    let mut keys: Vec<&str> = first.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["createdDateTime", "id", "titulo", "updatedDateTime"]);
    assert_eq!(first["titulo"], "Publicado A");
    Ok(())
}

#[tokio::test]
async fn search_matches_title_case_insensitively() -> Result<(), String> {
    let app = TestApp::seeded().await?;
    app.create_blog("ABCdef", "primeiro", 1).await?;
    app.create_blog("xyz", "abc no corpo", 1).await?;
    app.create_blog("abc rascunho", "nao publicado", 2).await?;

    let (status, body) = app.request(Method::GET, "/blog-alunos/busca?title=abc", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1]);

    let (_, body) = app.request(Method::GET, "/blog-alunos/busca?content=ABC", None).await?;
    assert_eq!(ids(&body), vec![2]);

    let (_, body) = app
        .request(Method::GET, "/blog-alunos/busca?title=ABC&content=primeiro", None)
        .await?;
    assert_eq!(ids(&body), vec![1]);

    let (_, body) = app
        .request(Method::GET, "/blog-alunos/busca?title=abc&content=corpo", None)
        .await?;
    assert_eq!(ids(&body), Vec::<i64>::new());
    Ok(())
}

#[tokio::test]
async fn search_without_filters_equals_listing() -> Result<(), String> {
    let app = TestApp::seeded().await?;
    app.create_blog("um", "a", 1).await?;
    app.create_blog("dois", "b", 2).await?;
    app.create_blog("tres", "c", 1).await?;

    let (_, listing) = app.request(Method::GET, "/blog-alunos", None).await?;
    let (status, search) = app.request(Method::GET, "/blog-alunos/busca", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing, search);
    let (_, empty_terms) = app.request(Method::GET, "/blog-alunos/busca?title=&content=", None).await?;
    assert_eq!(listing, empty_terms);
    Ok(())
}

#[tokio::test]
async fn search_terms_match_wildcards_literally() -> Result<(), String> {
    let app = TestApp::seeded().await?;
    app.create_blog("100% rust", "a", 1).await?;
    app.create_blog("1000 rust", "b", 1).await?;
    app.create_blog("snake_case", "c", 1).await?;
    app.create_blog("snakeXcase", "d", 1).await?;

    let (status, body) = app.request(Method::GET, "/blog-alunos/busca?title=0%25", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1]);

    let (_, body) = app.request(Method::GET, "/blog-alunos/busca?title=e_c", None).await?;
    assert_eq!(ids(&body), vec![3]);
    Ok(())
}
