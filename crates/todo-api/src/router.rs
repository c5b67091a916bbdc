// ============================================================================
// Todo API - Router
// File: crates/todo-api/src/router.rs
// ============================================================================

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::warn;

use todo_shared::config::CorsSettings;

use crate::handlers::{health, pages, todos};
use crate::state::AppState;

/// Static files (compiled menu bundle, stylesheet) relative to the working directory
pub const ASSETS_DIR: &str = "static/assets";

fn cors_layer(settings: &CorsSettings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);

    let api = Router::new()
        .route("/todos", get(todos::list).post(todos::create))
        .route(
            "/todos/{id}",
            get(todos::show)
                .put(todos::replace)
                .patch(todos::patch)
                .delete(todos::destroy),
        );

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        // Static Assets
        .nest_service("/assets", ServeDir::new(ASSETS_DIR))
        // HTML pages
        .route("/", get(pages::root))
        .route("/todos", get(pages::index).post(pages::create))
        .route("/todos/new", get(pages::new_form))
        .route(
            "/todos/{id}",
            get(pages::show)
                .post(pages::update_or_destroy)
                .delete(pages::destroy),
        )
        .route("/todos/{id}/edit", get(pages::edit_form))
        // JSON API
        .nest("/api/v1", api)
        .with_state(state)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use todo_core::services::TodoService;
    use todo_infrastructure::InMemoryTodoRepository;
    use todo_shared::config::AppConfig;

    use crate::views::Views;

    fn app() -> Router {
        let config = AppConfig::from_builder(AppConfig::defaults().unwrap()).unwrap();
        let state = AppState {
            todos: TodoService::new(Arc::new(InMemoryTodoRepository::new())),
            views: Arc::new(Views::new().unwrap()),
            config,
        };
        build_router(state)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, String) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = app();

        let (status, headers, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("healthy"));
        assert!(headers.contains_key("x-request-id"));

        let (status, _, _) = send(&app, get("/health/ready")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_json_crud_flow() {
        let app = app();

        let (status, _, body) = send(
            &app,
            json_request(Method::POST, "/api/v1/todos", json!({ "title": "Buy milk", "done": false })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let created: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(created["success"], true);
        let id = created["data"]["id"].as_i64().unwrap();

        let (status, _, body) = send(
            &app,
            json_request(Method::PATCH, &format!("/api/v1/todos/{}", id), json!({ "done": true })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let patched: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(patched["data"]["title"], "Buy milk");
        assert_eq!(patched["data"]["done"], true);

        let (status, _, body) = send(
            &app,
            json_request(Method::PUT, &format!("/api/v1/todos/{}", id), json!({ "title": "Buy bread" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let replaced: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(replaced["data"]["title"], "Buy bread");
        assert_eq!(replaced["data"]["done"], Value::Null);

        let delete = Request::builder()
            .method(Method::DELETE)
            .uri(format!("/api/v1/todos/{}", id))
            .body(Body::empty())
            .unwrap();
        let (status, _, _) = send(&app, delete).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _, body) = send(&app, get(&format!("/api/v1/todos/{}", id))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let missing: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(missing["success"], false);
        assert_eq!(missing["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_json_validation_and_filter() {
        let app = app();

        let (status, _, body) = send(
            &app,
            json_request(Method::POST, "/api/v1/todos", json!({ "title": "x".repeat(256) })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.contains("VALIDATION_ERROR"));

        for (title, done) in [("a", true), ("b", false), ("c", true)] {
            let (status, _, _) = send(
                &app,
                json_request(Method::POST, "/api/v1/todos", json!({ "title": title, "done": done })),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, _, body) = send(&app, get("/api/v1/todos?done=true&per_page=1")).await;
        assert_eq!(status, StatusCode::OK);
        let page: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(page["data"]["total"], 2);
        assert_eq!(page["data"]["per_page"], 1);
        assert_eq!(page["data"]["items"].as_array().unwrap().len(), 1);
        assert_eq!(page["data"]["items"][0]["title"], "a");
    }

    #[tokio::test]
    async fn test_html_form_flow() {
        let app = app();

        let (status, headers, _) = send(&app, get("/")).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(headers[header::LOCATION], "/todos");

        let (status, headers, _) = send(&app, form_request("/todos", "title=Buy+milk&description=&done=1")).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(headers[header::LOCATION], "/todos/1");

        let (status, _, body) = send(&app, get("/todos")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"<tr data-todo-id="1">"#));
        assert!(body.contains(r#"data-menu-target="menu""#));

        let (status, _, body) = send(&app, get("/todos/1/edit")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"value="Buy milk""#));

        let (status, _, _) = send(&app, form_request("/todos/1", "_method=put&title=Buy+bread")).await;
        assert_eq!(status, StatusCode::SEE_OTHER);

        let (status, _, body) = send(&app, get("/todos/1")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Buy bread"));

        let (status, headers, _) = send(&app, form_request("/todos/1", "_method=delete")).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(headers[header::LOCATION], "/todos");

        let (status, _, body) = send(&app, get("/todos/1")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Back to todos"));
    }

    #[tokio::test]
    async fn test_html_rejects_long_title() {
        let app = app();
        let body = format!("title={}", "x".repeat(256));

        let (status, _, html) = send(&app, form_request("/todos", &body)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(html.contains("Title must be at most 255 characters"));
    }

    #[tokio::test]
    async fn test_html_delete_method() {
        let app = app();
        send(&app, form_request("/todos", "title=Temp")).await;

        let delete = Request::builder()
            .method(Method::DELETE)
            .uri("/todos/1")
            .body(Body::empty())
            .unwrap();
        let (status, headers, _) = send(&app, delete).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(headers[header::LOCATION], "/todos");

        let delete = Request::builder()
            .method(Method::DELETE)
            .uri("/todos/1")
            .body(Body::empty())
            .unwrap();
        let (status, _, _) = send(&app, delete).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
