use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Create routes for the categories feature
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/categories/", get(handlers::list_categories))
        .route("/categories/create/", post(handlers::create_category))
        .route("/categories/{id}/", get(handlers::get_category))
        .route("/categories/{id}/update/", put(handlers::update_category))
        .route("/categories/{id}/delete/", delete(handlers::delete_category))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::test_pool;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    async fn test_server() -> TestServer {
        let service = Arc::new(CategoryService::new(test_pool().await));
        TestServer::new(routes(service)).unwrap()
    }

    #[tokio::test]
    async fn create_then_get_round_trip() {
        let server = test_server().await;

        let created = server
            .post("/categories/create/")
            .json(&json!({"name": "Electronics"}))
            .await;
        created.assert_status(StatusCode::CREATED);
        let body: Value = created.json();
        assert_eq!(body["text"], "Electronics");
        let id = body["id"].as_i64().unwrap();
        assert_eq!(id, 1);

        let fetched = server.get(&format!("/categories/{}/", id)).await;
        fetched.assert_status_ok();
        let body: Value = fetched.json();
        assert_eq!(body, json!({"id": id, "name": "Electronics"}));
    }

    #[tokio::test]
    async fn malformed_json_is_wrong_data() {
        let server = test_server().await;

        let response = server
            .post("/categories/create/")
            .text("{not json")
            .content_type("application/json")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Wrong data");
    }

    #[tokio::test]
    async fn update_and_delete() {
        let server = test_server().await;

        let created = server
            .post("/categories/create/")
            .json(&json!({"name": "Old"}))
            .await;
        let id = created.json::<Value>()["id"].as_i64().unwrap();

        let updated = server
            .put(&format!("/categories/{}/update/", id))
            .json(&json!({"name": "New"}))
            .await;
        updated.assert_status_ok();
        assert_eq!(updated.json::<Value>()["name"], "New");

        let deleted = server.delete(&format!("/categories/{}/delete/", id)).await;
        deleted.assert_status_ok();
        assert_eq!(deleted.json::<Value>()["status"], "ok");

        let missing = server.get(&format!("/categories/{}/", id)).await;
        missing.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn non_ascii_name_survives_unescaped() {
        let server = test_server().await;

        let created = server
            .post("/categories/create/")
            .json(&json!({"name": "Транспорт"}))
            .await;
        created.assert_status(StatusCode::CREATED);

        let listed = server.get("/categories/").await;
        let raw = listed.text();
        assert!(raw.contains("Транспорт"));
        assert!(!raw.contains("\\u"));
    }
}
