use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::features::ads::handlers;
use crate::features::ads::services::AdService;

/// Create routes for the ads feature
pub fn routes(service: Arc<AdService>) -> Router {
    Router::new()
        .route("/ads/", get(handlers::list_ads))
        .route("/ads/create/", post(handlers::create_ad))
        .route("/ads/{id}/", get(handlers::get_ad))
        .route("/ads/{id}/update/", put(handlers::update_ad))
        .route("/ads/{id}/delete/", delete(handlers::delete_ad))
        .route("/ads/{id}/upload_image/", post(handlers::upload_image))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::MediaConfig;
    use crate::modules::storage::MediaStore;
    use crate::shared::test_helpers::{insert_ad, insert_category, insert_user, test_pool};
    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use sqlx::SqlitePool;
    use uuid::Uuid;

    async fn test_server() -> (TestServer, SqlitePool) {
        let pool = test_pool().await;
        let root = std::env::temp_dir().join(format!("adboard-ads-http-{}", Uuid::new_v4()));
        let media = Arc::new(MediaStore::new(MediaConfig {
            root: root.to_string_lossy().into_owned(),
            url_prefix: "/media".to_string(),
        }));
        let service = Arc::new(AdService::new(pool.clone(), 4, media));
        (TestServer::new(routes(service)).unwrap(), pool)
    }

    #[tokio::test]
    async fn listing_shape_and_order() {
        let (server, pool) = test_server().await;
        let author = insert_user(&pool, "maria").await;
        let category = insert_category(&pool, "Bikes").await;
        insert_ad(&pool, "cheap", author, category, 50, false).await;
        insert_ad(&pool, "Bike", author, category, 100, false).await;

        let response = server.get("/ads/").await;
        response.assert_status_ok();
        let body: Value = response.json();

        assert_eq!(body["total"], 2);
        assert_eq!(body["num_pages"], 1);
        let items = body["items"].as_array().unwrap();
        assert_eq!(items[0]["name"], "Bike");
        assert_eq!(items[0]["price"], 100);
        assert_eq!(items[0]["author"], "maria");
        assert_eq!(items[0]["category"], "Bikes");
        assert_eq!(items[1]["name"], "cheap");
    }

    #[tokio::test]
    async fn invalid_page_param_falls_back_to_first() {
        let (server, pool) = test_server().await;
        let author = insert_user(&pool, "maria").await;
        let category = insert_category(&pool, "Bikes").await;
        insert_ad(&pool, "only", author, category, 10, false).await;

        let response = server.get("/ads/").add_query_param("page", "notanumber").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["items"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_validates_and_resolves() {
        let (server, pool) = test_server().await;
        let author = insert_user(&pool, "maria").await;
        let category = insert_category(&pool, "Bikes").await;

        let created = server
            .post("/ads/create/")
            .json(&json!({
                "name": "Bike",
                "price": 100,
                "description": "d",
                "author_id": author,
                "category_id": category
            }))
            .await;
        created.assert_status_ok();
        let body: Value = created.json();
        assert_eq!(body["author"], "maria");
        assert_eq!(body["category"], "Bikes");

        // Negative price is rejected at write time
        let rejected = server
            .post("/ads/create/")
            .json(&json!({
                "name": "Bad",
                "price": -5,
                "description": "d",
                "author_id": author,
                "category_id": category
            }))
            .await;
        rejected.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_includes_is_published() {
        let (server, pool) = test_server().await;
        let author = insert_user(&pool, "maria").await;
        let category = insert_category(&pool, "Bikes").await;
        let id = insert_ad(&pool, "Bike", author, category, 100, true).await;

        let response = server
            .put(&format!("/ads/{}/update/", id))
            .json(&json!({"name": "Better bike"}))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["name"], "Better bike");
        assert_eq!(body["is_published"], true);
        assert_eq!(body["price"], 100);
    }

    #[tokio::test]
    async fn delete_returns_status_ok() {
        let (server, pool) = test_server().await;
        let author = insert_user(&pool, "maria").await;
        let category = insert_category(&pool, "Bikes").await;
        let id = insert_ad(&pool, "Bike", author, category, 100, false).await;

        let response = server.delete(&format!("/ads/{}/delete/", id)).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), json!({"status": "ok"}));

        let missing = server.get(&format!("/ads/{}/", id)).await;
        missing.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn upload_image_via_multipart() {
        let (server, pool) = test_server().await;
        let author = insert_user(&pool, "maria").await;
        let category = insert_category(&pool, "Bikes").await;
        let id = insert_ad(&pool, "Bike", author, category, 100, false).await;

        let form = MultipartForm::new().add_part(
            "image",
            Part::bytes(b"fake png".to_vec())
                .file_name("bike.png")
                .mime_type("image/png"),
        );

        let response = server
            .post(&format!("/ads/{}/upload_image/", id))
            .multipart(form)
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["id"], id);
        assert!(body["image"].as_str().unwrap().starts_with("/media/images/"));
    }

    #[tokio::test]
    async fn upload_without_image_field_is_wrong_data() {
        let (server, pool) = test_server().await;
        let author = insert_user(&pool, "maria").await;
        let category = insert_category(&pool, "Bikes").await;
        let id = insert_ad(&pool, "Bike", author, category, 100, false).await;

        let form = MultipartForm::new().add_text("other", "value");
        let response = server
            .post(&format!("/ads/{}/upload_image/", id))
            .multipart(form)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"], "Wrong data");
    }
}
