use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::features::users::handlers;
use crate::features::users::services::UserService;

/// Create routes for the users feature
pub fn routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route("/users/", get(handlers::list_users))
        .route("/users/create/", post(handlers::create_user))
        .route("/users/{id}/", get(handlers::get_user))
        .route("/users/{id}/update/", put(handlers::update_user))
        .route("/users/{id}/delete/", delete(handlers::delete_user))
        .with_state(service)
}
