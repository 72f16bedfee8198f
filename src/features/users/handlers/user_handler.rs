use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::users::dtos::{
    CreateUserDto, UpdateUserDto, UserListItemDto, UserResponseDto,
};
use crate::features::users::services::UserService;
use crate::shared::types::{Page, PageQuery, StatusOk};

/// Paginated user listing with location names and published-ad counts
#[utoipa::path(
    get,
    path = "/users/",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of users", body = Page<UserListItemDto>),
    ),
    tag = "users"
)]
pub async fn list_users(
    State(service): State<Arc<UserService>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<UserListItemDto>>> {
    let page = service.list(query.page()).await?;
    Ok(Json(page))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/users/{id}/",
    params(
        ("id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponseDto),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn get_user(
    State(service): State<Arc<UserService>>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponseDto>> {
    let user = service.get(id).await?;
    Ok(Json(user))
}

/// Create a new user; `locations` carries names (get-or-create)
#[utoipa::path(
    post,
    path = "/users/create/",
    request_body = CreateUserDto,
    responses(
        (status = 200, description = "User created", body = UserResponseDto),
        (status = 400, description = "Malformed body or invalid fields")
    ),
    tag = "users"
)]
pub async fn create_user(
    State(service): State<Arc<UserService>>,
    AppJson(dto): AppJson<CreateUserDto>,
) -> Result<Json<UserResponseDto>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = service.create(dto).await?;
    Ok(Json(user))
}

/// Update a user; `locations` carries ids and adds to the user's set
#[utoipa::path(
    put,
    path = "/users/{id}/update/",
    params(
        ("id" = i64, Path, description = "User id")
    ),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = UserResponseDto),
        (status = 400, description = "Malformed body or invalid fields"),
        (status = 404, description = "User or referenced location not found")
    ),
    tag = "users"
)]
pub async fn update_user(
    State(service): State<Arc<UserService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateUserDto>,
) -> Result<Json<UserResponseDto>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = service.update(id, dto).await?;
    Ok(Json(user))
}

/// Delete a user and every ad they own
#[utoipa::path(
    delete,
    path = "/users/{id}/delete/",
    params(
        ("id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User deleted", body = StatusOk),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn delete_user(
    State(service): State<Arc<UserService>>,
    Path(id): Path<i64>,
) -> Result<Json<StatusOk>> {
    service.delete(id).await?;
    Ok(Json(StatusOk::ok()))
}
