use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use tracing::debug;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::ads::dtos::{
    AdListItemDto, AdUpdatedDto, AdUploadedDto, CreateAdDto, UpdateAdDto,
};
use crate::features::ads::services::AdService;
use crate::shared::types::{Page, PageQuery, StatusOk};

/// Paginated ad listing, most expensive first
#[utoipa::path(
    get,
    path = "/ads/",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of ads", body = Page<AdListItemDto>),
    ),
    tag = "ads"
)]
pub async fn list_ads(
    State(service): State<Arc<AdService>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<AdListItemDto>>> {
    let page = service.list(query.page()).await?;
    Ok(Json(page))
}

/// Get an ad by id
#[utoipa::path(
    get,
    path = "/ads/{id}/",
    params(
        ("id" = i64, Path, description = "Ad id")
    ),
    responses(
        (status = 200, description = "Ad found", body = AdListItemDto),
        (status = 404, description = "Ad not found")
    ),
    tag = "ads"
)]
pub async fn get_ad(
    State(service): State<Arc<AdService>>,
    Path(id): Path<i64>,
) -> Result<Json<AdListItemDto>> {
    let ad = service.get(id).await?;
    Ok(Json(ad))
}

/// Create a new ad
#[utoipa::path(
    post,
    path = "/ads/create/",
    request_body = CreateAdDto,
    responses(
        (status = 200, description = "Ad created", body = AdListItemDto),
        (status = 400, description = "Malformed body or invalid fields"),
        (status = 404, description = "Referenced author or category not found")
    ),
    tag = "ads"
)]
pub async fn create_ad(
    State(service): State<Arc<AdService>>,
    AppJson(dto): AppJson<CreateAdDto>,
) -> Result<Json<AdListItemDto>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let ad = service.create(dto).await?;
    Ok(Json(ad))
}

/// Update an ad; omitted fields keep their stored values
#[utoipa::path(
    put,
    path = "/ads/{id}/update/",
    params(
        ("id" = i64, Path, description = "Ad id")
    ),
    request_body = UpdateAdDto,
    responses(
        (status = 200, description = "Ad updated", body = AdUpdatedDto),
        (status = 400, description = "Malformed body or invalid fields"),
        (status = 404, description = "Ad, author, or category not found")
    ),
    tag = "ads"
)]
pub async fn update_ad(
    State(service): State<Arc<AdService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateAdDto>,
) -> Result<Json<AdUpdatedDto>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let ad = service.update(id, dto).await?;
    Ok(Json(ad))
}

/// Delete an ad
#[utoipa::path(
    delete,
    path = "/ads/{id}/delete/",
    params(
        ("id" = i64, Path, description = "Ad id")
    ),
    responses(
        (status = 200, description = "Ad deleted", body = StatusOk),
        (status = 404, description = "Ad not found")
    ),
    tag = "ads"
)]
pub async fn delete_ad(
    State(service): State<Arc<AdService>>,
    Path(id): Path<i64>,
) -> Result<Json<StatusOk>> {
    service.delete(id).await?;
    Ok(Json(StatusOk::ok()))
}

/// Attach or replace the image of an existing ad
///
/// Accepts multipart/form-data with an `image` file field.
#[utoipa::path(
    post,
    path = "/ads/{id}/upload_image/",
    params(
        ("id" = i64, Path, description = "Ad id")
    ),
    responses(
        (status = 200, description = "Image stored", body = AdUploadedDto),
        (status = 400, description = "Missing or unreadable image field"),
        (status = 404, description = "Ad not found")
    ),
    tag = "ads"
)]
pub async fn upload_image(
    State(service): State<Arc<AdService>>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<Json<AdUploadedDto>> {
    let mut image: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest("Wrong data".to_string())
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "image" => {
                let file_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read image bytes: {}", e);
                    AppError::BadRequest("Wrong data".to_string())
                })?;

                image = Some((file_name, data.to_vec()));
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let (file_name, data) =
        image.ok_or_else(|| AppError::BadRequest("Wrong data".to_string()))?;

    let ad = service.upload_image(id, &file_name, &data).await?;
    Ok(Json(ad))
}
