use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::ads::models::AdWithRelations;

/// Request DTO for creating an ad
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAdDto {
    #[validate(length(min = 1, max = 60, message = "Name must be 1-60 characters"))]
    pub name: String,

    /// Price in whole units, never negative
    #[validate(range(min = 0, message = "Price must be non-negative"))]
    pub price: i64,

    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: String,

    /// Optional pre-existing image reference (uploads go through upload_image)
    pub image: Option<String>,

    pub author_id: i64,
    pub category_id: i64,
}

/// Request DTO for updating an ad.
///
/// Omitted fields keep their stored values (partial merge).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateAdDto {
    #[validate(length(min = 1, max = 60, message = "Name must be 1-60 characters"))]
    pub name: Option<String>,

    #[validate(range(min = 0, message = "Price must be non-negative"))]
    pub price: Option<i64>,

    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: Option<String>,

    pub author_id: Option<i64>,
    pub category_id: Option<i64>,
}

/// Response DTO for ad list items, detail, and create
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdListItemDto {
    pub name: String,
    pub price: i64,
    pub description: String,
    pub image: Option<String>,
    /// Author's username
    pub author: String,
    /// Category name
    pub category: String,
}

impl From<AdWithRelations> for AdListItemDto {
    fn from(ad: AdWithRelations) -> Self {
        Self {
            name: ad.name,
            price: ad.price,
            description: ad.description,
            image: ad.image,
            author: ad.author,
            category: ad.category,
        }
    }
}

/// Response DTO for ad update
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdUpdatedDto {
    pub id: i64,
    pub name: String,
    pub price: i64,
    pub description: String,
    pub author: String,
    pub is_published: bool,
    pub category: String,
    pub image: Option<String>,
}

impl From<AdWithRelations> for AdUpdatedDto {
    fn from(ad: AdWithRelations) -> Self {
        Self {
            id: ad.id,
            name: ad.name,
            price: ad.price,
            description: ad.description,
            author: ad.author,
            is_published: ad.is_published,
            category: ad.category,
            image: ad.image,
        }
    }
}

/// Response DTO for image upload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdUploadedDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub author_id: i64,
    pub author: String,
    pub is_published: bool,
    pub category_id: i64,
    pub category: String,
    pub image: Option<String>,
}

impl From<AdWithRelations> for AdUploadedDto {
    fn from(ad: AdWithRelations) -> Self {
        Self {
            id: ad.id,
            name: ad.name,
            description: ad.description,
            author_id: ad.author_id,
            author: ad.author,
            is_published: ad.is_published,
            category_id: ad.category_id,
            category: ad.category,
            image: ad.image,
        }
    }
}
