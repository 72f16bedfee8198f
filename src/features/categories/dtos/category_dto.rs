use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::categories::models::Category;

/// Request DTO for creating or renaming a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpsertCategoryDto {
    #[validate(length(min = 1, max = 30, message = "Name must be 1-30 characters"))]
    pub name: String,
}

/// Response DTO for category list/detail/update
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: i64,
    pub name: String,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
        }
    }
}

/// Response DTO for category creation.
///
/// The create endpoint historically answers with `text` instead of `name`;
/// clients depend on it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedCategoryDto {
    pub id: i64,
    pub text: String,
}

impl From<Category> for CreatedCategoryDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            text: c.name,
        }
    }
}
