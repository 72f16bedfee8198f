use utoipa::{Modify, OpenApi};

use crate::core::error::ErrorBody;
use crate::features::ads::{dtos as ads_dtos, handlers as ads_handlers};
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers, models as users_models};
use crate::shared::types::{Page, StatusOk};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Ads
        ads_handlers::list_ads,
        ads_handlers::get_ad,
        ads_handlers::create_ad,
        ads_handlers::update_ad,
        ads_handlers::delete_ad,
        ads_handlers::upload_image,
        // Categories
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Users
        users_handlers::list_users,
        users_handlers::get_user,
        users_handlers::create_user,
        users_handlers::update_user,
        users_handlers::delete_user,
    ),
    components(
        schemas(
            // Shared
            StatusOk,
            ErrorBody,
            // Ads
            ads_dtos::CreateAdDto,
            ads_dtos::UpdateAdDto,
            ads_dtos::AdListItemDto,
            ads_dtos::AdUpdatedDto,
            ads_dtos::AdUploadedDto,
            Page<ads_dtos::AdListItemDto>,
            // Categories
            categories_dtos::UpsertCategoryDto,
            categories_dtos::CategoryResponseDto,
            categories_dtos::CreatedCategoryDto,
            // Users
            users_models::UserRole,
            users_dtos::CreateUserDto,
            users_dtos::UpdateUserDto,
            users_dtos::UserListItemDto,
            users_dtos::UserResponseDto,
            Page<users_dtos::UserListItemDto>,
        )
    ),
    tags(
        (name = "ads", description = "Advertisement listings"),
        (name = "categories", description = "Ad categories"),
        (name = "users", description = "Users and their locations"),
    ),
    info(
        title = "Adboard API",
        version = "0.1.0",
        description = "API documentation for the classified ads service",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
