use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::users::models::{User, UserRole, UserWithAdCount};

/// Request DTO for creating a user.
///
/// `locations` carries location *names*; each is resolved by get-or-create
/// with placeholder coordinates.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(
        length(min = 1, max = 20, message = "Username must be 1-20 characters"),
        regex(
            path = "*crate::shared::validation::USERNAME_REGEX",
            message = "Username must start with letter or underscore and contain only alphanumeric characters and underscores"
        )
    )]
    pub username: String,

    #[validate(length(min = 1, max = 20, message = "Password must be 1-20 characters"))]
    pub password: String,

    #[validate(length(max = 20, message = "First name must not exceed 20 characters"))]
    pub first_name: String,

    #[validate(length(max = 20, message = "Last name must not exceed 20 characters"))]
    pub last_name: String,

    #[serde(default)]
    pub role: UserRole,

    #[validate(range(min = 0, message = "Age must be non-negative"))]
    pub age: i64,

    /// Location names (get-or-create)
    pub locations: Vec<String>,
}

/// Request DTO for updating a user.
///
/// Omitted fields keep their stored values. `locations` carries location
/// *ids* (unlike create); the listed locations are added to the user's set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(
        length(min = 1, max = 20, message = "Username must be 1-20 characters"),
        regex(
            path = "*crate::shared::validation::USERNAME_REGEX",
            message = "Username must start with letter or underscore and contain only alphanumeric characters and underscores"
        )
    )]
    pub username: Option<String>,

    #[validate(length(min = 1, max = 20, message = "Password must be 1-20 characters"))]
    pub password: Option<String>,

    #[validate(length(max = 20, message = "First name must not exceed 20 characters"))]
    pub first_name: Option<String>,

    #[validate(length(max = 20, message = "Last name must not exceed 20 characters"))]
    pub last_name: Option<String>,

    #[validate(range(min = 0, message = "Age must be non-negative"))]
    pub age: Option<i64>,

    /// Location ids to add to the user's set
    pub locations: Option<Vec<i64>>,
}

/// Response DTO for user list items
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserListItemDto {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub age: i64,
    /// Names of the user's locations
    pub locations: Vec<String>,
    /// Count of this user's *published* ads
    pub total_ads: i64,
}

impl UserListItemDto {
    pub fn from_row(user: UserWithAdCount, locations: Vec<String>) -> Self {
        Self {
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            age: user.age,
            locations,
            total_ads: user.total_ads,
        }
    }
}

/// Response DTO for user detail/create/update
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponseDto {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub age: i64,
    pub locations: Vec<String>,
}

impl UserResponseDto {
    pub fn from_user(user: User, locations: Vec<String>) -> Self {
        Self {
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            age: user.age,
            locations,
        }
    }
}
