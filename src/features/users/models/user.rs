use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Role a user holds; stored as lowercase text with a CHECK constraint.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Member,
    Moderator,
    Admin,
}

/// Database model for user
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password: String,
    pub role: UserRole,
    pub age: i64,
}

/// User row annotated with the count of their published ads
#[derive(Debug, Clone, FromRow)]
pub struct UserWithAdCount {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub role: UserRole,
    pub age: i64,
    pub total_ads: i64,
}
