use std::collections::HashMap;

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::core::error::{AppError, Result};
use crate::features::users::dtos::{
    CreateUserDto, UpdateUserDto, UserListItemDto, UserResponseDto,
};
use crate::features::users::models::{Location, User, UserWithAdCount};
use crate::shared::constants::{PLACEHOLDER_LAT, PLACEHOLDER_LNG};
use crate::shared::types::{Page, Paginator};

/// Service for user operations
pub struct UserService {
    pool: SqlitePool,
    paginator: Paginator,
}

impl UserService {
    pub fn new(pool: SqlitePool, page_size: i64) -> Self {
        Self {
            pool,
            paginator: Paginator::new(page_size),
        }
    }

    /// Paginated listing ordered by username, annotated with location names
    /// and the count of each user's *published* ads.
    pub async fn list(&self, requested_page: i64) -> Result<Page<UserListItemDto>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count users: {:?}", e);
                AppError::Database(e)
            })?;

        let page = self.paginator.clamp_page(requested_page, total);

        let rows = sqlx::query_as::<_, UserWithAdCount>(
            r#"
            SELECT u.id, u.first_name, u.last_name, u.username, u.role, u.age,
                   (SELECT COUNT(*) FROM ads a
                    WHERE a.author_id = u.id AND a.is_published = TRUE) AS total_ads
            FROM users u
            ORDER BY u.username ASC, u.id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(self.paginator.page_size())
        .bind(self.paginator.offset(page))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list users: {:?}", e);
            AppError::Database(e)
        })?;

        let ids: Vec<i64> = rows.iter().map(|u| u.id).collect();
        let mut names_by_user = self.location_names_for(&ids).await?;

        Ok(Page {
            items: rows
                .into_iter()
                .map(|user| {
                    let locations = names_by_user.remove(&user.id).unwrap_or_default();
                    UserListItemDto::from_row(user, locations)
                })
                .collect(),
            num_pages: self.paginator.num_pages(total),
            total,
        })
    }

    /// Get one user with their location names
    pub async fn get(&self, id: i64) -> Result<UserResponseDto> {
        let user = self.fetch(id).await?;
        let locations = self.location_names(id).await?;
        Ok(UserResponseDto::from_user(user, locations))
    }

    /// Create a user; `locations` holds names, resolved by get-or-create with
    /// placeholder coordinates. Runs in one transaction so a failed location
    /// attach never leaves a half-created user behind.
    pub async fn create(&self, dto: CreateUserDto) -> Result<UserResponseDto> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (first_name, last_name, username, password, role, age)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, first_name, last_name, username, password, role, age
            "#,
        )
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.username)
        .bind(&dto.password)
        .bind(dto.role)
        .bind(dto.age)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create user: {:?}", e);
            AppError::Database(e)
        })?;

        for name in &dto.locations {
            let location_id = get_or_create_location(&mut tx, name).await?;
            // INSERT OR IGNORE keeps set semantics for duplicate names
            sqlx::query("INSERT OR IGNORE INTO user_locations (user_id, location_id) VALUES (?, ?)")
                .bind(user.id)
                .bind(location_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!("User created: id={}, username={}", user.id, user.username);

        let locations = self.location_names(user.id).await?;
        Ok(UserResponseDto::from_user(user, locations))
    }

    /// Update a user; omitted fields keep their stored values. `locations`
    /// holds ids here (not names) and adds to the user's existing set; an
    /// unknown id fails the whole update.
    pub async fn update(&self, id: i64, dto: UpdateUserDto) -> Result<UserResponseDto> {
        let current = self.fetch(id).await?;

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query(
            r#"
            UPDATE users
            SET username = ?, password = ?, first_name = ?, last_name = ?, age = ?
            WHERE id = ?
            "#,
        )
        .bind(dto.username.as_deref().unwrap_or(&current.username))
        .bind(dto.password.as_deref().unwrap_or(&current.password))
        .bind(dto.first_name.as_deref().unwrap_or(&current.first_name))
        .bind(dto.last_name.as_deref().unwrap_or(&current.last_name))
        .bind(dto.age.unwrap_or(current.age))
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update user: {:?}", e);
            AppError::Database(e)
        })?;

        if let Some(location_ids) = &dto.locations {
            for &location_id in location_ids {
                let exists: bool =
                    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM locations WHERE id = ?)")
                        .bind(location_id)
                        .fetch_one(&mut *tx)
                        .await
                        .map_err(AppError::Database)?;

                if !exists {
                    // Wire-compatible message, grammar included
                    return Err(AppError::NotFound("Location does not found".to_string()));
                }

                sqlx::query(
                    "INSERT OR IGNORE INTO user_locations (user_id, location_id) VALUES (?, ?)",
                )
                .bind(id)
                .bind(location_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
            }
        }

        tx.commit().await.map_err(AppError::Database)?;

        let user = self.fetch(id).await?;
        let locations = self.location_names(id).await?;
        Ok(UserResponseDto::from_user(user, locations))
    }

    /// Delete a user; their ads and location memberships go with them
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete user: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }

        tracing::info!("User deleted: id={}", id);

        Ok(())
    }

    async fn fetch(&self, id: i64) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, username, password, role, age
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get user: {:?}", e);
            AppError::Database(e)
        })?;

        user.ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// Location names for one user, in attachment (id) order
    async fn location_names(&self, user_id: i64) -> Result<Vec<String>> {
        let locations = sqlx::query_as::<_, Location>(
            r#"
            SELECT l.id, l.name, l.lat, l.lng
            FROM user_locations ul
            JOIN locations l ON l.id = ul.location_id
            WHERE ul.user_id = ?
            ORDER BY l.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load locations for user {}: {:?}", user_id, e);
            AppError::Database(e)
        })?;

        Ok(locations.into_iter().map(|l| l.name).collect())
    }

    /// Location names for a whole page of users in one query (no N+1)
    async fn location_names_for(&self, user_ids: &[i64]) -> Result<HashMap<i64, Vec<String>>> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            r#"
            SELECT ul.user_id, l.name
            FROM user_locations ul
            JOIN locations l ON l.id = ul.location_id
            WHERE ul.user_id IN (
            "#,
        );
        let mut separated = builder.separated(", ");
        for id in user_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY l.id");

        let rows: Vec<(i64, String)> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to load locations for user page: {:?}", e);
                AppError::Database(e)
            })?;

        let mut by_user: HashMap<i64, Vec<String>> = HashMap::new();
        for (user_id, name) in rows {
            by_user.entry(user_id).or_default().push(name);
        }

        Ok(by_user)
    }
}

/// Look a location up by name, creating it with placeholder coordinates if
/// it does not exist yet.
async fn get_or_create_location(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    name: &str,
) -> Result<i64> {
    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM locations WHERE name = ? LIMIT 1")
        .bind(name)
        .fetch_optional(&mut **tx)
        .await
        .map_err(AppError::Database)?;

    if let Some(id) = existing {
        return Ok(id);
    }

    sqlx::query_scalar("INSERT INTO locations (name, lat, lng) VALUES (?, ?, ?) RETURNING id")
        .bind(name)
        .bind(PLACEHOLDER_LAT)
        .bind(PLACEHOLDER_LNG)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create location '{}': {:?}", name, e);
            AppError::Database(e)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::users::models::UserRole;
    use crate::shared::test_helpers::{
        insert_ad, insert_category, insert_location, insert_user, test_pool,
    };

    fn create_dto(username: &str, locations: Vec<&str>) -> CreateUserDto {
        CreateUserDto {
            username: username.to_string(),
            password: "secret".to_string(),
            first_name: "Anna".to_string(),
            last_name: "Ivanova".to_string(),
            role: UserRole::Member,
            age: 28,
            locations: locations.into_iter().map(String::from).collect(),
        }
    }

    #[tokio::test]
    async fn create_resolves_locations_by_get_or_create() {
        let pool = test_pool().await;
        insert_location(&pool, "Москва", 55.75, 37.61).await;
        let service = UserService::new(pool.clone(), 10);

        let user = service
            .create(create_dto("anna", vec!["Москва", "Тула"]))
            .await
            .unwrap();

        assert_eq!(user.locations, vec!["Москва", "Тула"]);

        // Existing location reused, not duplicated
        let moscow_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM locations WHERE name = 'Москва'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(moscow_count, 1);

        // New location got placeholder coordinates
        let (lat, lng): (f64, f64) =
            sqlx::query_as("SELECT lat, lng FROM locations WHERE name = 'Тула'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(lat, PLACEHOLDER_LAT);
        assert_eq!(lng, PLACEHOLDER_LNG);
    }

    #[tokio::test]
    async fn duplicate_location_names_collapse_to_one_membership() {
        let pool = test_pool().await;
        let service = UserService::new(pool.clone(), 10);

        let user = service
            .create(create_dto("anna", vec!["CityA", "CityA"]))
            .await
            .unwrap();
        assert_eq!(user.locations, vec!["CityA"]);

        let memberships: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_locations")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(memberships, 1);
    }

    #[tokio::test]
    async fn list_orders_by_username_and_counts_published_only() {
        let pool = test_pool().await;
        let category = insert_category(&pool, "Misc").await;
        let bob = insert_user(&pool, "bob").await;
        insert_user(&pool, "alice").await;

        insert_ad(&pool, "live", bob, category, 10, true).await;
        insert_ad(&pool, "draft", bob, category, 20, false).await;
        insert_ad(&pool, "another live", bob, category, 30, true).await;

        let service = UserService::new(pool, 10);
        let page = service.list(1).await.unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(page.items[0].username, "alice");
        assert_eq!(page.items[0].total_ads, 0);
        assert_eq!(page.items[1].username, "bob");
        assert_eq!(page.items[1].total_ads, 2);
    }

    #[tokio::test]
    async fn list_clamps_out_of_range_page() {
        let pool = test_pool().await;
        for i in 0..5 {
            insert_user(&pool, &format!("user{}", i)).await;
        }

        let service = UserService::new(pool, 2);
        let last = service.list(3).await.unwrap();
        let beyond = service.list(50).await.unwrap();

        assert_eq!(last.num_pages, 3);
        assert_eq!(last.items.len(), 1);
        assert_eq!(
            last.items[0].username,
            beyond.items[0].username
        );
    }

    #[tokio::test]
    async fn update_with_unknown_location_id_fails_with_exact_message() {
        let pool = test_pool().await;
        let id = insert_user(&pool, "anna").await;
        let service = UserService::new(pool, 10);

        let err = service
            .update(
                id,
                UpdateUserDto {
                    locations: Some(vec![777]),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        match err {
            AppError::NotFound(msg) => assert_eq!(msg, "Location does not found"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn update_merges_and_adds_locations_by_id() {
        let pool = test_pool().await;
        let user_id = insert_user(&pool, "anna").await;
        let location_id = insert_location(&pool, "Казань", 55.79, 49.12).await;
        let service = UserService::new(pool, 10);

        let updated = service
            .update(
                user_id,
                UpdateUserDto {
                    first_name: Some("Anya".to_string()),
                    locations: Some(vec![location_id]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.first_name, "Anya");
        assert_eq!(updated.username, "anna"); // untouched
        assert_eq!(updated.locations, vec!["Казань"]);
    }

    #[tokio::test]
    async fn delete_cascades_to_ads() {
        let pool = test_pool().await;
        let category = insert_category(&pool, "Misc").await;
        let user_id = insert_user(&pool, "anna").await;
        insert_ad(&pool, "one", user_id, category, 10, true).await;
        insert_ad(&pool, "two", user_id, category, 20, false).await;

        let service = UserService::new(pool.clone(), 10);
        service.delete(user_id).await.unwrap();

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ads")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, 0);
    }
}
