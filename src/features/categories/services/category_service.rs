use sqlx::SqlitePool;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    CategoryResponseDto, CreatedCategoryDto, UpsertCategoryDto,
};
use crate::features::categories::models::Category;

/// Service for category operations
pub struct CategoryService {
    pool: SqlitePool,
}

impl CategoryService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all categories ordered by name
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name
            FROM categories
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// Get category by id
    pub async fn get(&self, id: i64) -> Result<CategoryResponseDto> {
        let category = self.fetch(id).await?;
        Ok(category.into())
    }

    /// Create a new category
    pub async fn create(&self, dto: UpsertCategoryDto) -> Result<CreatedCategoryDto> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name)
            VALUES (?)
            RETURNING id, name
            "#,
        )
        .bind(&dto.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create category: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Category created: id={}, name={}", category.id, category.name);

        Ok(category.into())
    }

    /// Rename a category
    pub async fn update(&self, id: i64, dto: UpsertCategoryDto) -> Result<CategoryResponseDto> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = ?
            WHERE id = ?
            RETURNING id, name
            "#,
        )
        .bind(&dto.name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update category: {:?}", e);
            AppError::Database(e)
        })?;

        category
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    /// Delete a category; its ads go with it (cascade)
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete category: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }

        tracing::info!("Category deleted: id={}", id);

        Ok(())
    }

    async fn fetch(&self, id: i64) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name
            FROM categories
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category: {:?}", e);
            AppError::Database(e)
        })?;

        category.ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{insert_ad, insert_category, insert_user, test_pool};

    #[tokio::test]
    async fn create_then_get_returns_identical_name() {
        let service = CategoryService::new(test_pool().await);

        let created = service
            .create(UpsertCategoryDto {
                name: "Electronics".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.text, "Electronics");

        let fetched = service.get(created.id).await.unwrap();
        assert_eq!(fetched.name, "Electronics");
    }

    #[tokio::test]
    async fn list_is_ordered_by_name() {
        let service = CategoryService::new(test_pool().await);

        for name in ["Транспорт", "Books", "Animals"] {
            service
                .create(UpsertCategoryDto {
                    name: name.to_string(),
                })
                .await
                .unwrap();
        }

        let names: Vec<String> = service.list().await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Animals", "Books", "Транспорт"]);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let service = CategoryService::new(test_pool().await);

        let err = service
            .update(
                999,
                UpsertCategoryDto {
                    name: "Nope".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_category() {
        let service = CategoryService::new(test_pool().await);

        let created = service
            .create(UpsertCategoryDto {
                name: "Temp".to_string(),
            })
            .await
            .unwrap();

        service.delete(created.id).await.unwrap();
        assert!(matches!(
            service.get(created.id).await.unwrap_err(),
            AppError::NotFound(_)
        ));

        // Deleting again reports not found
        assert!(matches!(
            service.delete(created.id).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn delete_cascades_to_ads() {
        let pool = test_pool().await;
        let category = insert_category(&pool, "Bikes").await;
        let author = insert_user(&pool, "seller").await;
        insert_ad(&pool, "one", author, category, 10, false).await;
        insert_ad(&pool, "two", author, category, 20, true).await;

        let service = CategoryService::new(pool.clone());
        service.delete(category).await.unwrap();

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ads")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, 0);
    }
}
