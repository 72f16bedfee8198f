use std::sync::Arc;

use sqlx::SqlitePool;

use crate::core::error::{AppError, Result};
use crate::features::ads::dtos::{
    AdListItemDto, AdUpdatedDto, AdUploadedDto, CreateAdDto, UpdateAdDto,
};
use crate::features::ads::models::{Ad, AdWithRelations};
use crate::modules::storage::MediaStore;
use crate::shared::types::{Page, Paginator};

/// Ad row joined with author username and category name
const SELECT_JOINED: &str = r#"
    SELECT a.id, a.name, a.author_id, u.username AS author, a.price,
           a.description, a.is_published, a.image, a.category_id, c.name AS category
    FROM ads a
    JOIN users u ON u.id = a.author_id
    JOIN categories c ON c.id = a.category_id
"#;

/// Service for advertisement operations
pub struct AdService {
    pool: SqlitePool,
    paginator: Paginator,
    media: Arc<MediaStore>,
}

impl AdService {
    pub fn new(pool: SqlitePool, page_size: i64, media: Arc<MediaStore>) -> Self {
        Self {
            pool,
            paginator: Paginator::new(page_size),
            media,
        }
    }

    /// Paginated listing ordered by price descending, id ascending on ties.
    ///
    /// An out-of-range page clamps to the last valid page.
    pub async fn list(&self, requested_page: i64) -> Result<Page<AdListItemDto>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ads")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count ads: {:?}", e);
                AppError::Database(e)
            })?;

        let page = self.paginator.clamp_page(requested_page, total);

        let rows = sqlx::query_as::<_, AdWithRelations>(&format!(
            "{} ORDER BY a.price DESC, a.id ASC LIMIT ? OFFSET ?",
            SELECT_JOINED
        ))
        .bind(self.paginator.page_size())
        .bind(self.paginator.offset(page))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list ads: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(Page {
            items: rows.into_iter().map(|ad| ad.into()).collect(),
            num_pages: self.paginator.num_pages(total),
            total,
        })
    }

    /// Get one ad with its relations
    pub async fn get(&self, id: i64) -> Result<AdListItemDto> {
        let ad = self.fetch_joined(id).await?;
        Ok(ad.into())
    }

    /// Create a new ad
    pub async fn create(&self, dto: CreateAdDto) -> Result<AdListItemDto> {
        self.ensure_author_exists(dto.author_id).await?;
        self.ensure_category_exists(dto.category_id).await?;

        let ad = sqlx::query_as::<_, Ad>(
            r#"
            INSERT INTO ads (name, author_id, price, description, is_published, image, category_id)
            VALUES (?, ?, ?, ?, FALSE, ?, ?)
            RETURNING id, name, author_id, price, description, is_published, image, category_id
            "#,
        )
        .bind(&dto.name)
        .bind(dto.author_id)
        .bind(dto.price)
        .bind(&dto.description)
        .bind(&dto.image)
        .bind(dto.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create ad: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Ad created: id={}, name={}", ad.id, ad.name);

        let joined = self.fetch_joined(ad.id).await?;
        Ok(joined.into())
    }

    /// Update an ad; omitted fields keep their stored values
    pub async fn update(&self, id: i64, dto: UpdateAdDto) -> Result<AdUpdatedDto> {
        let current = self.fetch(id).await?;

        if let Some(author_id) = dto.author_id {
            self.ensure_author_exists(author_id).await?;
        }
        if let Some(category_id) = dto.category_id {
            self.ensure_category_exists(category_id).await?;
        }

        sqlx::query(
            r#"
            UPDATE ads
            SET name = ?, price = ?, description = ?, author_id = ?, category_id = ?
            WHERE id = ?
            "#,
        )
        .bind(dto.name.unwrap_or(current.name))
        .bind(dto.price.unwrap_or(current.price))
        .bind(dto.description.unwrap_or(current.description))
        .bind(dto.author_id.unwrap_or(current.author_id))
        .bind(dto.category_id.unwrap_or(current.category_id))
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update ad: {:?}", e);
            AppError::Database(e)
        })?;

        let joined = self.fetch_joined(id).await?;
        Ok(joined.into())
    }

    /// Delete an ad
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM ads WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete ad: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Ad {} not found", id)));
        }

        tracing::info!("Ad deleted: id={}", id);

        Ok(())
    }

    /// Store an image payload and attach it to an existing ad
    pub async fn upload_image(
        &self,
        id: i64,
        file_name: &str,
        data: &[u8],
    ) -> Result<AdUploadedDto> {
        // Ad must exist before anything hits the disk
        self.fetch(id).await?;

        let url = self.media.save_image(file_name, data).await.map_err(|e| {
            tracing::error!("Failed to store image for ad {}: {:?}", id, e);
            AppError::BadRequest("Wrong data".to_string())
        })?;

        sqlx::query("UPDATE ads SET image = ? WHERE id = ?")
            .bind(&url)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to attach image to ad {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        tracing::info!("Ad image updated: id={}, image={}", id, url);

        let joined = self.fetch_joined(id).await?;
        Ok(joined.into())
    }

    async fn fetch(&self, id: i64) -> Result<Ad> {
        let ad = sqlx::query_as::<_, Ad>(
            r#"
            SELECT id, name, author_id, price, description, is_published, image, category_id
            FROM ads
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get ad: {:?}", e);
            AppError::Database(e)
        })?;

        ad.ok_or_else(|| AppError::NotFound(format!("Ad {} not found", id)))
    }

    async fn fetch_joined(&self, id: i64) -> Result<AdWithRelations> {
        let ad = sqlx::query_as::<_, AdWithRelations>(&format!("{} WHERE a.id = ?", SELECT_JOINED))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get ad: {:?}", e);
                AppError::Database(e)
            })?;

        ad.ok_or_else(|| AppError::NotFound(format!("Ad {} not found", id)))
    }

    async fn ensure_author_exists(&self, author_id: i64) -> Result<()> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)")
            .bind(author_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if exists {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("User {} not found", author_id)))
        }
    }

    async fn ensure_category_exists(&self, category_id: i64) -> Result<()> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE id = ?)")
                .bind(category_id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        if exists {
            Ok(())
        } else {
            Err(AppError::NotFound(format!(
                "Category {} not found",
                category_id
            )))
        }
    }
}
