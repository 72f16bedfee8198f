use sqlx::FromRow;

/// Database model for advertisement
#[derive(Debug, Clone, FromRow)]
pub struct Ad {
    pub id: i64,
    pub name: String,
    pub author_id: i64,
    pub price: i64,
    pub description: String,
    pub is_published: bool,
    pub image: Option<String>,
    pub category_id: i64,
}

/// Ad joined with its author's username and category name.
///
/// Produced by a single joined query so listings never do per-row lookups.
#[derive(Debug, Clone, FromRow)]
pub struct AdWithRelations {
    pub id: i64,
    pub name: String,
    pub author_id: i64,
    pub author: String,
    pub price: i64,
    pub description: String,
    pub is_published: bool,
    pub image: Option<String>,
    pub category_id: i64,
    pub category: String,
}
