#[cfg(test)]
use std::str::FromStr;

#[cfg(test)]
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
#[cfg(test)]
use sqlx::SqlitePool;

/// In-memory SQLite pool with migrations applied.
///
/// A single connection keeps every query on the same in-memory database.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    pool
}

#[cfg(test)]
pub async fn insert_category(pool: &SqlitePool, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO categories (name) VALUES (?) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("failed to insert category")
}

#[cfg(test)]
pub async fn insert_user(pool: &SqlitePool, username: &str) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO users (first_name, last_name, username, password, role, age)
        VALUES ('Test', 'User', ?, 'secret', 'member', 30)
        RETURNING id
        "#,
    )
    .bind(username)
    .fetch_one(pool)
    .await
    .expect("failed to insert user")
}

#[cfg(test)]
pub async fn insert_location(pool: &SqlitePool, name: &str, lat: f64, lng: f64) -> i64 {
    sqlx::query_scalar("INSERT INTO locations (name, lat, lng) VALUES (?, ?, ?) RETURNING id")
        .bind(name)
        .bind(lat)
        .bind(lng)
        .fetch_one(pool)
        .await
        .expect("failed to insert location")
}

#[cfg(test)]
pub async fn insert_ad(
    pool: &SqlitePool,
    name: &str,
    author_id: i64,
    category_id: i64,
    price: i64,
    is_published: bool,
) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO ads (name, author_id, price, description, is_published, category_id)
        VALUES (?, ?, ?, 'test description', ?, ?)
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(author_id)
    .bind(price)
    .bind(is_published)
    .bind(category_id)
    .fetch_one(pool)
    .await
    .expect("failed to insert ad")
}
