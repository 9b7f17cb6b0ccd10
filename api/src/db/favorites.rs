use sqlx::SqlitePool;

use super::{map_unique_violation, RepositoryError};
use crate::models::Product;

pub struct FavoriteRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FavoriteRepository<'a> {
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// The raw favorite references in the order they were added, including
    /// ones whose product has since been deleted.
    pub async fn product_ids(&self, user_id: &str) -> Result<Vec<String>, RepositoryError> {
        let ids = sqlx::query_scalar::<_, String>(
            "SELECT product_id FROM favorites WHERE user_id = ? ORDER BY position",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(ids)
    }

    /// Favorites resolved to products, in the order they were added.
    /// References to deleted products are skipped.
    pub async fn products(&self, user_id: &str) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT p.id, p.title, p.price, p.description, p.image, p.created_at, p.updated_at
             FROM favorites f
             JOIN products p ON p.id = f.product_id
             WHERE f.user_id = ?
             ORDER BY f.position",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the pair already exists.
    pub async fn add(&self, user_id: &str, product_id: &str) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO favorites (user_id, product_id) VALUES (?, ?)")
            .bind(user_id)
            .bind(product_id)
            .execute(self.pool)
            .await
            .map_err(|e| map_unique_violation(e, "product already in favorites"))?;

        Ok(())
    }

    /// Returns `true` if the reference existed and was removed.
    pub async fn remove(&self, user_id: &str, product_id: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = ? AND product_id = ?")
            .bind(user_id)
            .bind(product_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
