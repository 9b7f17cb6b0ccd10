use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::RepositoryError;
use crate::models::{Product, ProductFields};

const COLUMNS: &str = "id, title, price, description, image, created_at, updated_at";

// `?1` is the search term lowercased the same way as the `*_folded`
// columns, or NULL for no filter.
const SEARCH_FILTER: &str = "(?1 IS NULL
    OR instr(title_folded, ?1) > 0
    OR instr(description_folded, ?1) > 0)";

/// Case folding shared by stored text and search terms.
fn fold(text: &str) -> String {
    text.to_lowercase()
}

pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, fields: &ProductFields) -> Result<Product, RepositoryError> {
        let now = Utc::now();
        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products
                (id, title, price, description, image, title_folded, description_folded,
                 created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(&fields.title)
        .bind(fields.price)
        .bind(&fields.description)
        .bind(&fields.image)
        .bind(fold(&fields.title))
        .bind(fold(&fields.description))
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        Ok(product)
    }

    pub async fn get(&self, id: &str) -> Result<Option<Product>, RepositoryError> {
        let product =
            sqlx::query_as::<_, Product>(&format!("SELECT {COLUMNS} FROM products WHERE id = ?"))
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        Ok(product)
    }

    /// Overwrite every mutable field and refresh `updated_at`. Returns `None`
    /// when no product has this id.
    pub async fn update(
        &self,
        id: &str,
        fields: &ProductFields,
    ) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "UPDATE products
             SET title = ?, price = ?, description = ?, image = ?,
                 title_folded = ?, description_folded = ?, updated_at = ?
             WHERE id = ?
             RETURNING {COLUMNS}"
        ))
        .bind(&fields.title)
        .bind(fields.price)
        .bind(&fields.description)
        .bind(&fields.image)
        .bind(fold(&fields.title))
        .bind(fold(&fields.description))
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Returns `true` if a row was deleted.
    pub async fn delete(&self, id: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Newest first. Products created in the same instant keep insertion
    /// order (newest first) via the rowid.
    pub async fn list(
        &self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {COLUMNS} FROM products
             WHERE {SEARCH_FILTER}
             ORDER BY created_at DESC, rowid DESC
             LIMIT ?2 OFFSET ?3"
        ))
        .bind(search.map(fold))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    pub async fn count(&self, search: Option<&str>) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM products WHERE {SEARCH_FILTER}"
        ))
        .bind(search.map(fold))
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }
}
