use sqlx::SqlitePool;
use tracing::info;

use super::canonical_id;
use crate::{
    db::{FavoriteRepository, ProductRepository, RepositoryError},
    error::AppError,
    models::Product,
    AppState,
};

/// Favorites of one user. Every operation is scoped to `user_id`.
pub struct FavoritesService<'a> {
    db: &'a SqlitePool,
    user_id: &'a str,
}

impl<'a> FavoritesService<'a> {
    pub fn new(state: &'a AppState, user_id: &'a str) -> Self {
        Self {
            db: &state.db,
            user_id,
        }
    }

    pub async fn list(&self) -> Result<Vec<Product>, AppError> {
        Ok(FavoriteRepository::new(self.db)
            .products(self.user_id)
            .await?)
    }

    /// Append a product and return the updated reference list. Adding a
    /// product twice is a conflict, not a no-op.
    pub async fn add(&self, product_id: &str) -> Result<Vec<String>, AppError> {
        let not_found = || AppError::NotFound("Product not found".into());
        let product_id = canonical_id(product_id).ok_or_else(not_found)?;

        ProductRepository::new(self.db)
            .get(&product_id)
            .await?
            .ok_or_else(not_found)?;

        let favorites = FavoriteRepository::new(self.db);
        favorites
            .add(self.user_id, &product_id)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => {
                    AppError::Conflict("Product already in favorites".into())
                }
                other => other.into(),
            })?;

        info!(user_id = %self.user_id, product_id = %product_id, "Favorite added");
        Ok(favorites.product_ids(self.user_id).await?)
    }

    /// Remove a product and return the updated reference list. Only list
    /// membership is checked, so references to deleted products can still be
    /// removed.
    pub async fn remove(&self, product_id: &str) -> Result<Vec<String>, AppError> {
        let not_present = || AppError::Conflict("Product not in favorites".into());
        let product_id = canonical_id(product_id).ok_or_else(not_present)?;

        let favorites = FavoriteRepository::new(self.db);
        if !favorites.remove(self.user_id, &product_id).await? {
            return Err(not_present());
        }

        info!(user_id = %self.user_id, product_id = %product_id, "Favorite removed");
        Ok(favorites.product_ids(self.user_id).await?)
    }
}
