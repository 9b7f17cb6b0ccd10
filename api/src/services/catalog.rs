use sqlx::SqlitePool;
use tracing::info;

use super::canonical_id;
use crate::{
    db::ProductRepository,
    error::AppError,
    models::{Page, PageRequest, Product, ProductFields},
    AppState,
};

pub struct CatalogService<'a> {
    db: &'a SqlitePool,
}

impl<'a> CatalogService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { db: &state.db }
    }

    pub async fn list(
        &self,
        search: Option<&str>,
        request: PageRequest,
    ) -> Result<Page<Product>, AppError> {
        let repo = ProductRepository::new(self.db);

        let skip = i64::try_from(request.skip())
            .map_err(|_| AppError::BadRequest("Page is out of range".into()))?;
        let items = repo
            .list(search, i64::from(request.page_size), skip)
            .await?;
        let total = repo.count(search).await?;

        Ok(Page::new(items, request, u64::try_from(total).unwrap_or(0)))
    }

    /// Ids that are not well formed are reported as missing.
    pub async fn get(&self, id: &str) -> Result<Product, AppError> {
        let Some(id) = canonical_id(id) else {
            return Err(not_found());
        };

        ProductRepository::new(self.db)
            .get(&id)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn create(&self, fields: &ProductFields) -> Result<Product, AppError> {
        let product = ProductRepository::new(self.db).create(fields).await?;
        info!(product_id = %product.id, title = %product.title, "Product created");
        Ok(product)
    }

    pub async fn update(&self, id: &str, fields: &ProductFields) -> Result<Product, AppError> {
        let Some(id) = canonical_id(id) else {
            return Err(not_found());
        };

        let product = ProductRepository::new(self.db)
            .update(&id, fields)
            .await?
            .ok_or_else(not_found)?;
        info!(product_id = %product.id, "Product updated");
        Ok(product)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let Some(id) = canonical_id(id) else {
            return Err(not_found());
        };

        if !ProductRepository::new(self.db).delete(&id).await? {
            return Err(not_found());
        }
        info!(product_id = %id, "Product deleted");
        Ok(())
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Product not found".into())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::services::test_support;

    fn fields(n: usize) -> ProductFields {
        ProductFields {
            title: format!("Product {n}"),
            price: n as f64,
            description: format!("Description for product number {n}"),
            image: format!("https://cdn.example.com/{n}.png"),
        }
    }

    #[tokio::test]
    async fn pages_do_not_overlap() {
        let state = test_support::state().await;
        let catalog = CatalogService::new(&state);
        for n in 0..25 {
            catalog.create(&fields(n)).await.unwrap();
        }

        let first = catalog
            .list(None, PageRequest { page: 1, page_size: 10 })
            .await
            .unwrap();
        let second = catalog
            .list(None, PageRequest { page: 2, page_size: 10 })
            .await
            .unwrap();
        let third = catalog
            .list(None, PageRequest { page: 3, page_size: 10 })
            .await
            .unwrap();

        let first_ids: HashSet<_> = first.items.iter().map(|p| p.id.clone()).collect();
        assert!(second.items.iter().all(|p| !first_ids.contains(&p.id)));

        assert_eq!(first.total_count, 25);
        assert_eq!(first.total_pages, 3);
        assert!(first.has_more);
        assert!(second.has_more);
        assert_eq!(third.items.len(), 5);
        assert!(!third.has_more);

        // newest first
        assert_eq!(first.items[0].title, "Product 24");
        assert_eq!(third.items[4].title, "Product 0");
    }

    #[tokio::test]
    async fn malformed_ids_are_not_found() {
        let state = test_support::state().await;
        let catalog = CatalogService::new(&state);

        for result in [
            catalog.get("not-an-id").await.map(|_| ()),
            catalog.update("not-an-id", &fields(1)).await.map(|_| ()),
            catalog.delete("not-an-id").await,
        ] {
            assert!(matches!(result, Err(AppError::NotFound(_))));
        }
    }

    #[tokio::test]
    async fn update_overwrites_fields_and_refreshes_timestamp() {
        let state = test_support::state().await;
        let catalog = CatalogService::new(&state);

        let created = catalog.create(&fields(1)).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let changes = ProductFields {
            title: "Renamed product".into(),
            price: 42.0,
            ..fields(1)
        };
        let updated = catalog.update(&created.id, &changes).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Renamed product");
        assert_eq!(updated.price, 42.0);
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.image, created.image);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);

        assert_eq!(catalog.get(&created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn uppercase_ids_resolve() {
        let state = test_support::state().await;
        let catalog = CatalogService::new(&state);

        let created = catalog.create(&fields(1)).await.unwrap();
        let fetched = catalog.get(&created.id.to_uppercase()).await.unwrap();
        assert_eq!(fetched.id, created.id);
    }
}
