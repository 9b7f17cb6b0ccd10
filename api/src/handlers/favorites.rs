use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::AppError,
    extract::AppJson,
    middleware::CurrentUser,
    services::{canonical_id, FavoritesService},
    validation::Validator,
    AppState,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AddFavorite {
    pub product_id: Option<Value>,
}

impl AddFavorite {
    fn validate(self) -> Result<String, AppError> {
        let mut v = Validator::new();
        let id = v.required_text(
            "productId",
            self.product_id.as_ref(),
            "Product ID is required",
        );
        if let Some(id) = &id {
            v.check("productId", canonical_id(id).is_some(), "Invalid product ID");
        }
        v.finish()?;

        id.ok_or_else(|| AppError::Internal("validated favorite is incomplete".into()))
    }
}

pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<AppJson<Value>, AppError> {
    let favorites = FavoritesService::new(&state, &user.id).list().await?;
    Ok(AppJson(json!({ "favorites": favorites })))
}

pub async fn add(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppJson(payload): AppJson<AddFavorite>,
) -> Result<AppJson<Value>, AppError> {
    let product_id = payload.validate()?;
    let favorites = FavoritesService::new(&state, &user.id)
        .add(&product_id)
        .await?;

    Ok(AppJson(json!({
        "message": "Product added to favorites",
        "favorites": favorites,
    })))
}

pub async fn remove(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(product_id): Path<String>,
) -> Result<AppJson<Value>, AppError> {
    let favorites = FavoritesService::new(&state, &user.id)
        .remove(&product_id)
        .await?;

    Ok(AppJson(json!({
        "message": "Product removed from favorites",
        "favorites": favorites,
    })))
}
