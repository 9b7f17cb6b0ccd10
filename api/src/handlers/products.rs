use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    extract::{AppJson, AppQuery},
    middleware::CurrentUser,
    models::{ListQuery, Product, ProductPayload},
    services::CatalogService,
    AppState,
};

pub async fn list(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<AppJson<Value>, AppError> {
    let (search, request) = query.resolve(state.max_page_size)?;
    let page = CatalogService::new(&state)
        .list(search.as_deref(), request)
        .await?;

    Ok(AppJson(json!({
        "products": &page.items,
        "pagination": page.pagination(),
    })))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<AppJson<Product>, AppError> {
    let product = CatalogService::new(&state).get(&id).await?;
    Ok(AppJson(product))
}

pub async fn create(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    AppJson(payload): AppJson<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    let fields = payload.validate()?;
    let product = CatalogService::new(&state).create(&fields).await?;

    Ok((StatusCode::CREATED, AppJson(product)))
}

pub async fn update(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<String>,
    AppJson(payload): AppJson<ProductPayload>,
) -> Result<AppJson<Product>, AppError> {
    let fields = payload.validate()?;
    let product = CatalogService::new(&state).update(&id, &fields).await?;

    Ok(AppJson(product))
}

pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<String>,
) -> Result<AppJson<Value>, AppError> {
    CatalogService::new(&state).delete(&id).await?;
    Ok(AppJson(json!({ "message": "Product deleted successfully" })))
}
