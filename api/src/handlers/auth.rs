use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    extract::AppJson,
    middleware::CurrentUser,
    models::user::{AuthResponse, CreateUser, LoginPayload},
    services::AuthService,
    AppState,
};

pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateUser>,
) -> Result<impl IntoResponse, AppError> {
    let new_user = payload.validate()?;
    let response = AuthService::new(&state).register(new_user).await?;

    Ok((StatusCode::CREATED, AppJson(response)))
}

pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginPayload>,
) -> Result<AppJson<AuthResponse>, AppError> {
    let credentials = payload.validate()?;
    let response = AuthService::new(&state).login(credentials).await?;

    Ok(AppJson(response))
}

pub async fn me(CurrentUser(user): CurrentUser) -> AppJson<Value> {
    AppJson(json!({ "user": user }))
}
