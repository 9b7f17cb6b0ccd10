//! Bearer-token authentication gate.
//!
//! Protected handlers take a [`CurrentUser`] argument. Extraction reads
//! `Authorization: Bearer <token>`, verifies the token and loads the user it
//! names, rejecting the request with 401 at the first failure. Nothing is
//! cached: every request is verified and resolved again.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{error::AppError, models::User, services::AuthService, AppState};

/// The authenticated caller.
///
/// ```rust,ignore
/// async fn protected(CurrentUser(user): CurrentUser) -> String {
///     format!("Hello, {}!", user.name)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::Unauthorized("No token, authorization denied".into()))?;

        let state = AppState::from_ref(state);
        let user = AuthService::new(&state).authenticate(token).await?;

        Ok(Self(user))
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}
