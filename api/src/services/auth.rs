use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::{
    db::{RepositoryError, UserRepository},
    error::AppError,
    models::{
        user::{AuthResponse, Credentials, NewUser},
        User,
    },
    token::{TokenError, TokenIssuer},
    AppState,
};

pub struct AuthService<'a> {
    db: &'a SqlitePool,
    tokens: &'a TokenIssuer,
}

impl<'a> AuthService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self {
            db: &state.db,
            tokens: &state.tokens,
        }
    }

    pub async fn register(&self, new_user: NewUser) -> Result<AuthResponse, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(new_user.password.as_bytes(), &salt)?
            .to_string();

        let user = UserRepository::new(self.db)
            .create(&new_user.name, &new_user.email, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AppError::Conflict("User already exists".into()),
                other => other.into(),
            })?;

        info!(user_id = %user.id, "User registered");
        self.respond(user)
    }

    pub async fn login(&self, credentials: Credentials) -> Result<AuthResponse, AppError> {
        let user = UserRepository::new(self.db)
            .get_by_email(&credentials.email)
            .await?
            .ok_or_else(invalid_credentials)?;

        let parsed_hash = PasswordHash::new(&user.password_hash)?;
        Argon2::default()
            .verify_password(credentials.password.as_bytes(), &parsed_hash)
            .map_err(|_| invalid_credentials())?;

        debug!(user_id = %user.id, "User logged in");
        self.respond(user)
    }

    /// Resolve a bearer token to a live user.
    pub async fn authenticate(&self, token: &str) -> Result<User, AppError> {
        let user_id = self.tokens.verify(token).map_err(|e| match e {
            TokenError::Signing(_) => AppError::Internal(e.to_string()),
            _ => AppError::Unauthorized(e.to_string()),
        })?;

        UserRepository::new(self.db)
            .get_by_id(&user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found".into()))
    }

    fn respond(&self, user: User) -> Result<AuthResponse, AppError> {
        let token = self
            .tokens
            .issue(&user.id)
            .map_err(|e| AppError::Internal(e.to_string()))?;

        Ok(AuthResponse { token, user })
    }
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid credentials".into())
}
