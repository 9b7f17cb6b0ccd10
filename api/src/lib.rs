//! REST backend for a small marketplace: a product catalog anyone can
//! browse, bearer-token authentication, and per-user favorites.
//!
//! Routes are assembled in [`rest::router`]. Everything a handler needs
//! travels in [`AppState`]; there are no globals.

use sqlx::sqlite::SqlitePool;

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod rest;
pub mod services;
pub mod token;
pub mod validation;

use config::Config;
use token::TokenIssuer;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub tokens: TokenIssuer,
    pub max_page_size: u32,
}

impl AppState {
    pub fn new(db: SqlitePool, tokens: TokenIssuer, max_page_size: u32) -> Self {
        Self {
            db,
            tokens,
            max_page_size,
        }
    }

    pub fn from_config(config: &Config, db: SqlitePool) -> Self {
        let tokens = TokenIssuer::new(config.jwt_secret_bytes(), config.jwt_ttl);
        Self::new(db, tokens, config.max_page_size)
    }
}
