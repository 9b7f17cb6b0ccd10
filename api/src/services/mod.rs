//! Business operations sitting between the HTTP handlers and the
//! repositories. Each service borrows what it needs from [`AppState`].
//!
//! [`AppState`]: crate::AppState

pub mod auth;
pub mod catalog;
pub mod favorites;

pub use auth::AuthService;
pub use catalog::CatalogService;
pub use favorites::FavoritesService;

use uuid::Uuid;

/// Canonical (lowercase, hyphenated) form of an id, or `None` when the input
/// is not an id at all.
pub(crate) fn canonical_id(raw: &str) -> Option<String> {
    Uuid::parse_str(raw.trim()).ok().map(|id| id.to_string())
}
