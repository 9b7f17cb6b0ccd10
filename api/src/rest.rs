use std::time::Duration;

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::{delete, get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    extract::AppJson,
    handlers::{auth, favorites, products},
    AppState,
};

async fn health() -> AppJson<Value> {
    AppJson(json!({ "status": "ok" }))
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/", get(health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/:id",
            get(products::get)
                .put(products::update)
                .delete(products::delete),
        )
        .route("/favorites", get(favorites::list).post(favorites::add))
        .route("/favorites/:product_id", delete(favorites::remove))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
