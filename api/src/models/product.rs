use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::AppError,
    validation::{is_http_url, Validator},
};

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /products` and `PUT /products/:id`. Updates overwrite
/// every field, so both use the same shape. Fields stay untyped until
/// [`ProductPayload::validate`] so a wrong JSON type is reported per field;
/// `price` may arrive as a number or a numeric string.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ProductPayload {
    pub title: Option<Value>,
    pub price: Option<Value>,
    pub description: Option<Value>,
    pub image: Option<Value>,
}

/// Product fields that passed validation, trimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub image: String,
}

impl ProductPayload {
    pub fn validate(self) -> Result<ProductFields, AppError> {
        let mut v = Validator::new();

        let title = v.required_text("title", self.title.as_ref(), "Product title is required");
        if let Some(title) = &title {
            v.length(
                "title",
                title,
                3,
                Some(100),
                "Title must be between 3 and 100 characters",
            );
        }

        let price = v.required_number(
            "price",
            self.price.as_ref(),
            "Price is required",
            "Price must be a positive number",
        );
        if let Some(price) = price {
            v.check("price", price >= 0.0, "Price must be a positive number");
        }

        let description = v.required_text(
            "description",
            self.description.as_ref(),
            "Description is required",
        );
        if let Some(description) = &description {
            v.length(
                "description",
                description,
                10,
                Some(500),
                "Description must be between 10 and 500 characters",
            );
        }

        let image = v.required_text("image", self.image.as_ref(), "Image URL is required");
        if let Some(image) = &image {
            v.check("image", is_http_url(image), "Please provide a valid image URL");
        }

        v.finish()?;

        match (title, price, description, image) {
            (Some(title), Some(price), Some(description), Some(image)) => Ok(ProductFields {
                title,
                price,
                description,
                image,
            }),
            _ => Err(AppError::Internal("validated product is incomplete".into())),
        }
    }
}
