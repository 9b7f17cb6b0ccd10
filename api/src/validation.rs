//! Field-level request validation.
//!
//! Checks accumulate into a [`Validator`] so a single response can report
//! every invalid field at once.

use serde_json::Value;
use url::Url;

use crate::error::{AppError, FieldError};

#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a non-empty JSON string and return it unchanged. Missing and
    /// `null` values count as absent; other JSON types are reported as type
    /// errors.
    pub fn required_string(
        &mut self,
        field: &'static str,
        value: Option<&Value>,
        message: &str,
    ) -> Option<String> {
        match value {
            Some(Value::String(text)) if !text.is_empty() => Some(text.clone()),
            None | Some(Value::Null | Value::String(_)) => {
                self.push(field, message);
                None
            }
            Some(_) => {
                self.push(field, &format!("{field} must be a string"));
                None
            }
        }
    }

    /// Like [`Validator::required_string`], but trims first so blank text
    /// counts as absent. Returns the trimmed text so further checks can run
    /// against it.
    pub fn required_text(
        &mut self,
        field: &'static str,
        value: Option<&Value>,
        message: &str,
    ) -> Option<String> {
        match value {
            Some(Value::String(text)) if !text.trim().is_empty() => {
                Some(text.trim().to_string())
            }
            Some(Value::String(_)) => {
                self.push(field, message);
                None
            }
            other => self.required_string(field, other, message),
        }
    }

    /// Require a finite number, sent either as a JSON number or as a numeric
    /// string.
    pub fn required_number(
        &mut self,
        field: &'static str,
        value: Option<&Value>,
        required: &str,
        invalid: &str,
    ) -> Option<f64> {
        let number = match value {
            None | Some(Value::Null) => {
                self.push(field, required);
                return None;
            }
            Some(Value::String(text)) if text.trim().is_empty() => {
                self.push(field, required);
                return None;
            }
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
            Some(_) => None,
        };

        match number.filter(|n| n.is_finite()) {
            Some(n) => Some(n),
            None => {
                self.push(field, invalid);
                None
            }
        }
    }

    /// Require a character count within `min..=max`.
    pub fn length(
        &mut self,
        field: &'static str,
        value: &str,
        min: usize,
        max: Option<usize>,
        message: &str,
    ) {
        let len = value.chars().count();
        if len < min || max.is_some_and(|max| len > max) {
            self.push(field, message);
        }
    }

    pub fn check(&mut self, field: &'static str, ok: bool, message: &str) {
        if !ok {
            self.push(field, message);
        }
    }

    pub fn push(&mut self, field: &'static str, message: &str) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn finish(self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.errors))
        }
    }
}

/// Lowercase and trim an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Structural email check: one `@`, non-empty local part, a dotted domain
/// and no whitespace.
pub fn is_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split('.')
            .filter(|label| !label.is_empty())
            .count()
            >= 2
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Absolute `http`/`https` URL with a host.
pub fn is_http_url(value: &str) -> bool {
    Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn required_text_trims_and_rejects_blank() {
        let mut v = Validator::new();
        assert_eq!(
            v.required_text("name", Some(&json!("  Ada  ")), "Name is required"),
            Some("Ada".to_string())
        );
        assert!(v.is_valid());

        assert_eq!(v.required_text("name", Some(&json!("   ")), "Name is required"), None);
        assert_eq!(v.required_text("email", None, "Email is required"), None);

        let Err(AppError::Validation(errors)) = v.finish() else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "name");
        assert_eq!(errors[1].field, "email");
    }

    #[test]
    fn wrong_json_types_become_field_errors() {
        let mut v = Validator::new();
        assert_eq!(v.required_text("title", Some(&json!(42)), "Title is required"), None);
        assert_eq!(v.required_string("password", Some(&json!(["x"])), "Password is required"), None);
        assert_eq!(v.required_text("image", Some(&Value::Null), "Image URL is required"), None);

        let Err(AppError::Validation(errors)) = v.finish() else {
            panic!("expected validation error");
        };
        assert_eq!(errors[0].message, "title must be a string");
        assert_eq!(errors[1].message, "password must be a string");
        assert_eq!(errors[2].message, "Image URL is required");
    }

    #[test]
    fn numbers_accept_numeric_strings() {
        let mut v = Validator::new();
        assert_eq!(v.required_number("price", Some(&json!(9.99)), "req", "bad"), Some(9.99));
        assert_eq!(v.required_number("price", Some(&json!(" 9.99 ")), "req", "bad"), Some(9.99));
        assert_eq!(v.required_number("price", Some(&json!(3)), "req", "bad"), Some(3.0));
        assert!(v.is_valid());

        assert_eq!(v.required_number("price", Some(&json!("abc")), "req", "bad"), None);
        assert_eq!(v.required_number("price", Some(&json!("NaN")), "req", "bad"), None);
        assert_eq!(v.required_number("price", Some(&json!(true)), "req", "bad"), None);
        assert_eq!(v.required_number("price", Some(&json!("")), "req", "bad"), None);

        let Err(AppError::Validation(errors)) = v.finish() else {
            panic!("expected validation error");
        };
        let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["bad", "bad", "bad", "req"]);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let mut v = Validator::new();
        v.length("title", "äöü", 3, Some(3), "bad");
        assert!(v.is_valid());
        v.length("title", "ab", 3, None, "too short");
        assert!(!v.is_valid());
    }

    #[test]
    fn email_checks() {
        assert!(is_email("user@example.com"));
        assert!(is_email("first.last+tag@mail.example.co.uk"));
        assert!(!is_email("no-at-symbol"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("user@localhost"));
        assert!(!is_email("user@exa mple.com"));
        assert!(!is_email("a@b@c.com"));
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }

    #[test]
    fn image_urls_must_be_http() {
        assert!(is_http_url("http://x/y.jpg"));
        assert!(is_http_url("https://cdn.example.com/mug.png"));
        assert!(!is_http_url("ftp://example.com/a.png"));
        assert!(!is_http_url("not a url"));
        assert!(!is_http_url("/relative/path.png"));
    }
}
