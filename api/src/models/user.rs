use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::AppError,
    validation::{is_email, normalize_email, Validator},
};

const MIN_NAME_LENGTH: usize = 2;
const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub exp: usize,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateUser {
    pub name: Option<Value>,
    pub email: Option<Value>,
    pub password: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginPayload {
    pub email: Option<Value>,
    pub password: Option<Value>,
}

/// A registration request that passed validation. The email is normalized.
#[derive(Debug)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

impl CreateUser {
    pub fn validate(self) -> Result<NewUser, AppError> {
        let mut v = Validator::new();

        let name = v.required_text("name", self.name.as_ref(), "Name is required");
        if let Some(name) = &name {
            v.length(
                "name",
                name,
                MIN_NAME_LENGTH,
                None,
                "Name must be at least 2 characters",
            );
        }

        let email = validate_email(&mut v, self.email.as_ref());

        let password =
            v.required_string("password", self.password.as_ref(), "Password is required");
        if let Some(password) = &password {
            v.length(
                "password",
                password,
                MIN_PASSWORD_LENGTH,
                None,
                "Password must be at least 6 characters",
            );
        }

        v.finish()?;

        match (name, email, password) {
            (Some(name), Some(email), Some(password)) => Ok(NewUser {
                name,
                email,
                password,
            }),
            _ => Err(AppError::Internal("validated registration is incomplete".into())),
        }
    }
}

impl LoginPayload {
    pub fn validate(self) -> Result<Credentials, AppError> {
        let mut v = Validator::new();

        let email = validate_email(&mut v, self.email.as_ref());
        let password =
            v.required_string("password", self.password.as_ref(), "Password is required");

        v.finish()?;

        match (email, password) {
            (Some(email), Some(password)) => Ok(Credentials { email, password }),
            _ => Err(AppError::Internal("validated login is incomplete".into())),
        }
    }
}

fn validate_email(v: &mut Validator, raw: Option<&Value>) -> Option<String> {
    let email = v.required_text("email", raw, "Email is required")?;
    let email = normalize_email(&email);
    if is_email(&email) {
        Some(email)
    } else {
        v.push("email", "Please provide a valid email");
        None
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn field_names(err: AppError) -> Vec<&'static str> {
        match err {
            AppError::Validation(errors) => errors.into_iter().map(|e| e.field).collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn registration_normalizes_email() {
        let user = CreateUser {
            name: Some(json!(" Ada Lovelace ")),
            email: Some(json!(" Ada@Example.com")),
            password: Some(json!("hunter22")),
        }
        .validate()
        .unwrap();

        assert_eq!(user.name, "Ada Lovelace");
        assert_eq!(user.email, "ada@example.com");
    }

    #[test]
    fn registration_reports_all_bad_fields() {
        let err = CreateUser {
            name: Some(json!("A")),
            email: Some(json!("nope")),
            password: Some(json!("123")),
        }
        .validate()
        .unwrap_err();

        assert_eq!(field_names(err), vec!["name", "email", "password"]);
    }

    #[test]
    fn empty_registration_reports_required_fields() {
        let err = CreateUser::default().validate().unwrap_err();
        assert_eq!(field_names(err), vec!["name", "email", "password"]);
    }

    #[test]
    fn login_requires_email_and_password() {
        let err = LoginPayload {
            email: Some(json!("ada@example.com")),
            password: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(field_names(err), vec!["password"]);
    }

    #[test]
    fn non_string_credentials_are_field_errors() {
        let payload: LoginPayload =
            serde_json::from_value(json!({ "email": ["ada@example.com"], "password": 123456 }))
                .unwrap();
        let err = payload.validate().unwrap_err();
        assert_eq!(field_names(err), vec!["email", "password"]);
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let user = User {
            id: "u1".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password_hash: "$argon2id$secret".into(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["_id"], "u1");
        assert!(json.get("id").is_none());
        assert_eq!(json["email"], "ada@example.com");
        assert!(json.get("createdAt").is_some());
    }
}
