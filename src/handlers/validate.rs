//! Field-level validation for account payloads, run before any store access.

use std::collections::HashMap;

use crate::error::ApiError;

use super::users::{RegisterRequest, UpdateRequest};

const USERNAME_MIN_LENGTH: usize = 6;

/// Validate a registration payload; all fields required
pub fn registration(body: &RegisterRequest) -> Result<(), ApiError> {
    let mut errors = HashMap::new();

    if let Err(msg) = check_username(&body.username) {
        errors.insert("Username".to_string(), msg);
    }
    if body.password.is_empty() {
        errors.insert("Password".to_string(), "Password is required".to_string());
    }
    if !is_valid_email(&body.email) {
        errors.insert("Email".to_string(), "Email is not valid".to_string());
    }

    finish(errors)
}

/// Validate a profile update payload; only present fields are checked
pub fn profile_update(body: &UpdateRequest) -> Result<(), ApiError> {
    let mut errors = HashMap::new();

    if let Some(username) = &body.username {
        if let Err(msg) = check_username(username) {
            errors.insert("Username".to_string(), msg);
        }
    }
    if let Some(password) = &body.password {
        if password.is_empty() {
            errors.insert("Password".to_string(), "Password is required".to_string());
        }
    }
    if let Some(email) = &body.email {
        if !is_valid_email(email) {
            errors.insert("Email".to_string(), "Email is not valid".to_string());
        }
    }

    finish(errors)
}

fn finish(errors: HashMap<String, String>) -> Result<(), ApiError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::unprocessable_entity("Validation failed", errors))
    }
}

fn check_username(username: &str) -> Result<(), String> {
    if username.len() < USERNAME_MIN_LENGTH {
        return Err(format!(
            "Username must be at least {} characters",
            USERNAME_MIN_LENGTH
        ));
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("Username has characters that are not allowed".to_string());
    }
    Ok(())
}

fn is_valid_email(email: &str) -> bool {
    let parts: Vec<&str> = email.split('@').collect();
    parts.len() == 2
        && !parts[0].is_empty()
        && !parts[1].is_empty()
        && parts[1].contains('.')
        && !email.contains(' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_body() -> RegisterRequest {
        RegisterRequest {
            username: "moviefan".to_string(),
            password: "hunter2hunter2".to_string(),
            email: "fan@example.com".to_string(),
            birthday: None,
        }
    }

    #[test]
    fn valid_registration_passes() {
        assert!(registration(&register_body()).is_ok());
    }

    #[test]
    fn five_character_username_is_rejected() {
        let mut body = register_body();
        body.username = "short".to_string();

        let err = registration(&body).unwrap_err();
        match err {
            ApiError::UnprocessableEntity { field_errors, .. } => {
                assert!(field_errors.contains_key("Username"));
            }
            other => panic!("expected UnprocessableEntity, got {:?}", other),
        }
    }

    #[test]
    fn non_alphanumeric_username_is_rejected() {
        let mut body = register_body();
        body.username = "movie-fan!".to_string();
        assert!(registration(&body).is_err());
    }

    #[test]
    fn empty_password_is_rejected() {
        let mut body = register_body();
        body.password = String::new();
        assert!(registration(&body).is_err());
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in [
            "",
            "no-at-sign",
            "@example.com",
            "fan@",
            "fan@nodot",
            "fan@@example.com",
            "a b@example.com",
        ] {
            let mut body = register_body();
            body.email = email.to_string();
            assert!(registration(&body).is_err(), "accepted: {}", email);
        }
    }

    #[test]
    fn update_with_no_fields_passes() {
        assert!(profile_update(&UpdateRequest::default()).is_ok());
    }

    #[test]
    fn update_validates_only_present_fields() {
        let body = UpdateRequest {
            username: Some("ok".to_string()),
            ..Default::default()
        };
        let err = profile_update(&body).unwrap_err();
        match err {
            ApiError::UnprocessableEntity { field_errors, .. } => {
                assert_eq!(field_errors.len(), 1);
                assert!(field_errors.contains_key("Username"));
            }
            other => panic!("expected UnprocessableEntity, got {:?}", other),
        }
    }

    #[test]
    fn update_accepts_valid_partial_payload() {
        let body = UpdateRequest {
            email: Some("new@example.com".to_string()),
            ..Default::default()
        };
        assert!(profile_update(&body).is_ok());
    }
}
