use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod password;

/// Claims embedded in every access token issued by `POST /login`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the username the token was issued to.
    pub sub: String,
    pub user_id: Uuid,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(username: &str, user_id: Uuid, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: username.to_string(),
            user_id,
            exp,
            iat: now.timestamp(),
        }
    }
}

/// Sign claims into an HS256 bearer token.
pub fn issue_token(claims: &Claims, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Validate signature and expiry, returning the embedded claims.
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

    #[test]
    fn issue_and_decode_round_trip() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new("moviefan", user_id, 24);
        let token = issue_token(&claims, SECRET).expect("token generation should succeed");

        let decoded = decode_token(&token, SECRET).expect("token validation should succeed");
        assert_eq!(decoded.sub, "moviefan");
        assert_eq!(decoded.user_id, user_id);
        assert!(decoded.exp > decoded.iat);
    }

    #[test]
    fn expired_token_is_rejected() {
        // Manually build a token expired well past the default 60s leeway.
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "moviefan".to_string(),
            user_id: Uuid::new_v4(),
            exp: now - 300,
            iat: now - 600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .expect("encoding should succeed");

        assert!(decode_token(&token, SECRET).is_err());
    }

    #[test]
    fn token_signed_with_different_secret_is_rejected() {
        let claims = Claims::new("moviefan", Uuid::new_v4(), 24);
        let token = issue_token(&claims, "secret-alpha").expect("token generation should succeed");

        assert!(decode_token(&token, "secret-bravo").is_err());
    }
}
