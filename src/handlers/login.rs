use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::{self, password, Claims};
use crate::database::models::User;
use crate::database::service;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Single message for every credential failure so callers cannot probe which
/// usernames exist.
const INVALID_CREDENTIALS: &str = "Invalid username or password";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

/// POST /login - verify credentials and issue a signed, time-limited token
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = service::find_user_by_username(&state.pool, &body.username)
        .await?
        .ok_or_else(|| ApiError::unauthorized(INVALID_CREDENTIALS))?;

    let password_valid = password::verify_password(&body.password, &user.password_hash)?;
    if !password_valid {
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    let security = &state.config.security;
    let claims = Claims::new(&user.username, user.id, security.jwt_expiry_hours);
    let token = auth::issue_token(&claims, &security.jwt_secret)?;

    Ok(Json(LoginResponse { user, token }))
}
