use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::password;
use crate::database::models::User;
use crate::database::service::{self, ProfileChanges};
use crate::error::{ApiError, ApiResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

use super::validate;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub birthday: Option<NaiveDate>,
}

/// All fields optional; only the ones present are applied.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub birthday: Option<NaiveDate>,
}

/// POST /users - register a new account
///
/// Validation runs before any store access; a duplicate username is a 400
/// conflict, matching the original service's contract.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    validate::registration(&body)?;

    if service::find_user_by_username(&state.pool, &body.username)
        .await?
        .is_some()
    {
        return Err(ApiError::bad_request(format!(
            "{} already exists",
            body.username
        )));
    }

    let password_hash = password::hash_password(&body.password)?;
    let user = service::create_user(
        &state.pool,
        &body.username,
        &password_hash,
        &body.email,
        body.birthday,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users - list all accounts
pub async fn list(_auth: AuthUser, State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = service::list_users(&state.pool).await?;
    Ok(Json(users))
}

/// GET /users/:username - single account by exact username
pub async fn get_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<User>> {
    let user = service::find_user_by_username(&state.pool, &username)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User '{}' not found", username)))?;

    Ok(Json(user))
}

/// PUT /users/:username - apply the supplied profile fields
///
/// The password is re-hashed only when a new one is supplied; omitted fields
/// keep their stored values.
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(body): Json<UpdateRequest>,
) -> ApiResult<Json<User>> {
    validate::profile_update(&body)?;

    let password_hash = match body.password.as_deref() {
        Some(plaintext) => Some(password::hash_password(plaintext)?),
        None => None,
    };

    let changes = ProfileChanges {
        username: body.username,
        password_hash,
        email: body.email,
        birthday: body.birthday,
    };

    let user = service::update_user(&state.pool, &username, &changes)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User '{}' not found", username)))?;

    Ok(Json(user))
}

/// DELETE /users/:username - remove an account
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<String> {
    let deleted = service::delete_user(&state.pool, &username).await?;

    if !deleted {
        return Err(ApiError::bad_request(format!(
            "{} was not found",
            username
        )));
    }

    Ok(format!("{} was deleted.", username))
}

/// POST /users/:username/:movie_id - add a movie to the favorites list
pub async fn favorite_add(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path((username, movie_id)): Path<(String, Uuid)>,
) -> ApiResult<Json<User>> {
    let user = service::add_favorite(&state.pool, &username, movie_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User '{}' not found", username)))?;

    Ok(Json(user))
}

/// DELETE /users/:username/:movie_id - remove a movie from the favorites list
pub async fn favorite_remove(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path((username, movie_id)): Path<(String, Uuid)>,
) -> ApiResult<Json<User>> {
    let user = service::remove_favorite(&state.pool, &username, movie_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User '{}' not found", username)))?;

    Ok(Json(user))
}
