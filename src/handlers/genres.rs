use axum::{
    extract::{Path, State},
    Json,
};

use crate::database::models::Genre;
use crate::database::service;
use crate::error::{ApiError, ApiResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /genres - list all genres
pub async fn list(_auth: AuthUser, State(state): State<AppState>) -> ApiResult<Json<Vec<Genre>>> {
    let genres = service::list_genres(&state.pool).await?;
    Ok(Json(genres))
}

/// GET /genres/:name - single genre by exact name
pub async fn get_by_name(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Genre>> {
    let genre = service::find_genre_by_name(&state.pool, &name)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Genre '{}' not found", name)))?;

    Ok(Json(genre))
}
