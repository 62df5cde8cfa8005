use axum::{
    extract::{Path, State},
    Json,
};

use crate::database::models::Movie;
use crate::database::service;
use crate::error::{ApiError, ApiResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /movies - list the catalog with genre and director expanded
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Movie>>> {
    let movies = service::list_movies(&state.pool).await?;
    Ok(Json(movies))
}

/// GET /movies/:title - single movie by exact title
pub async fn get_by_title(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> ApiResult<Json<Movie>> {
    let movie = service::find_movie_by_title(&state.pool, &title)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Movie '{}' not found", title)))?;

    Ok(Json(movie))
}
