use axum::{
    extract::{Path, State},
    Json,
};

use crate::database::models::Director;
use crate::database::service;
use crate::error::{ApiError, ApiResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /directors - list all directors
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Director>>> {
    let directors = service::list_directors(&state.pool).await?;
    Ok(Json(directors))
}

/// GET /directors/:name - single director by exact name
pub async fn get_by_name(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Director>> {
    let director = service::find_director_by_name(&state.pool, &name)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Director '{}' not found", name)))?;

    Ok(Json(director))
}
