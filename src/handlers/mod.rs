use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::state::AppState;

pub mod directors;
pub mod genres;
pub mod login;
pub mod movies;
pub mod users;
pub mod validate;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/login", post(login::login))
        .merge(catalog_routes())
        .merge(user_routes())
        .layer(cors_layer(&state.config.security))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/movies", get(movies::list))
        .route("/movies/:title", get(movies::get_by_title))
        .route("/genres", get(genres::list))
        .route("/genres/:name", get(genres::get_by_name))
        .route("/directors", get(directors::list))
        .route("/directors/:name", get(directors::get_by_name))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(users::register).get(users::list))
        .route(
            "/users/:username",
            get(users::get_by_username)
                .put(users::update)
                .delete(users::delete),
        )
        .route(
            "/users/:username/:movie_id",
            post(users::favorite_add).delete(users::favorite_remove),
        )
}

/// CORS allow-list from configuration; requests without an Origin header pass
fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

async fn root() -> &'static str {
    "Welcome to myFlix!"
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::health_check(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unreachable"
                })),
            )
        }
    }
}
