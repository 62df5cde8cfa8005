use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use myflix_api::{config::AppConfig, database, handlers, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "myflix_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let pool = database::connect(&config.database).await?;
    database::run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(pool, config);
    let app = handlers::app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("myFlix API listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
