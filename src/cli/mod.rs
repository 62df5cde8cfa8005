//! Out-of-band administration: migrations and catalog seeding.
//!
//! The API itself is read-only over movies, directors, and genres; this is
//! how catalog data gets into the store.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::database::{self, service};

#[derive(Debug, Parser)]
#[command(name = "myflix-admin", about = "Administration tool for the myFlix catalog")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Apply pending database migrations
    Migrate,
    /// Load a catalog fixture (directors, genres, movies) into the store
    Seed {
        /// Path to the fixture file
        #[arg(long, default_value = "demos/catalog.json")]
        file: PathBuf,
    },
}

#[derive(Debug, Deserialize)]
struct CatalogFixture {
    directors: Vec<DirectorFixture>,
    genres: Vec<GenreFixture>,
    movies: Vec<MovieFixture>,
}

#[derive(Debug, Deserialize)]
struct DirectorFixture {
    name: String,
    #[serde(default)]
    bio: String,
    birth_year: Option<i32>,
    death_year: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct GenreFixture {
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct MovieFixture {
    title: String,
    #[serde(default)]
    description: String,
    genre: String,
    director: String,
    image_path: Option<String>,
    #[serde(default)]
    featured: bool,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    let pool = database::connect(&config.database).await?;

    match cli.command {
        Command::Migrate => {
            database::run_migrations(&pool).await?;
            println!("Migrations applied");
        }
        Command::Seed { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read fixture {}", file.display()))?;
            let fixture: CatalogFixture = serde_json::from_str(&raw)
                .with_context(|| format!("invalid fixture {}", file.display()))?;

            database::run_migrations(&pool).await?;
            seed_catalog(&pool, &fixture).await?;
        }
    }

    Ok(())
}

/// Upsert the fixture by unique name/title so re-seeding is idempotent
async fn seed_catalog(pool: &PgPool, fixture: &CatalogFixture) -> anyhow::Result<()> {
    let mut director_ids = HashMap::new();
    for d in &fixture.directors {
        let id =
            service::upsert_director(pool, &d.name, &d.bio, d.birth_year, d.death_year).await?;
        director_ids.insert(d.name.clone(), id);
    }

    let mut genre_ids = HashMap::new();
    for g in &fixture.genres {
        let id = service::upsert_genre(pool, &g.name, &g.description).await?;
        genre_ids.insert(g.name.clone(), id);
    }

    for m in &fixture.movies {
        let genre_id = genre_ids.get(&m.genre).copied().with_context(|| {
            format!("movie '{}' references unknown genre '{}'", m.title, m.genre)
        })?;
        let director_id = director_ids.get(&m.director).copied().with_context(|| {
            format!(
                "movie '{}' references unknown director '{}'",
                m.title, m.director
            )
        })?;

        service::upsert_movie(
            pool,
            &m.title,
            &m.description,
            genre_id,
            director_id,
            m.image_path.as_deref(),
            m.featured,
        )
        .await?;
    }

    println!(
        "Seeded {} directors, {} genres, {} movies",
        fixture.directors.len(),
        fixture.genres.len(),
        fixture.movies.len()
    );
    Ok(())
}
