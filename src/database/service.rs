use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::database::models::{Director, Genre, Movie, User};
use crate::database::DatabaseError;

const USER_COLUMNS: &str =
    "id, username, password_hash, email, birthday, favorites, created_at, updated_at";

/// Joined movie projection; collapsed into `Movie` with embedded objects.
#[derive(Debug, FromRow)]
struct MovieRow {
    id: Uuid,
    title: String,
    description: String,
    image_path: Option<String>,
    featured: bool,
    genre_id: Uuid,
    genre_name: String,
    genre_description: String,
    director_id: Uuid,
    director_name: String,
    director_bio: String,
    director_birth_year: Option<i32>,
    director_death_year: Option<i32>,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Movie {
            id: row.id,
            title: row.title,
            description: row.description,
            genre: Genre {
                id: row.genre_id,
                name: row.genre_name,
                description: row.genre_description,
            },
            director: Director {
                id: row.director_id,
                name: row.director_name,
                bio: row.director_bio,
                birth_year: row.director_birth_year,
                death_year: row.director_death_year,
            },
            image_path: row.image_path,
            featured: row.featured,
        }
    }
}

const MOVIE_SELECT: &str = "SELECT m.id, m.title, m.description, m.image_path, m.featured,
            g.id AS genre_id, g.name AS genre_name, g.description AS genre_description,
            d.id AS director_id, d.name AS director_name, d.bio AS director_bio,
            d.birth_year AS director_birth_year, d.death_year AS director_death_year
       FROM movies m
       JOIN genres g ON g.id = m.genre_id
       JOIN directors d ON d.id = m.director_id";

/// List all movies with genre and director expanded
pub async fn list_movies(pool: &PgPool) -> Result<Vec<Movie>, DatabaseError> {
    let rows = sqlx::query_as::<_, MovieRow>(&format!("{} ORDER BY m.title", MOVIE_SELECT))
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(Movie::from).collect())
}

/// Look up a single movie by exact title, expanded
pub async fn find_movie_by_title(
    pool: &PgPool,
    title: &str,
) -> Result<Option<Movie>, DatabaseError> {
    let row = sqlx::query_as::<_, MovieRow>(&format!("{} WHERE m.title = $1", MOVIE_SELECT))
        .bind(title)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(Movie::from))
}

/// List all genres
pub async fn list_genres(pool: &PgPool) -> Result<Vec<Genre>, DatabaseError> {
    let genres =
        sqlx::query_as::<_, Genre>("SELECT id, name, description FROM genres ORDER BY name")
            .fetch_all(pool)
            .await?;

    Ok(genres)
}

/// Look up a single genre by exact name
pub async fn find_genre_by_name(pool: &PgPool, name: &str) -> Result<Option<Genre>, DatabaseError> {
    let genre =
        sqlx::query_as::<_, Genre>("SELECT id, name, description FROM genres WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await?;

    Ok(genre)
}

/// List all directors
pub async fn list_directors(pool: &PgPool) -> Result<Vec<Director>, DatabaseError> {
    let directors = sqlx::query_as::<_, Director>(
        "SELECT id, name, bio, birth_year, death_year FROM directors ORDER BY name",
    )
    .fetch_all(pool)
    .await?;

    Ok(directors)
}

/// Look up a single director by exact name
pub async fn find_director_by_name(
    pool: &PgPool,
    name: &str,
) -> Result<Option<Director>, DatabaseError> {
    let director = sqlx::query_as::<_, Director>(
        "SELECT id, name, bio, birth_year, death_year FROM directors WHERE name = $1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(director)
}

/// List all users
pub async fn list_users(pool: &PgPool) -> Result<Vec<User>, DatabaseError> {
    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users ORDER BY username",
        USER_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Look up a user by exact (case-sensitive) username
pub async fn find_user_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<User>, DatabaseError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE username = $1",
        USER_COLUMNS
    ))
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Insert a new user record; the password must already be hashed
pub async fn create_user(
    pool: &PgPool,
    username: &str,
    password_hash: &str,
    email: &str,
    birthday: Option<NaiveDate>,
) -> Result<User, DatabaseError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (username, password_hash, email, birthday)
         VALUES ($1, $2, $3, $4)
         RETURNING {}",
        USER_COLUMNS
    ))
    .bind(username)
    .bind(password_hash)
    .bind(email)
    .bind(birthday)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Profile fields to apply in `update_user`; `None` leaves the stored value
/// untouched.
#[derive(Debug, Default)]
pub struct ProfileChanges {
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub email: Option<String>,
    pub birthday: Option<NaiveDate>,
}

/// Apply the supplied profile fields to a user, returning the updated record.
/// Returns `None` when no user matches.
pub async fn update_user(
    pool: &PgPool,
    username: &str,
    changes: &ProfileChanges,
) -> Result<Option<User>, DatabaseError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "UPDATE users
            SET username = COALESCE($2, username),
                password_hash = COALESCE($3, password_hash),
                email = COALESCE($4, email),
                birthday = COALESCE($5, birthday),
                updated_at = now()
          WHERE username = $1
          RETURNING {}",
        USER_COLUMNS
    ))
    .bind(username)
    .bind(changes.username.as_deref())
    .bind(changes.password_hash.as_deref())
    .bind(changes.email.as_deref())
    .bind(changes.birthday)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Delete a user by username; true when a record was removed
pub async fn delete_user(pool: &PgPool, username: &str) -> Result<bool, DatabaseError> {
    let result = sqlx::query("DELETE FROM users WHERE username = $1")
        .bind(username)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Add a movie id to a user's favorites. Idempotent: an id already present is
/// left alone, so the list never holds duplicates. Returns `None` when no
/// user matches.
pub async fn add_favorite(
    pool: &PgPool,
    username: &str,
    movie_id: Uuid,
) -> Result<Option<User>, DatabaseError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "UPDATE users
            SET favorites = CASE WHEN favorites @> ARRAY[$2::uuid]
                                 THEN favorites
                                 ELSE array_append(favorites, $2::uuid)
                            END,
                updated_at = now()
          WHERE username = $1
          RETURNING {}",
        USER_COLUMNS
    ))
    .bind(username)
    .bind(movie_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Remove a movie id from a user's favorites; a no-op when the id is absent.
/// Returns `None` when no user matches.
pub async fn remove_favorite(
    pool: &PgPool,
    username: &str,
    movie_id: Uuid,
) -> Result<Option<User>, DatabaseError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "UPDATE users
            SET favorites = array_remove(favorites, $2::uuid),
                updated_at = now()
          WHERE username = $1
          RETURNING {}",
        USER_COLUMNS
    ))
    .bind(username)
    .bind(movie_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Insert or refresh a director by unique name, for out-of-band seeding
pub async fn upsert_director(
    pool: &PgPool,
    name: &str,
    bio: &str,
    birth_year: Option<i32>,
    death_year: Option<i32>,
) -> Result<Uuid, DatabaseError> {
    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO directors (name, bio, birth_year, death_year)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (name) DO UPDATE
            SET bio = EXCLUDED.bio,
                birth_year = EXCLUDED.birth_year,
                death_year = EXCLUDED.death_year
         RETURNING id",
    )
    .bind(name)
    .bind(bio)
    .bind(birth_year)
    .bind(death_year)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Insert or refresh a genre by unique name, for out-of-band seeding
pub async fn upsert_genre(
    pool: &PgPool,
    name: &str,
    description: &str,
) -> Result<Uuid, DatabaseError> {
    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO genres (name, description)
         VALUES ($1, $2)
         ON CONFLICT (name) DO UPDATE SET description = EXCLUDED.description
         RETURNING id",
    )
    .bind(name)
    .bind(description)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Insert or refresh a movie by unique title, for out-of-band seeding
pub async fn upsert_movie(
    pool: &PgPool,
    title: &str,
    description: &str,
    genre_id: Uuid,
    director_id: Uuid,
    image_path: Option<&str>,
    featured: bool,
) -> Result<Uuid, DatabaseError> {
    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO movies (title, description, genre_id, director_id, image_path, featured)
         VALUES ($1, $2, $3, $4, $5, $6)
         ON CONFLICT (title) DO UPDATE
            SET description = EXCLUDED.description,
                genre_id = EXCLUDED.genre_id,
                director_id = EXCLUDED.director_id,
                image_path = EXCLUDED.image_path,
                featured = EXCLUDED.featured
         RETURNING id",
    )
    .bind(title)
    .bind(description)
    .bind(genre_id)
    .bind(director_id)
    .bind(image_path)
    .bind(featured)
    .fetch_one(pool)
    .await?;

    Ok(id)
}
