use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Argon2id PHC hash; serialized under the original wire name. The
    /// plaintext never reaches storage or a response body.
    #[serde(rename = "Password")]
    pub password_hash: String,
    pub email: String,
    pub birthday: Option<NaiveDate>,
    #[serde(rename = "FavoriteMovies")]
    pub favorites: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
