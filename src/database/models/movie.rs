use serde::Serialize;
use uuid::Uuid;

use super::{Director, Genre};

/// A movie with its genre and director references expanded into full objects.
///
/// Built from a joined query rather than `FromRow`; see
/// `database::service::MovieRow`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Movie {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub genre: Genre,
    pub director: Director,
    pub image_path: Option<String>,
    pub featured: bool,
}
