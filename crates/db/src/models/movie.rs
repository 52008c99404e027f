//! Movie entity model and DTOs.

use chrono::NaiveDate;
use kinotek_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `movies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub release_date: NaiveDate,
    /// No bound is enforced by storage; range checks belong to the caller.
    pub rating: i32,
}

/// DTO for creating a new movie together with its actor associations.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMovie {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub release_date: NaiveDate,
    pub rating: i32,
    /// Ids of actors to link at creation time. The insert and these links
    /// commit as one transaction.
    #[serde(default)]
    pub actors: Vec<DbId>,
}

/// Single-field update request.
///
/// A closed variant set, one per updatable column, so no caller-supplied
/// column name ever reaches SQL.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum MoviePatch {
    Title(String),
    Description(String),
    ReleaseDate(NaiveDate),
    Rating(i32),
}

/// A movie paired with the names of its associated actors.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MovieWithActors {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub movie: Movie,
    pub actors: Vec<String>,
}
