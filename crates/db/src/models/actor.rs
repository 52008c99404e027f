//! Actor entity model and DTOs.

use chrono::NaiveDate;
use kinotek_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `actors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Actor {
    pub id: DbId,
    pub name: String,
    /// Single-character sex code as stored.
    pub sex: String,
    pub birth_date: NaiveDate,
}

/// DTO for creating a new actor.
///
/// The (name, birth_date) pair is unique; a collision surfaces as
/// `ActorAlreadyExists`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateActor {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(equal = 1, message = "sex must be a single-character code"))]
    pub sex: String,
    pub birth_date: NaiveDate,
}

/// Single-field update request.
///
/// A closed variant set, one per updatable column, so no caller-supplied
/// column name ever reaches SQL.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ActorPatch {
    Name(String),
    Sex(String),
    BirthDate(NaiveDate),
}

/// An actor paired with the titles of the movies they appear in.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActorWithMovies {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub actor: Actor,
    pub movies: Vec<String>,
}
