//! Handlers for the `/movies` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use kinotek_core::types::DbId;
use kinotek_db::models::movie::{CreateMovie, Movie, MoviePatch, MovieWithActors};
use kinotek_db::repositories::MovieRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Sort selector for the movie listing.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovieSort {
    #[default]
    Rating,
    Title,
    ReleaseDate,
}

/// Query parameters for `GET /movies` (`?sort=rating|title|release_date`).
#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub sort: MovieSort,
}

/// Query parameters for `GET /movies/search` (`?q=term`).
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
}

/// Request body for association mutation: a list of actor names.
#[derive(Debug, Deserialize)]
pub struct ActorNames {
    pub actors: Vec<String>,
}

/// POST /api/v1/movies
///
/// Creates the movie and its actor links as one transaction.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateMovie>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    input.validate().map_err(AppError::validation)?;
    let movie = MovieRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

/// GET /api/v1/movies -- all movies with actor names, sorted per `?sort=`.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Vec<MovieWithActors>>>> {
    let movies = match params.sort {
        MovieSort::Rating => MovieRepo::list_by_rating(&state.pool).await?,
        MovieSort::Title => MovieRepo::list_by_title(&state.pool).await?,
        MovieSort::ReleaseDate => MovieRepo::list_by_release_date(&state.pool).await?,
    };
    Ok(Json(DataResponse { data: movies }))
}

/// GET /api/v1/movies/search?q= -- substring match on title or actor name.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<MovieWithActors>>>> {
    let movies = MovieRepo::search(&state.pool, &params.q).await?;
    Ok(Json(DataResponse { data: movies }))
}

/// PATCH /api/v1/movies/{id} -- apply a single-field update.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(patch): Json<MoviePatch>,
) -> AppResult<StatusCode> {
    MovieRepo::update(&state.pool, id, &patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/movies/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    MovieRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/movies/{id}/actors -- link actors by name.
pub async fn add_actors(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ActorNames>,
) -> AppResult<StatusCode> {
    MovieRepo::add_actors(&state.pool, id, &input.actors).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/movies/{id}/actors -- unlink actors by name.
pub async fn remove_actors(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ActorNames>,
) -> AppResult<StatusCode> {
    MovieRepo::remove_actors(&state.pool, id, &input.actors).await?;
    Ok(StatusCode::NO_CONTENT)
}
