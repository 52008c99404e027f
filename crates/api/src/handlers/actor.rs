//! Handlers for the `/actors` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use kinotek_core::types::DbId;
use kinotek_db::models::actor::{Actor, ActorPatch, ActorWithMovies, CreateActor};
use kinotek_db::repositories::ActorRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/actors
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateActor>,
) -> AppResult<(StatusCode, Json<Actor>)> {
    input.validate().map_err(AppError::validation)?;
    let actor = ActorRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(actor)))
}

/// GET /api/v1/actors -- every actor with the movies they appear in.
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ActorWithMovies>>>> {
    let actors = ActorRepo::list_with_movies(&state.pool).await?;
    Ok(Json(DataResponse { data: actors }))
}

/// PATCH /api/v1/actors/{id} -- apply a single-field update.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(patch): Json<ActorPatch>,
) -> AppResult<StatusCode> {
    ActorRepo::update(&state.pool, id, &patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/actors/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ActorRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
