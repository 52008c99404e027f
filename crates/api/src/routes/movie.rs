//! Route definitions for the `/movies` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::movie;
use crate::state::AppState;

/// Routes mounted at `/movies`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(movie::list).post(movie::create))
        .route("/search", get(movie::search))
        .route("/{id}", patch(movie::update).delete(movie::delete))
        .route(
            "/{id}/actors",
            post(movie::add_actors).delete(movie::remove_actors),
        )
}
