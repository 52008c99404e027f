pub mod actor;
pub mod health;
pub mod movie;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /actors                 GET list, POST create
/// /actors/{id}            PATCH update, DELETE delete
///
/// /movies                 GET list (?sort=), POST create
/// /movies/search          GET search (?q=)
/// /movies/{id}            PATCH update, DELETE delete
/// /movies/{id}/actors     POST add_actors, DELETE remove_actors
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/actors", actor::router())
        .nest("/movies", movie::router())
}
