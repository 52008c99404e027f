//! Writes to the `actor_movie` relation.
//!
//! Statements are generic over the executor so the same inserts run both
//! inside the movie-creation transaction and standalone against the pool.

use kinotek_core::types::DbId;
use sqlx::PgExecutor;

/// Insert one association row per actor id.
///
/// Re-adding an existing pair is a no-op; the composite primary key keeps
/// the relation duplicate-free. A missing parent row still raises the
/// foreign-key violation for the caller to translate.
pub(crate) async fn link_ids<'e, E>(
    executor: E,
    movie_id: DbId,
    actor_ids: &[DbId],
) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    if actor_ids.is_empty() {
        return Ok(());
    }
    sqlx::query(
        "INSERT INTO actor_movie (actor_id, movie_id)
         SELECT actor_id, $1 FROM UNNEST($2::BIGINT[]) AS t(actor_id)
         ON CONFLICT DO NOTHING",
    )
    .bind(movie_id)
    .bind(actor_ids)
    .execute(executor)
    .await?;
    Ok(())
}

/// Resolve actor names to ids. A name borne by several actors resolves to
/// every one of them; names that match nothing are simply absent from the
/// result, which is how callers detect them.
pub(crate) async fn resolve_actors<'e, E>(
    executor: E,
    names: &[String],
) -> Result<Vec<(DbId, String)>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as("SELECT id, name FROM actors WHERE name = ANY($1)")
        .bind(names)
        .fetch_all(executor)
        .await
}

/// Delete the association rows linking `movie_id` to any actor bearing one
/// of `names`. Returns the number of rows removed.
pub(crate) async fn unlink_names<'e, E>(
    executor: E,
    movie_id: DbId,
    names: &[String],
) -> Result<u64, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query(
        "DELETE FROM actor_movie am
         USING actors a
         WHERE am.actor_id = a.id AND am.movie_id = $1 AND a.name = ANY($2)",
    )
    .bind(movie_id)
    .bind(names)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

pub(crate) async fn movie_exists<'e, E>(executor: E, id: DbId) -> Result<bool, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM movies WHERE id = $1)")
        .bind(id)
        .fetch_one(executor)
        .await
}
