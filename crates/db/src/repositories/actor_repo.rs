//! Repository for the `actors` table.

use kinotek_core::error::CatalogError;
use kinotek_core::types::DbId;
use sqlx::PgPool;

use crate::error;
use crate::models::actor::{Actor, ActorPatch, ActorWithMovies, CreateActor};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, sex, birth_date";

/// Provides CRUD and listing operations for actors.
pub struct ActorRepo;

impl ActorRepo {
    /// Insert a new actor, returning the created row with its assigned id.
    ///
    /// A (name, birth_date) collision fails with `ActorAlreadyExists`.
    pub async fn create(pool: &PgPool, input: &CreateActor) -> Result<Actor, CatalogError> {
        let query = format!(
            "INSERT INTO actors (name, sex, birth_date)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Actor>(&query)
            .bind(&input.name)
            .bind(&input.sex)
            .bind(input.birth_date)
            .fetch_one(pool)
            .await
            .map_err(|err| {
                if error::is_unique_violation(&err) {
                    CatalogError::ActorAlreadyExists
                } else {
                    error::internal(err)
                }
            })
    }

    /// Apply a single-field update by id.
    ///
    /// Fails with `ActorDoesNotExist` if no row matched; a name/birth-date
    /// update that collides with another actor fails with
    /// `ActorAlreadyExists`.
    pub async fn update(pool: &PgPool, id: DbId, patch: &ActorPatch) -> Result<(), CatalogError> {
        let result = match patch {
            ActorPatch::Name(name) => {
                sqlx::query("UPDATE actors SET name = $2 WHERE id = $1")
                    .bind(id)
                    .bind(name)
            }
            ActorPatch::Sex(sex) => {
                sqlx::query("UPDATE actors SET sex = $2 WHERE id = $1")
                    .bind(id)
                    .bind(sex)
            }
            ActorPatch::BirthDate(birth_date) => {
                sqlx::query("UPDATE actors SET birth_date = $2 WHERE id = $1")
                    .bind(id)
                    .bind(*birth_date)
            }
        }
        .execute(pool)
        .await
        .map_err(|err| {
            if error::is_unique_violation(&err) {
                CatalogError::ActorAlreadyExists
            } else {
                error::internal(err)
            }
        })?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::ActorDoesNotExist { id: Some(id) });
        }
        Ok(())
    }

    /// Delete the actor and every association row referencing it,
    /// committing both deletes or neither.
    ///
    /// Fails with `ActorDoesNotExist` (and rolls back) if the actor row
    /// was not there.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), CatalogError> {
        let mut tx = pool.begin().await.map_err(error::internal)?;

        // Association rows go first: the foreign key would reject removing
        // a still-referenced actor. The order is unobservable from outside
        // the transaction.
        sqlx::query("DELETE FROM actor_movie WHERE actor_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(error::internal)?;

        let result = sqlx::query("DELETE FROM actors WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(error::internal)?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::ActorDoesNotExist { id: Some(id) });
        }

        tx.commit().await.map_err(error::internal)
    }

    /// Every actor together with the titles of the movies they appear in.
    ///
    /// Left-join aggregation: actors with no movies appear with an empty
    /// title list. Ordered by name (id as tiebreaker) for stable output.
    pub async fn list_with_movies(pool: &PgPool) -> Result<Vec<ActorWithMovies>, CatalogError> {
        sqlx::query_as::<_, ActorWithMovies>(
            "SELECT a.id, a.name, a.sex, a.birth_date,
                    COALESCE(array_agg(m.title ORDER BY m.title) FILTER (WHERE m.id IS NOT NULL), '{}') AS movies
             FROM actors a
             LEFT JOIN actor_movie am ON a.id = am.actor_id
             LEFT JOIN movies m ON am.movie_id = m.id
             GROUP BY a.id, a.name, a.sex, a.birth_date
             ORDER BY a.name, a.id",
        )
        .fetch_all(pool)
        .await
        .map_err(error::internal)
    }
}
