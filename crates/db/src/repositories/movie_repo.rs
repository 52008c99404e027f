//! Repository for the `movies` table and its actor associations.

use std::collections::HashSet;

use kinotek_core::error::CatalogError;
use kinotek_core::types::DbId;
use sqlx::PgPool;

use crate::error;
use crate::models::movie::{CreateMovie, Movie, MoviePatch, MovieWithActors};
use crate::repositories::association;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, release_date, rating";

/// Aggregation body shared by the list and search queries: every movie
/// left-joined to its actors, actor names collected per movie. Movies with
/// no actors get an empty array.
const LIST_BODY: &str = "SELECT m.id, m.title, m.description, m.release_date, m.rating,
        COALESCE(array_agg(a.name ORDER BY a.name) FILTER (WHERE a.id IS NOT NULL), '{}') AS actors
     FROM movies m
     LEFT JOIN actor_movie am ON m.id = am.movie_id
     LEFT JOIN actors a ON am.actor_id = a.id";

const GROUP_BY: &str = "GROUP BY m.id, m.title, m.description, m.release_date, m.rating";

/// Closed set of listing orders.
enum MovieOrder {
    Rating,
    Title,
    ReleaseDate,
}

/// Provides CRUD, association, and retrieval operations for movies.
pub struct MovieRepo;

impl MovieRepo {
    /// Insert a new movie and link every supplied actor id, as one
    /// transaction. Nothing persists unless both steps succeed.
    ///
    /// A title collision fails with `MovieAlreadyExists` before any link
    /// is attempted; a link referencing an unknown actor fails with
    /// `ActorDoesNotExist` carrying the offending id, and the movie row is
    /// rolled back with it.
    pub async fn create(pool: &PgPool, input: &CreateMovie) -> Result<Movie, CatalogError> {
        let mut tx = pool.begin().await.map_err(error::internal)?;

        let query = format!(
            "INSERT INTO movies (title, description, release_date, rating)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let movie = sqlx::query_as::<_, Movie>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.release_date)
            .bind(input.rating)
            .fetch_one(&mut *tx)
            .await
            .map_err(|err| {
                if error::is_unique_violation(&err) {
                    CatalogError::MovieAlreadyExists
                } else {
                    error::internal(err)
                }
            })?;

        association::link_ids(&mut *tx, movie.id, &input.actors)
            .await
            .map_err(error::on_association_write)?;

        tx.commit().await.map_err(error::internal)?;
        Ok(movie)
    }

    /// Apply a single-field update by id.
    ///
    /// Fails with `MovieDoesNotExist` if no row matched; a title update
    /// that collides with another movie fails with `MovieAlreadyExists`.
    pub async fn update(pool: &PgPool, id: DbId, patch: &MoviePatch) -> Result<(), CatalogError> {
        let result = match patch {
            MoviePatch::Title(title) => {
                sqlx::query("UPDATE movies SET title = $2 WHERE id = $1")
                    .bind(id)
                    .bind(title)
            }
            MoviePatch::Description(description) => {
                sqlx::query("UPDATE movies SET description = $2 WHERE id = $1")
                    .bind(id)
                    .bind(description)
            }
            MoviePatch::ReleaseDate(release_date) => {
                sqlx::query("UPDATE movies SET release_date = $2 WHERE id = $1")
                    .bind(id)
                    .bind(*release_date)
            }
            MoviePatch::Rating(rating) => {
                sqlx::query("UPDATE movies SET rating = $2 WHERE id = $1")
                    .bind(id)
                    .bind(*rating)
            }
        }
        .execute(pool)
        .await
        .map_err(|err| {
            if error::is_unique_violation(&err) {
                CatalogError::MovieAlreadyExists
            } else {
                error::internal(err)
            }
        })?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::MovieDoesNotExist { id: Some(id) });
        }
        Ok(())
    }

    /// Link every actor bearing one of `names` to the movie.
    ///
    /// Unknown names fail with `ActorDoesNotExist` before anything is
    /// written; a missing movie surfaces through the foreign key as
    /// `MovieDoesNotExist` with the id parsed from the violation detail.
    /// Already-linked pairs are left as they are.
    pub async fn add_actors(
        pool: &PgPool,
        movie_id: DbId,
        names: &[String],
    ) -> Result<(), CatalogError> {
        let resolved = association::resolve_actors(pool, names)
            .await
            .map_err(error::internal)?;

        let found: HashSet<&str> = resolved.iter().map(|(_, name)| name.as_str()).collect();
        if let Some(missing) = names.iter().find(|name| !found.contains(name.as_str())) {
            tracing::debug!(name = %missing, "unknown actor name in association request");
            return Err(CatalogError::ActorDoesNotExist { id: None });
        }

        let ids: Vec<DbId> = resolved.iter().map(|(id, _)| *id).collect();
        association::link_ids(pool, movie_id, &ids)
            .await
            .map_err(error::on_association_write)
    }

    /// Unlink every actor bearing one of `names` from the movie.
    pub async fn remove_actors(
        pool: &PgPool,
        movie_id: DbId,
        names: &[String],
    ) -> Result<(), CatalogError> {
        if !association::movie_exists(pool, movie_id)
            .await
            .map_err(error::internal)?
        {
            return Err(CatalogError::MovieDoesNotExist { id: Some(movie_id) });
        }

        let resolved = association::resolve_actors(pool, names)
            .await
            .map_err(error::internal)?;
        let found: HashSet<&str> = resolved.iter().map(|(_, name)| name.as_str()).collect();
        if let Some(missing) = names.iter().find(|name| !found.contains(name.as_str())) {
            tracing::debug!(name = %missing, "unknown actor name in association request");
            return Err(CatalogError::ActorDoesNotExist { id: None });
        }

        association::unlink_names(pool, movie_id, names)
            .await
            .map_err(error::internal)?;
        Ok(())
    }

    /// Delete the movie and every association row referencing it,
    /// committing both deletes or neither.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), CatalogError> {
        let mut tx = pool.begin().await.map_err(error::internal)?;

        sqlx::query("DELETE FROM actor_movie WHERE movie_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(error::internal)?;

        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(error::internal)?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::MovieDoesNotExist { id: Some(id) });
        }

        tx.commit().await.map_err(error::internal)
    }

    /// All movies with their actor names, highest rating first.
    pub async fn list_by_rating(pool: &PgPool) -> Result<Vec<MovieWithActors>, CatalogError> {
        Self::list_ordered(pool, MovieOrder::Rating).await
    }

    /// All movies with their actor names, title ascending.
    pub async fn list_by_title(pool: &PgPool) -> Result<Vec<MovieWithActors>, CatalogError> {
        Self::list_ordered(pool, MovieOrder::Title).await
    }

    /// All movies with their actor names, most recent release first.
    pub async fn list_by_release_date(pool: &PgPool) -> Result<Vec<MovieWithActors>, CatalogError> {
        Self::list_ordered(pool, MovieOrder::ReleaseDate).await
    }

    async fn list_ordered(
        pool: &PgPool,
        order: MovieOrder,
    ) -> Result<Vec<MovieWithActors>, CatalogError> {
        // Closed ORDER BY set; the id tiebreaker keeps repeated reads
        // stable when the sort key ties.
        let order_by = match order {
            MovieOrder::Rating => "m.rating DESC, m.id",
            MovieOrder::Title => "m.title ASC, m.id",
            MovieOrder::ReleaseDate => "m.release_date DESC, m.id",
        };
        let query = format!("{LIST_BODY} {GROUP_BY} ORDER BY {order_by}");
        sqlx::query_as::<_, MovieWithActors>(&query)
            .fetch_all(pool)
            .await
            .map_err(error::internal)
    }

    /// Case-insensitive substring search over movie titles and associated
    /// actor names.
    ///
    /// Matching runs in a subquery so that a movie found through one actor
    /// still carries its full actor list.
    pub async fn search(pool: &PgPool, term: &str) -> Result<Vec<MovieWithActors>, CatalogError> {
        let pattern = format!("%{}%", escape_like(term));
        let query = format!(
            "{LIST_BODY}
             WHERE m.id IN (
                 SELECT m2.id FROM movies m2
                 LEFT JOIN actor_movie am2 ON m2.id = am2.movie_id
                 LEFT JOIN actors a2 ON am2.actor_id = a2.id
                 WHERE m2.title ILIKE $1 OR a2.name ILIKE $1
             )
             {GROUP_BY}
             ORDER BY m.title, m.id"
        );
        sqlx::query_as::<_, MovieWithActors>(&query)
            .bind(&pattern)
            .fetch_all(pool)
            .await
            .map_err(error::internal)
    }
}

/// Escape LIKE metacharacters so the search term matches literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn escapes_like_metacharacters() {
        assert_eq!(escape_like("50% off_now\\"), "50\\% off\\_now\\\\");
        assert_eq!(escape_like("holmes"), "holmes");
    }
}
