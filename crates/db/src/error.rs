//! Translation of storage-engine errors into domain error kinds.
//!
//! Repositories recover unique-constraint and foreign-key violations here
//! and re-raise them as the matching [`CatalogError`] kind. Anything
//! unclassified is logged with full detail and collapsed to `Internal`,
//! so no storage-specific text crosses the repository boundary.

use kinotek_core::error::CatalogError;
use kinotek_core::types::DbId;
use sqlx::postgres::PgDatabaseError;

/// PostgreSQL `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL `foreign_key_violation`.
const FOREIGN_KEY_VIOLATION: &str = "23503";

fn pg_error(err: &sqlx::Error) -> Option<&PgDatabaseError> {
    match err {
        sqlx::Error::Database(db) => db.try_downcast_ref::<PgDatabaseError>(),
        _ => None,
    }
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    pg_error(err).is_some_and(|e| e.code() == UNIQUE_VIOLATION)
}

/// A foreign key that referenced a missing parent row.
#[derive(Debug, PartialEq, Eq)]
struct MissingParent {
    column: String,
    id: Option<DbId>,
}

fn missing_parent(err: &sqlx::Error) -> Option<MissingParent> {
    let pg = pg_error(err)?;
    if pg.code() != FOREIGN_KEY_VIOLATION {
        return None;
    }
    parse_fk_detail(pg.detail().unwrap_or_default())
}

/// Map a foreign-key violation raised while writing association rows to
/// the `DoesNotExist` kind for whichever parent was missing, annotated
/// with the identity parsed from the violation detail.
pub(crate) fn on_association_write(err: sqlx::Error) -> CatalogError {
    match missing_parent(&err) {
        Some(MissingParent { column, id }) if column == "movie_id" => {
            CatalogError::MovieDoesNotExist { id }
        }
        Some(MissingParent { id, .. }) => CatalogError::ActorDoesNotExist { id },
        None => internal(err),
    }
}

/// Log an unclassified storage error and collapse it to `Internal`.
pub(crate) fn internal(err: sqlx::Error) -> CatalogError {
    tracing::error!(error = %err, "unclassified database error");
    CatalogError::Internal
}

/// Parse the detail line of a foreign-key violation, e.g.
/// `Key (actor_id)=(42) is not present in table "actors".`
fn parse_fk_detail(detail: &str) -> Option<MissingParent> {
    let rest = detail.strip_prefix("Key (")?;
    let (column, rest) = rest.split_once(")=(")?;
    let (id, _) = rest.split_once(')')?;
    Some(MissingParent {
        column: column.to_string(),
        id: id.parse().ok(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_missing_actor_detail() {
        let parsed =
            parse_fk_detail("Key (actor_id)=(42) is not present in table \"actors\".").unwrap();
        assert_eq!(parsed.column, "actor_id");
        assert_eq!(parsed.id, Some(42));
    }

    #[test]
    fn parses_missing_movie_detail() {
        let parsed =
            parse_fk_detail("Key (movie_id)=(7) is not present in table \"movies\".").unwrap();
        assert_eq!(parsed.column, "movie_id");
        assert_eq!(parsed.id, Some(7));
    }

    #[test]
    fn rejects_malformed_detail() {
        assert_eq!(parse_fk_detail(""), None);
        assert_eq!(parse_fk_detail("Key actor_id=42"), None);
    }

    #[test]
    fn tolerates_unparseable_id() {
        // A composite-key detail still identifies the column even when the
        // id portion is not a single integer.
        let parsed =
            parse_fk_detail("Key (actor_id)=(abc) is not present in table \"actors\".").unwrap();
        assert_eq!(parsed.column, "actor_id");
        assert_eq!(parsed.id, None);
    }
}
