use crate::types::DbId;

/// Caller-facing error kinds for catalog operations.
///
/// Storage-level failures never cross this boundary directly: constraint
/// violations and zero-rows-affected conditions are translated into the
/// specific kinds below, and anything unclassified is logged at the
/// translation site and surfaced as [`CatalogError::Internal`]. The only
/// storage-derived annotation a caller ever sees is the optional offending
/// id on the `DoesNotExist` kinds.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("actor already exists")]
    ActorAlreadyExists,

    #[error("movie already exists")]
    MovieAlreadyExists,

    #[error("actor does not exist{}", fmt_id(.id))]
    ActorDoesNotExist { id: Option<DbId> },

    #[error("movie does not exist{}", fmt_id(.id))]
    MovieDoesNotExist { id: Option<DbId> },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("internal error")]
    Internal,
}

fn fmt_id(id: &Option<DbId>) -> String {
    id.map(|id| format!(" (id {id})")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn does_not_exist_display_includes_id_when_known() {
        let err = CatalogError::ActorDoesNotExist { id: Some(42) };
        assert_eq!(err.to_string(), "actor does not exist (id 42)");

        let err = CatalogError::MovieDoesNotExist { id: None };
        assert_eq!(err.to_string(), "movie does not exist");
    }

    #[test]
    fn internal_display_carries_no_detail() {
        assert_eq!(CatalogError::Internal.to_string(), "internal error");
    }
}
