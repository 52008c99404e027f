//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Multi-statement writes open a
//! transaction and commit or roll back as a unit; storage errors are
//! translated in `crate::error` before leaving the crate.

pub mod actor_repo;
pub(crate) mod association;
pub mod movie_repo;

pub use actor_repo::ActorRepo;
pub use movie_repo::MovieRepo;
