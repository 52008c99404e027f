//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - A tagged patch enum (one variant per updatable field)
//! - An aggregate read record pairing the entity with associated names

pub mod actor;
pub mod movie;
