//! Shared domain types for the kinotek catalog.
//!
//! This crate is free of I/O: it holds the scalar type aliases and the
//! domain error taxonomy that every other crate speaks.

pub mod error;
pub mod types;
