//! Core data types for resgraph.
//!
//! This crate defines the plain values that a resolved dependency graph is
//! made of: component identifiers and requested selectors, the reasons a
//! component was selected, the failure attached to an unresolved dependency,
//! attribute containers and resolved variants, and the serializable snapshot
//! format a resolution engine can hand over.
//!
//! This crate is intentionally free of graph logic and I/O.

pub mod attributes;
pub mod coordinate;
pub mod failure;
pub mod reason;
pub mod snapshot;
pub mod variant;
