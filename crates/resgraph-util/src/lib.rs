//! Shared utilities for resgraph.
//!
//! This crate provides the cross-cutting pieces used by the other resgraph
//! crates: the unified error type and the deferred / memoized value wrappers
//! that callers put around expensive graph producers.

pub mod errors;
pub mod lazy;
