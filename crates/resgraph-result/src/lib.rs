//! The result of a dependency resolution, as a traversable graph.
//!
//! A [`result::ResolutionResult`] wraps a deferred root producer and the
//! attributes the resolution was requested with. Components live in an
//! arena ([`graph::ComponentGraph`]) and are compared by handle, so a
//! component reached through several paths is the same node. Every
//! enumeration goes through the depth-first walk in [`traverse`], which
//! expands each node once but reports every edge it passes.
//!
//! Nothing in this crate caches a materialized graph; wrap the producer in
//! [`resgraph_util::lazy::SingleFlight`] (or use
//! [`result::ResolutionResult::memoized`]) when that is wanted.

pub mod analysis;
pub mod component;
pub mod edge;
pub mod graph;
pub mod result;
pub mod snapshot;
pub mod traverse;
