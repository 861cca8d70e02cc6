//! Dependency resolution engine for graphwalk
//!
//! This crate decides whether a set of directed dependencies can be ordered,
//! and produces a valid topological order when it can. Cycles (self-loops
//! included) are reported with one offending cycle path.

pub mod graph;
pub mod layers;

// Re-export main types
pub use graph::{has_cycle, resolve, CycleError, DependencyResolver, TopologicalOrder};
