//! # graphwalk-core
//!
//! Core types shared by the graphwalk engines.
//!
//! This crate provides:
//! - `Edge` and `WeightedEdge` input types over integer node ids
//! - `Adjacency`, the per-node outgoing edge list both engines build on
//! - `GraphError` enum for unified error handling
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Node, weight and edge types
//! - `adjacency`: Validated adjacency list construction
//! - `error`: Error types and result aliases

pub mod adjacency;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use adjacency::Adjacency;
pub use error::{format_cycle, GraphError, GraphResult};
pub use types::{Edge, NodeId, Weight, WeightedEdge};
