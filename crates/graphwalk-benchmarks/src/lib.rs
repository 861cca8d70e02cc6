//! graphwalk benchmarking suite
//!
//! Benchmarks for dependency resolution, shortest paths and graph file
//! parsing.

pub mod common;

pub use common::*;
