//! Graph description files and settings for graphwalk
//!
//! This crate parses and validates graph files (TOML or JSON), maps node
//! labels to integer ids, and layers CLI settings from the global config
//! file, environment and command line.

pub mod json;
pub mod labels;
pub mod merge;
pub mod toml;

// Re-export main types
pub use labels::{suggest_label, ResolvedGraph};
pub use merge::{ColorChoice, ConfigLoader, ConfigSource, OutputFormat, Settings, SettingsLayering};
pub use toml::{EdgeSpec, GraphFile, GraphSection, NodeRef, DEFAULT_WEIGHT, MAX_NODES};

use graphwalk_core::error::GraphError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, GraphError>;
