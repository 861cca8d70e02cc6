//! Terminal output formatting and utilities.
//!
//! This module provides consistent output formatting across all commands,
//! including colors, JSON documents and error messages.

pub mod colors;
pub mod errors;

use graphwalk_config::{OutputFormat, Settings};
use graphwalk_core::error::{GraphError, GraphResult};
use serde::Serialize;

/// Output handler for consistent terminal formatting
pub struct OutputHandler {
    colors: colors::ColorSupport,
    format: OutputFormat,
}

impl OutputHandler {
    /// Create an output handler from layered settings
    pub fn new(settings: &Settings) -> Self {
        Self {
            colors: colors::ColorSupport::from_choice(settings.color),
            format: settings.format,
        }
    }

    /// Whether results should be emitted as JSON
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    pub fn colors(&self) -> &colors::ColorSupport {
        &self.colors
    }

    /// Print a plain result line
    pub fn line(&self, message: &str) {
        println!("{}", message);
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        println!("{}", self.colors.dim(message));
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        println!("{} {}", self.colors.green("✓"), message);
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        println!("{} {}", self.colors.yellow("⚠"), message);
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", self.colors.red("✗"), message);
    }

    /// Print a value as a pretty JSON document
    pub fn json<T: Serialize>(&self, value: &T) -> GraphResult<()> {
        println!("{}", render_json(value)?);
        Ok(())
    }
}

fn render_json<T: Serialize>(value: &T) -> GraphResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| GraphError::serialization("JSON output", e))
}

impl Default for OutputHandler {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}
