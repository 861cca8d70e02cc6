//! Error message formatting with actionable suggestions.
//!
//! Provides user-friendly error formatting that includes context,
//! suggestions for fixes, and file locations for syntax errors.

use super::colors::ColorSupport;
use graphwalk_core::error::GraphError;
use std::error::Error;

/// Error formatter with suggestions
pub struct ErrorFormatter {
    colors: ColorSupport,
}

impl ErrorFormatter {
    /// Create a new error formatter
    pub fn new(colors: ColorSupport) -> Self {
        Self { colors }
    }

    /// Format an error with context and suggestions
    pub fn format_error(&self, error: &GraphError) -> String {
        let mut output = String::new();

        // Main error message
        output.push_str(&self.colors.red("error"));
        output.push_str(": ");
        output.push_str(&error.to_string());
        output.push('\n');

        if let GraphError::TomlParse { line, column, .. } = error {
            if *line > 0 {
                output.push_str(&self.format_location(*line, *column));
                output.push('\n');
            }
        }

        // Add suggestion if available
        if let Some(suggestion) = error.suggestion() {
            output.push('\n');
            output.push_str(&self.colors.dim("help"));
            output.push_str(": ");
            output.push_str(suggestion);
            output.push('\n');
        }

        // Add source chain if available
        let mut source = error.source();
        while let Some(err) = source {
            output.push('\n');
            output.push_str(&self.colors.dim("caused by"));
            output.push_str(": ");
            output.push_str(&err.to_string());
            output.push('\n');
            source = err.source();
        }

        output
    }

    /// Format file location context
    pub fn format_location(&self, line: usize, column: usize) -> String {
        format!("{} line {}, column {}", self.colors.dim("-->"), line, column)
    }
}

impl Default for ErrorFormatter {
    fn default() -> Self {
        Self::new(ColorSupport::detect())
    }
}
