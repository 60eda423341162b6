// ABOUTME: Output format abstraction for printing the screen
// ABOUTME: Supports plain text (default) and JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Output Format Abstraction Layer
//!
//! ```rust,no_run
//! use stepgate::formatters::{format_output, OutputFormat};
//! use stepgate::presentation::ScreenView;
//!
//! let view = ScreenView::new(24, true, Vec::new());
//! if let Ok(output) = format_output(&view, OutputFormat::Json) {
//!     println!("{}", output.data);
//! }
//! ```

use crate::presentation::{render_text, ScreenView};
use std::fmt;
use std::str::FromStr;

/// Output serialization format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Labelled rows, as the screen shows them
    #[default]
    Text,
    /// Pretty-printed JSON of the view model
    Json,
}

impl OutputFormat {
    /// Get the format name as a string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }

    /// Get the MIME content type for this format
    #[must_use]
    pub const fn content_type(&self) -> &'static str {
        match self {
            Self::Text => "text/plain; charset=utf-8",
            Self::Json => "application/json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(FormatError {
                message: format!("unknown output format '{other}'"),
                format: Self::default(),
            }),
        }
    }
}

/// Formatted output containing the serialized data and metadata
#[derive(Debug, Clone)]
pub struct FormattedOutput {
    /// The serialized data as a string
    pub data: String,
    /// The format used for serialization
    pub format: OutputFormat,
    /// The MIME content type
    pub content_type: &'static str,
}

/// Error type for formatting operations
#[derive(Debug, Clone)]
pub struct FormatError {
    /// Error message describing what went wrong
    pub message: String,
    /// The format that was being used when the error occurred
    pub format: OutputFormat,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Format error ({}): {}", self.format, self.message)
    }
}

impl std::error::Error for FormatError {}

/// Format the screen view in the requested format
///
/// # Errors
///
/// Returns `FormatError` if JSON serialization fails.
pub fn format_output(view: &ScreenView, format: OutputFormat) -> Result<FormattedOutput, FormatError> {
    let data = match format {
        OutputFormat::Text => render_text(view),
        OutputFormat::Json => serde_json::to_string_pretty(view).map_err(|e| FormatError {
            message: e.to_string(),
            format,
        })?,
    };

    Ok(FormattedOutput {
        data,
        format,
        content_type: format.content_type(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::models::StepRecord;

    #[test]
    fn test_json_output_uses_camel_case() {
        let view = ScreenView::new(
            24,
            true,
            vec![StepRecord::new(5, "2025-01-01T00:00:00.000Z", "2025-01-01T01:00:00.000Z")],
        );
        let output = format_output(&view, OutputFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output.data).unwrap();

        assert_eq!(output.content_type, "application/json");
        assert_eq!(json["actionLabel"], "Adımları Getir");
        assert_eq!(json["rows"][0]["startTime"], "2025-01-01T00:00:00.000Z");
        assert_eq!(json["ready"], true);
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("toon".parse::<OutputFormat>().is_err());
    }
}
