//! Parse error type
//!
//! Provides rich error information including:
//! - Error codes for categorization
//! - Hints/suggestions for fixes
//! - Related source locations
//! - The inner error of a failed macro expansion

use text_size::{TextRange, TextSize};
use thiserror::Error;

use super::codes::ErrorCode;
use super::context::ParseContext;
use crate::base::Span;

/// Related location information for an error
///
/// Used to point to related source locations, e.g.,
/// "opened here" pointing to the opening `(`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    /// Description of this related location
    pub message: String,
    /// Source range
    pub range: TextRange,
}

impl RelatedInfo {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Error raised when a script cannot be parsed.
///
/// The range is a half-open byte span into the parsed text, precise enough
/// to highlight the offending substring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct ParseError {
    /// Human-readable error message
    pub message: String,
    /// Source location
    pub range: TextRange,
    /// Categorized error code
    pub code: ErrorCode,
    /// Optional suggestion for fixing the error
    pub hint: Option<String>,
    /// Related source locations
    pub related: Vec<RelatedInfo>,
    /// Error inside a macro body; its range is relative to the macro text
    #[source]
    pub cause: Option<Box<ParseError>>,
}

impl ParseError {
    pub fn new(message: impl Into<String>, range: TextRange, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            range,
            code,
            hint: None,
            related: vec![],
            cause: None,
        }
    }

    /// "unexpected X in Y, expected Z"
    pub fn unexpected(found: &str, range: TextRange, context: ParseContext) -> Self {
        let (message, code) = if found.is_empty() {
            (
                format!(
                    "unexpected end of input {}, expected {}",
                    context.description(),
                    context.expected_description()
                ),
                ErrorCode::E0102,
            )
        } else {
            (
                format!(
                    "unexpected '{}' {}, expected {}",
                    found,
                    context.description(),
                    context.expected_description()
                ),
                ErrorCode::E0101,
            )
        };
        Self::new(message, range, code)
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_related(mut self, info: RelatedInfo) -> Self {
        self.related.push(info);
        self
    }

    pub fn with_cause(mut self, cause: ParseError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Byte offset where the error starts
    pub fn start(&self) -> usize {
        usize::from(self.range.start())
    }

    /// Byte offset where the error ends (exclusive)
    pub fn end(&self) -> usize {
        usize::from(self.range.end())
    }

    /// Line/column span of the error in `text`
    pub fn span_in(&self, text: &str) -> Span {
        Span::of_range(text, self.range)
    }

    /// Format the error for display, including hint and macro cause
    pub fn format(&self) -> String {
        let mut result = format!("{}: {}", self.code, self.message);
        if let Some(hint) = &self.hint {
            result.push_str(&format!("\n  hint: {}", hint));
        }
        for info in &self.related {
            result.push_str(&format!(
                "\n  note: {} at {}..{}",
                info.message,
                u32::from(info.range.start()),
                u32::from(info.range.end())
            ));
        }
        if let Some(cause) = &self.cause {
            result.push_str(&format!("\n  caused by {}", cause.format()));
        }
        result
    }
}
