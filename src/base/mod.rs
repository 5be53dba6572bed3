//! Foundation types for the notation engine.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`Position`], [`Span`] - Line/column positions for highlighting
//!
//! This module has NO dependencies on other crate modules.

mod position;

pub use position::{Position, Span};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
pub use text_size;
