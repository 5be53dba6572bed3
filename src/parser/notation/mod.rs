//! Notation: how a script spells moves and constructs
//!
//! The parser only talks to the [`Notation`] trait. [`DefaultNotation`] is
//! the standard cube notation and can be customised through its builder
//! methods or, with the `config` feature, loaded from JSON or YAML.

#[cfg(feature = "config")]
mod config;
mod default;

#[cfg(feature = "config")]
pub use config::{MoveConfig, NotationConfig, NotationError};
pub use default::DefaultNotation;

use super::symbol::{Symbol, Syntax, SymbolSet};
use crate::ast::MoveNode;

/// Whitespace skipped between tokens unless a notation says otherwise
pub const DEFAULT_WHITESPACE: &[char] = &[' ', '\t', '\n', '\r', '\u{000B}', '\u{000C}', '\u{00A0}'];

pub trait Notation {
    /// Layers per axis of the cube this notation describes
    fn layer_count(&self) -> usize;

    /// Everything a token may stand for; empty for unknown tokens
    fn symbols(&self, token: &str) -> SymbolSet;

    /// Whether `construct` may be written with the given placement
    fn is_syntax(&self, construct: Symbol, syntax: Syntax) -> bool;

    fn is_supported(&self, symbol: Symbol) -> bool;

    /// Script text a macro token expands to
    fn macro_text(&self, name: &str) -> Option<&str>;

    /// Move a move token stands for
    fn move_for(&self, token: &str) -> Option<MoveNode>;

    /// Every token of the notation
    fn keywords(&self) -> Vec<&str>;

    /// A token spelling `symbol`, used in hints
    fn token_for(&self, _symbol: Symbol) -> Option<&str> {
        None
    }

    fn whitespace(&self) -> &[char] {
        DEFAULT_WHITESPACE
    }

    fn line_comment(&self) -> Option<&str> {
        None
    }

    fn block_comment(&self) -> Option<(&str, &str)> {
        None
    }
}
