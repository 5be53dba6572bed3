//! Script parsing for twisty-puzzle move notation
//!
//! ## Architecture
//!
//! ```text
//! Script text
//!     ↓
//! Tokenizer (trie + logos) → keywords, numbers, words, specials
//!     ↓
//! ScriptParser (backtracking recursive descent, driven by a Notation)
//!     ↓
//! Ast (arena of nodes) → resolved move sequence → PermutationState
//! ```
//!
//! Nothing here knows the spelling of any construct. Which tokens are moves,
//! brackets or operators, and where operators may be placed, is all asked of
//! the [`Notation`].

pub mod errors;
pub mod notation;
mod script;
mod symbol;
mod tokenizer;
mod trie;

pub use errors::{ErrorCode, ParseContext, ParseError, RelatedInfo};
#[cfg(feature = "config")]
pub use notation::{MoveConfig, NotationConfig, NotationError};
pub use notation::{DEFAULT_WHITESPACE, DefaultNotation, Notation};
pub use script::{DEFAULT_MAX_MACRO_DEPTH, DEFAULT_MAX_NESTING_DEPTH, ScriptParser};
pub use symbol::{Symbol, SymbolSet, Syntax};
pub use tokenizer::{Checkpoint, LexerConfig, Token, TokenKind, Tokenizer};
pub use trie::KeywordTrie;

use crate::ast::Ast;

/// Parse `text` with a one-off [`ScriptParser`]
pub fn parse<N: Notation + ?Sized>(text: &str, notation: &N) -> Result<Ast, ParseError> {
    ScriptParser::new(notation).parse(text)
}
