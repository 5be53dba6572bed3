//! # twisty
//!
//! Move notation for Rubik's-Cube-family puzzles: parse scripts such as
//! `[R, U] (ubr,bdr,dfr,fur) <CU>R2'` into an AST, resolve it lazily into
//! primitive moves and apply those to a permutation model of an
//! `n`-layer cube.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! parser    → Notation, tokenizer, backtracking script parser, ParseError
//!   ↓
//! ast       → Node arena, lazy resolution, move metrics
//!   ↓
//! cube      → Geometry tables, PermutationState
//!   ↓
//! base      → Span/Position, TextRange
//! ```
//!
//! ## Example
//!
//! ```
//! use twisty::{DefaultNotation, PermutationState, ScriptParser};
//!
//! let notation = DefaultNotation::new(3).unwrap();
//! let ast = ScriptParser::new(&notation).parse("[R, U]").unwrap();
//! let mut state = PermutationState::new(3).unwrap();
//! ast.apply_to(&mut state, false).unwrap();
//! ast.apply_to(&mut state, true).unwrap();
//! assert!(state.is_solved());
//! ```

// ============================================================================
// MODULES (dependency order: base → cube → ast → parser)
// ============================================================================

/// Foundation types: TextRange, Span/Position
pub mod base;

/// Cube geometry and permutation state
pub mod cube;

/// Parsed scripts: node arena, resolution, metrics
pub mod ast;

/// Tokenizer, notation and script parser
pub mod parser;

pub use ast::{
    Ast, AstError, MoveMetrics, MoveNode, Node, NodeId, NodeKind, PermutationCycle,
    PermutationItem, PermutationSign, Resolved, ResolvedOp,
};
pub use base::{Position, Span, TextRange, TextSize};
pub use cube::{CubeError, Face, Geometry, PartType, PermutationState};
pub use parser::{DefaultNotation, ErrorCode, Notation, ParseError, ScriptParser, parse};
