//! Errors raised while building AST nodes.

use thiserror::Error;

use crate::cube::{CubeError, PartType};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AstError {
    #[error("axis {0} is out of range, expected 0, 1 or 2")]
    InvalidAxis(usize),

    #[error("a move must select at least one layer")]
    EmptyLayerMask,

    #[error("a move must turn by a non-zero angle")]
    ZeroAngle,

    #[error("cannot mix {expected} and {found} parts in one permutation cycle")]
    MixedPartTypes { expected: PartType, found: PartType },

    #[error("part '{0}' appears more than once in the permutation cycle")]
    DuplicateLocation(String),

    #[error("sign '{sign}' cannot be applied to {part_type} parts")]
    IllegalSign { sign: &'static str, part_type: PartType },

    #[error("a permutation cycle needs at least one part")]
    EmptyCycle,

    #[error(transparent)]
    Part(#[from] CubeError),
}
