//! Errors raised by the cube state model.

use thiserror::Error;

use super::PartType;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CubeError {
    #[error("layer count {0} is out of range")]
    LayerCountOutOfRange(usize),

    #[error("axis {0} is out of range, expected 0, 1 or 2")]
    InvalidAxis(usize),

    #[error("layer mask {mask:#b} is not valid for a {layer_count}-layer cube")]
    InvalidLayerMask { mask: u32, layer_count: usize },

    #[error("expected {expected} {part_type} entries, found {found}")]
    LengthMismatch {
        part_type: PartType,
        expected: usize,
        found: usize,
    },

    #[error("{0} locations are not a permutation")]
    NotAPermutation(PartType),

    #[error("{part_type} orientation {value} is not below {modulo}")]
    OrientationOutOfRange {
        part_type: PartType,
        value: u8,
        modulo: u8,
    },

    #[error("script targets a {expected}-layer cube, state has {found} layers")]
    LayerCountMismatch { expected: usize, found: usize },

    #[error("faces '{0}' do not describe a part")]
    ImpossiblePart(String),

    #[error("no part '{0}' on this cube")]
    NoSuchPart(String),
}
