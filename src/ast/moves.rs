//! Primitive moves.

use std::fmt;

use super::AstError;
use crate::cube::{CubeError, PermutationState};

/// Bring an angle into `{-2, -1, 0, 1, 2}`.
///
/// A half turn keeps the direction it was written in, so `-2` stays `-2`
/// while `6` becomes `2`.
pub fn normalize_angle(angle: i32) -> i32 {
    match angle.rem_euclid(4) {
        0 => 0,
        1 => 1,
        3 => -1,
        _ if angle < 0 => -2,
        _ => 2,
    }
}

/// A twist of one or more layers about one axis.
///
/// The angle is always one of `-2, -1, 1, 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveNode {
    axis: usize,
    layer_mask: u32,
    angle: i32,
}

impl MoveNode {
    pub fn new(axis: usize, layer_mask: u32, angle: i32) -> Result<Self, AstError> {
        if axis > 2 {
            return Err(AstError::InvalidAxis(axis));
        }
        if layer_mask == 0 {
            return Err(AstError::EmptyLayerMask);
        }
        let angle = normalize_angle(angle);
        if angle == 0 {
            return Err(AstError::ZeroAngle);
        }
        Ok(Self {
            axis,
            layer_mask,
            angle,
        })
    }

    pub fn axis(&self) -> usize {
        self.axis
    }

    pub fn layer_mask(&self) -> u32 {
        self.layer_mask
    }

    pub fn angle(&self) -> i32 {
        self.angle
    }

    pub fn inverted(self) -> Self {
        Self {
            angle: normalize_angle(-self.angle),
            ..self
        }
    }

    /// Mirror the layer selection across the middle of the axis
    pub fn reflected(self, layer_count: usize) -> Self {
        let shift = 32 - layer_count.clamp(1, 32) as u32;
        Self {
            layer_mask: self.layer_mask.reverse_bits() >> shift,
            ..self
        }
    }

    pub fn apply_to(&self, state: &mut PermutationState) -> Result<(), CubeError> {
        state.transform(self.axis, self.layer_mask, self.angle)
    }
}

impl fmt::Display for MoveNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:b}:{}", self.axis, self.layer_mask, self.angle)
    }
}
