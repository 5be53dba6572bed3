//! Move counting over resolved scripts.

use super::{Ast, MoveNode, ResolvedOp};

/// Turn counts of a resolved move sequence.
///
/// - `block_turns`: contiguous layer blocks turned, whichever of the mask or
///   its complement needs fewer. Whole-cube rotations count zero.
/// - `face_turns`: like block turns, but a block that does not touch an outer
///   layer costs two (it is done by turning the outer layers around it).
/// - `quarter_turns`: face turns weighted by the size of the angle.
///
/// Permutation cycles are not counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveMetrics {
    pub moves: usize,
    pub block_turns: usize,
    pub face_turns: usize,
    pub quarter_turns: usize,
}

impl MoveMetrics {
    pub fn of(ast: &Ast) -> Self {
        Self::from_ops(ast.layer_count(), ast.resolved(false))
    }

    pub fn from_ops<'a>(layer_count: usize, ops: impl IntoIterator<Item = ResolvedOp<'a>>) -> Self {
        let mut metrics = Self::default();
        for op in ops {
            if let ResolvedOp::Move(m) = op {
                metrics.add_move(layer_count, &m);
            }
        }
        metrics
    }

    pub fn add_move(&mut self, layer_count: usize, m: &MoveNode) {
        let all = if layer_count >= 32 {
            u32::MAX
        } else {
            (1u32 << layer_count) - 1
        };
        let mask = m.layer_mask() & all;
        let complement = !mask & all;
        let face_turns = face_cost(mask, layer_count).min(face_cost(complement, layer_count));

        self.moves += 1;
        self.block_turns += runs(mask, layer_count).len().min(runs(complement, layer_count).len());
        self.face_turns += face_turns;
        self.quarter_turns += face_turns * m.angle().unsigned_abs() as usize;
    }
}

/// Contiguous runs of set bits as inclusive `(first, last)` layers
fn runs(mask: u32, layer_count: usize) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;
    for layer in 0..layer_count {
        let selected = mask & (1 << layer) != 0;
        match (selected, start) {
            (true, None) => start = Some(layer),
            (false, Some(first)) => {
                runs.push((first, layer - 1));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(first) = start {
        runs.push((first, layer_count - 1));
    }
    runs
}

fn face_cost(mask: u32, layer_count: usize) -> usize {
    runs(mask, layer_count)
        .into_iter()
        .map(|(first, last)| if first == 0 || last + 1 == layer_count { 1 } else { 2 })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(layer_count: usize, moves: &[(u32, i32)]) -> MoveMetrics {
        let mut metrics = MoveMetrics::default();
        for &(mask, angle) in moves {
            metrics.add_move(layer_count, &MoveNode::new(0, mask, angle).unwrap());
        }
        metrics
    }

    #[test]
    fn test_outer_turn() {
        let m = metrics(3, &[(0b100, 1)]);
        assert_eq!((m.block_turns, m.face_turns, m.quarter_turns), (1, 1, 1));
    }

    #[test]
    fn test_half_turn_counts_two_quarters() {
        assert_eq!(metrics(3, &[(0b001, -2)]).quarter_turns, 2);
    }

    #[test]
    fn test_slice_costs_two_face_turns() {
        let m = metrics(3, &[(0b010, 1)]);
        assert_eq!((m.block_turns, m.face_turns, m.quarter_turns), (1, 2, 2));
    }

    #[test]
    fn test_cube_rotation_is_free() {
        let m = metrics(3, &[(0b111, 1)]);
        assert_eq!(m.moves, 1);
        assert_eq!((m.block_turns, m.face_turns, m.quarter_turns), (0, 0, 0));
    }

    #[test]
    fn test_complement_is_cheaper() {
        // both outer layers of a 4-layer cube: one inner block in the complement
        let m = metrics(4, &[(0b1001, 1)]);
        assert_eq!(m.block_turns, 1);
        assert_eq!(m.face_turns, 2);
    }
}
