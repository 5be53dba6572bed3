//! Location and orientation of every part of an n×n×n cube.

use std::fmt;
use std::sync::Arc;

use super::{CubeError, Geometry, PartType};

const CENTER_LOCATIONS: [usize; 1] = [0];
const CENTER_ORIENTATIONS: [u8; 1] = [0];

/// Arrays of one part category.
///
/// `location` and `orientation` are indexed by part, `part_at` by location.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Parts {
    location: Vec<usize>,
    orientation: Vec<u8>,
    part_at: Vec<usize>,
}

impl Parts {
    fn identity(count: usize) -> Self {
        Self {
            location: (0..count).collect(),
            orientation: vec![0; count],
            part_at: (0..count).collect(),
        }
    }

    fn is_identity(&self) -> bool {
        self.location.iter().enumerate().all(|(part, &loc)| part == loc)
            && self.orientation.iter().all(|&o| o == 0)
    }
}

/// Permutation state of a cube.
///
/// Every mutator keeps each `location` array a permutation of its index range
/// and every orientation below its part type's modulo. Global part numbers
/// list corners first, then edges, then sides, and the center last.
#[derive(Clone)]
pub struct PermutationState {
    geometry: Arc<Geometry>,
    corners: Parts,
    edges: Parts,
    sides: Parts,
}

impl PermutationState {
    /// Solved cube with `layer_count` layers per axis
    pub fn new(layer_count: usize) -> Result<Self, CubeError> {
        let geometry = Geometry::for_layer_count(layer_count)?;
        Ok(Self {
            corners: Parts::identity(geometry.count(PartType::Corner)),
            edges: Parts::identity(geometry.count(PartType::Edge)),
            sides: Parts::identity(geometry.count(PartType::Side)),
            geometry,
        })
    }

    pub fn layer_count(&self) -> usize {
        self.geometry.layer_count()
    }

    pub fn geometry(&self) -> &Arc<Geometry> {
        &self.geometry
    }

    /// Number of parts of one category
    pub fn count(&self, part_type: PartType) -> usize {
        self.geometry.count(part_type)
    }

    /// Number of parts over all categories, center included
    pub fn part_count(&self) -> usize {
        self.corners.location.len() + self.edges.location.len() + self.sides.location.len() + 1
    }

    /// Twist the layers selected by `layer_mask` about `axis`.
    ///
    /// Bit `i` of the mask selects layer `i` counted from the negative face.
    /// Positive angles turn clockwise when viewed from the positive face; the
    /// angle is taken modulo four.
    pub fn transform(&mut self, axis: usize, layer_mask: u32, angle: i32) -> Result<(), CubeError> {
        let layer_count = self.layer_count();
        if axis > 2 {
            return Err(CubeError::InvalidAxis(axis));
        }
        if layer_mask == 0 || u64::from(layer_mask) >= 1u64 << layer_count {
            return Err(CubeError::InvalidLayerMask {
                mask: layer_mask,
                layer_count,
            });
        }
        let (clockwise, turns) = match angle.rem_euclid(4) {
            0 => return Ok(()),
            1 => (true, 1),
            2 => (true, 2),
            _ => (false, 1),
        };

        let geometry = Arc::clone(&self.geometry);
        for part_type in [PartType::Corner, PartType::Edge, PartType::Side] {
            let Some(turn) = geometry.turn(part_type, axis, clockwise) else {
                continue;
            };
            let modulo = part_type.modulo();
            let Some(parts) = self.parts_mut(part_type) else {
                continue;
            };
            for part in 0..parts.location.len() {
                let mut location = parts.location[part];
                if layer_mask & (1 << geometry.layer_of(part_type, location, axis)) == 0 {
                    continue;
                }
                let mut orientation = parts.orientation[part];
                for _ in 0..turns {
                    orientation = (orientation + turn.delta[location]) % modulo;
                    location = turn.target[location];
                }
                parts.location[part] = location;
                parts.orientation[part] = orientation;
            }
            for (part, &location) in parts.location.iter().enumerate() {
                parts.part_at[location] = part;
            }
        }
        Ok(())
    }

    /// Location of every part of a category, indexed by part
    pub fn locations(&self, part_type: PartType) -> &[usize] {
        self.parts(part_type)
            .map_or(&CENTER_LOCATIONS[..], |p| p.location.as_slice())
    }

    /// Orientation of every part of a category, indexed by part
    pub fn orientations(&self, part_type: PartType) -> &[u8] {
        self.parts(part_type)
            .map_or(&CENTER_ORIENTATIONS[..], |p| p.orientation.as_slice())
    }

    /// Replace one category. Nothing is written unless both arrays are valid.
    pub fn set_parts(
        &mut self,
        part_type: PartType,
        location: &[usize],
        orientation: &[u8],
    ) -> Result<(), CubeError> {
        let expected = self.count(part_type);
        for found in [location.len(), orientation.len()] {
            if found != expected {
                return Err(CubeError::LengthMismatch {
                    part_type,
                    expected,
                    found,
                });
            }
        }
        let mut part_at = vec![usize::MAX; expected];
        for (part, &loc) in location.iter().enumerate() {
            match part_at.get_mut(loc) {
                Some(slot) if *slot == usize::MAX => *slot = part,
                _ => return Err(CubeError::NotAPermutation(part_type)),
            }
        }
        let modulo = part_type.modulo();
        if let Some(&value) = orientation.iter().find(|&&o| o >= modulo) {
            return Err(CubeError::OrientationOutOfRange {
                part_type,
                value,
                modulo,
            });
        }

        if let Some(parts) = self.parts_mut(part_type) {
            *parts = Parts {
                location: location.to_vec(),
                orientation: orientation.to_vec(),
                part_at,
            };
        }
        Ok(())
    }

    pub fn set_corners(&mut self, location: &[usize], orientation: &[u8]) -> Result<(), CubeError> {
        self.set_parts(PartType::Corner, location, orientation)
    }

    pub fn set_edges(&mut self, location: &[usize], orientation: &[u8]) -> Result<(), CubeError> {
        self.set_parts(PartType::Edge, location, orientation)
    }

    pub fn set_sides(&mut self, location: &[usize], orientation: &[u8]) -> Result<(), CubeError> {
        self.set_parts(PartType::Side, location, orientation)
    }

    /// Part of a category currently at `location`
    pub fn part_at(&self, part_type: PartType, location: usize) -> Option<usize> {
        match self.parts(part_type) {
            Some(parts) => parts.part_at.get(location).copied(),
            None => (location == 0).then_some(0),
        }
    }

    /// Category and per-category index of a global part number
    pub fn part_type(&self, part: usize) -> Option<(PartType, usize)> {
        let mut index = part;
        for part_type in [PartType::Corner, PartType::Edge, PartType::Side, PartType::Center] {
            let count = self.count(part_type);
            if index < count {
                return Some((part_type, index));
            }
            index -= count;
        }
        None
    }

    /// Global location number of a global part
    pub fn part_location(&self, part: usize) -> Option<usize> {
        let (part_type, index) = self.part_type(part)?;
        let location = *self.locations(part_type).get(index)?;
        Some(part - index + location)
    }

    pub fn part_orientation(&self, part: usize) -> Option<u8> {
        let (part_type, index) = self.part_type(part)?;
        self.orientations(part_type).get(index).copied()
    }

    /// Back to the solved state
    pub fn reset(&mut self) {
        for part_type in [PartType::Corner, PartType::Edge, PartType::Side] {
            let count = self.count(part_type);
            if let Some(parts) = self.parts_mut(part_type) {
                *parts = Parts::identity(count);
            }
        }
    }

    pub fn is_solved(&self) -> bool {
        self.corners.is_identity() && self.edges.is_identity() && self.sides.is_identity()
    }

    fn parts(&self, part_type: PartType) -> Option<&Parts> {
        match part_type {
            PartType::Corner => Some(&self.corners),
            PartType::Edge => Some(&self.edges),
            PartType::Side => Some(&self.sides),
            PartType::Center => None,
        }
    }

    fn parts_mut(&mut self, part_type: PartType) -> Option<&mut Parts> {
        match part_type {
            PartType::Corner => Some(&mut self.corners),
            PartType::Edge => Some(&mut self.edges),
            PartType::Side => Some(&mut self.sides),
            PartType::Center => None,
        }
    }
}

impl PartialEq for PermutationState {
    fn eq(&self, other: &Self) -> bool {
        self.layer_count() == other.layer_count()
            && self.corners == other.corners
            && self.edges == other.edges
            && self.sides == other.sides
    }
}

impl Eq for PermutationState {}

impl fmt::Debug for PermutationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermutationState")
            .field("layer_count", &self.layer_count())
            .field("corners", &self.corners)
            .field("edges", &self.edges)
            .field("sides", &self.sides)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_solved() {
        let state = PermutationState::new(3).unwrap();
        assert!(state.is_solved());
        assert_eq!(state.part_count(), 8 + 12 + 6 + 1);
    }

    #[test]
    fn test_right_turn_cycles_corners() {
        let mut state = PermutationState::new(3).unwrap();
        state.transform(0, 0b100, 1).unwrap();
        // ubr -> drb, drb -> dfr, dfr -> urf, urf -> ubr
        assert_eq!(state.locations(PartType::Corner)[4], 5);
        assert_eq!(state.locations(PartType::Corner)[5], 1);
        assert_eq!(state.locations(PartType::Corner)[1], 0);
        assert_eq!(state.locations(PartType::Corner)[0], 4);
        assert_eq!(state.orientations(PartType::Corner)[4], 2);
        assert_eq!(state.part_at(PartType::Corner, 5), Some(4));
        // left-hand corners stay put
        assert_eq!(state.locations(PartType::Corner)[2], 2);
    }

    #[test]
    fn test_four_quarter_turns_restore() {
        for n in 2..=5 {
            let mut state = PermutationState::new(n).unwrap();
            for axis in 0..3 {
                for _ in 0..4 {
                    state.transform(axis, 0b1, 1).unwrap();
                }
            }
            assert!(state.is_solved(), "layer count {n}");
        }
    }

    #[test]
    fn test_opposite_angles_cancel() {
        let mut state = PermutationState::new(4).unwrap();
        state.transform(1, 0b0110, 1).unwrap();
        assert!(!state.is_solved());
        state.transform(1, 0b0110, -1).unwrap();
        assert!(state.is_solved());
        state.transform(2, 0b1001, 2).unwrap();
        state.transform(2, 0b1001, -2).unwrap();
        assert!(state.is_solved());
    }

    #[test]
    fn test_transform_rejects_invalid_input() {
        let mut state = PermutationState::new(3).unwrap();
        assert_eq!(state.transform(3, 1, 1), Err(CubeError::InvalidAxis(3)));
        assert!(matches!(
            state.transform(0, 0, 1),
            Err(CubeError::InvalidLayerMask { .. })
        ));
        assert!(matches!(
            state.transform(0, 0b1000, 1),
            Err(CubeError::InvalidLayerMask { .. })
        ));
        assert!(state.transform(0, 0b111, 4).is_ok());
        assert!(state.is_solved());
    }

    #[test]
    fn test_set_parts_validates_before_writing() {
        let mut state = PermutationState::new(3).unwrap();
        let swapped = [1, 0, 2, 3, 4, 5, 6, 7];
        assert_eq!(
            state.set_corners(&[0, 0, 2, 3, 4, 5, 6, 7], &[0; 8]),
            Err(CubeError::NotAPermutation(PartType::Corner))
        );
        assert!(matches!(
            state.set_corners(&swapped, &[3, 0, 0, 0, 0, 0, 0, 0]),
            Err(CubeError::OrientationOutOfRange { value: 3, .. })
        ));
        assert!(matches!(
            state.set_edges(&[0, 1], &[0, 0]),
            Err(CubeError::LengthMismatch { expected: 12, found: 2, .. })
        ));
        assert!(state.is_solved());

        state.set_corners(&swapped, &[1, 2, 0, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(state.part_at(PartType::Corner, 0), Some(1));
        assert_eq!(state.part_orientation(1), Some(2));
    }

    #[test]
    fn test_global_part_numbering() {
        let mut state = PermutationState::new(3).unwrap();
        assert_eq!(state.part_type(0), Some((PartType::Corner, 0)));
        assert_eq!(state.part_type(8), Some((PartType::Edge, 0)));
        assert_eq!(state.part_type(20), Some((PartType::Side, 0)));
        assert_eq!(state.part_type(26), Some((PartType::Center, 0)));
        assert_eq!(state.part_type(27), None);

        state.transform(0, 0b100, 1).unwrap();
        assert_eq!(state.part_location(4), Some(5));
        assert_eq!(state.part_location(26), Some(26));
    }

    #[test]
    fn test_reset_and_equality() {
        let mut state = PermutationState::new(3).unwrap();
        let solved = state.clone();
        state.transform(2, 0b001, 1).unwrap();
        assert_ne!(state, solved);
        state.reset();
        assert_eq!(state, solved);
    }
}
