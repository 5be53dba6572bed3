//! Cube geometry: faces, part locations and quarter-turn tables.
//!
//! Part locations are generated from cubie coordinates instead of being
//! written out per cube size. Coordinates are doubled and centred, so on an
//! n-layer cube every coordinate lies in `-(n-1)..=(n-1)` in steps of two.
//! Axis 0 runs from L to R, axis 1 from D to U, axis 2 from B to F.
//!
//! Orientation conventions:
//! - every corner and edge location lists its faces in a canonical order
//!   (U/D face first; corners continue clockwise around the corner, edges
//!   with the remaining face). The orientation of a part is the index of the
//!   face that carries the part's primary sticker.
//! - every side location has a reference tangent; the orientation of a side
//!   part counts clockwise quarter rotations relative to that tangent.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use super::CubeError;

/// Smallest supported cube (2×2×2)
pub const MIN_LAYER_COUNT: usize = 2;
/// Largest supported cube
pub const MAX_LAYER_COUNT: usize = 16;

type Vec3 = [i32; 3];

static GEOMETRIES: Mutex<Vec<Arc<Geometry>>> = parking_lot::const_mutex(Vec::new());

/// One of the six faces of the cube
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Face {
    R,
    U,
    F,
    L,
    D,
    B,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::R, Face::U, Face::F, Face::L, Face::D, Face::B];

    pub fn index(self) -> usize {
        self as usize
    }

    /// The axis this face is perpendicular to
    pub fn axis(self) -> usize {
        match self {
            Face::R | Face::L => 0,
            Face::U | Face::D => 1,
            Face::F | Face::B => 2,
        }
    }

    /// R, U and F lie on the positive end of their axis
    pub fn is_positive(self) -> bool {
        matches!(self, Face::R | Face::U | Face::F)
    }

    pub fn opposite(self) -> Face {
        Face::ALL[(self.index() + 3) % 6]
    }

    pub fn letter(self) -> char {
        match self {
            Face::R => 'r',
            Face::U => 'u',
            Face::F => 'f',
            Face::L => 'l',
            Face::D => 'd',
            Face::B => 'b',
        }
    }

    /// Case-insensitive lookup by face letter
    pub fn from_letter(letter: char) -> Option<Face> {
        match letter.to_ascii_lowercase() {
            'r' => Some(Face::R),
            'u' => Some(Face::U),
            'f' => Some(Face::F),
            'l' => Some(Face::L),
            'd' => Some(Face::D),
            'b' => Some(Face::B),
            _ => None,
        }
    }

    fn normal(self) -> Vec3 {
        let mut v = [0; 3];
        v[self.axis()] = if self.is_positive() { 1 } else { -1 };
        v
    }

    fn from_normal(v: Vec3) -> Option<Face> {
        Face::ALL.into_iter().find(|face| face.normal() == v)
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Category of a puzzle part
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PartType {
    Corner,
    Edge,
    Side,
    Center,
}

impl PartType {
    /// Number of distinct orientations a part of this type can take
    pub fn modulo(self) -> u8 {
        match self {
            PartType::Corner => 3,
            PartType::Edge => 2,
            PartType::Side => 4,
            PartType::Center => 1,
        }
    }

    /// Number of faces that name a part of this type in a permutation cycle
    pub fn face_count(self) -> usize {
        match self {
            PartType::Corner => 3,
            PartType::Edge => 2,
            PartType::Side => 1,
            PartType::Center => 0,
        }
    }

    pub fn from_face_count(count: usize) -> Option<PartType> {
        match count {
            3 => Some(PartType::Corner),
            2 => Some(PartType::Edge),
            1 => Some(PartType::Side),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PartType::Corner => "corner",
            PartType::Edge => "edge",
            PartType::Side => "side",
            PartType::Center => "center",
        }
    }
}

impl fmt::Display for PartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
struct Location {
    position: Vec3,
    /// Canonical face order; a single face for sides
    faces: Vec<Face>,
    /// Reference direction, only meaningful for sides
    tangent: Vec3,
}

/// Where every location of one category goes under a quarter turn of the
/// whole cube, and how much the orientation of the part there changes.
#[derive(Debug)]
pub(crate) struct QuarterTurn {
    pub(crate) target: Vec<usize>,
    pub(crate) delta: Vec<u8>,
}

#[derive(Debug)]
struct Category {
    part_type: PartType,
    locations: Vec<Location>,
    lookup: FxHashMap<Vec3, usize>,
    /// Indexed by `[axis][0 = clockwise, 1 = counter-clockwise]`
    turns: Vec<[QuarterTurn; 2]>,
}

/// Part layout and quarter-turn tables of an n×n×n cube.
///
/// Geometries are immutable and shared; use [`Geometry::for_layer_count`].
#[derive(Debug)]
pub struct Geometry {
    layer_count: usize,
    corners: Category,
    edges: Category,
    sides: Category,
}

impl Geometry {
    /// Shared geometry for a cube with `layer_count` layers per axis
    pub fn for_layer_count(layer_count: usize) -> Result<Arc<Geometry>, CubeError> {
        if !(MIN_LAYER_COUNT..=MAX_LAYER_COUNT).contains(&layer_count) {
            return Err(CubeError::LayerCountOutOfRange(layer_count));
        }
        let mut cache = GEOMETRIES.lock();
        if let Some(geometry) = cache.iter().find(|g| g.layer_count == layer_count) {
            return Ok(Arc::clone(geometry));
        }
        let geometry = Arc::new(Geometry::build(layer_count)?);
        tracing::debug!(layer_count, "built cube geometry");
        cache.push(Arc::clone(&geometry));
        Ok(geometry)
    }

    fn build(layer_count: usize) -> Result<Geometry, CubeError> {
        let b = layer_count as i32 - 1;
        let inner = layer_count.saturating_sub(2);

        let mut corners = Vec::with_capacity(8);
        for [sx, sy, sz] in CORNER_SIGNS {
            let position = [sx * b, sy * b, sz * b];
            let vertical = Face::from_normal([0, sy, 0]);
            let lateral = Face::from_normal([sx, 0, 0]);
            let frontal = Face::from_normal([0, 0, sz]);
            let (Some(f0), Some(mut f1), Some(mut f2)) = (vertical, lateral, frontal) else {
                return Err(CubeError::LayerCountOutOfRange(layer_count));
            };
            if det(f0.normal(), f1.normal(), f2.normal()) != -1 {
                std::mem::swap(&mut f1, &mut f2);
            }
            corners.push(Location {
                position,
                faces: vec![f0, f1, f2],
                tangent: [0; 3],
            });
        }

        let mut edges = Vec::with_capacity(12 * inner);
        for ring in 0..inner {
            for (primary, secondary) in BASE_EDGES {
                let mut position = [0; 3];
                position[primary.axis()] = primary.normal()[primary.axis()] * b;
                position[secondary.axis()] = secondary.normal()[secondary.axis()] * b;
                let free = 3 - primary.axis() - secondary.axis();
                position[free] = inner_coordinate(ring, layer_count);
                edges.push(Location {
                    position,
                    faces: vec![primary, secondary],
                    tangent: [0; 3],
                });
            }
        }

        let mut sides = Vec::with_capacity(6 * inner * inner);
        for slot in 0..inner * inner {
            for face in Face::ALL {
                let axis = face.axis();
                let (a1, a2) = match axis {
                    0 => (1, 2),
                    1 => (0, 2),
                    _ => (0, 1),
                };
                let mut position = [0; 3];
                position[axis] = face.normal()[axis] * b;
                position[a1] = inner_coordinate(slot / inner, layer_count);
                position[a2] = inner_coordinate(slot % inner, layer_count);
                sides.push(Location {
                    position,
                    faces: vec![face],
                    tangent: side_tangent(face),
                });
            }
        }

        Ok(Geometry {
            layer_count,
            corners: Category::new(PartType::Corner, corners)?,
            edges: Category::new(PartType::Edge, edges)?,
            sides: Category::new(PartType::Side, sides)?,
        })
    }

    pub fn layer_count(&self) -> usize {
        self.layer_count
    }

    /// Number of locations (and parts) of a category. There is one center.
    pub fn count(&self, part_type: PartType) -> usize {
        match part_type {
            PartType::Center => 1,
            _ => self.category(part_type).map_or(0, |c| c.locations.len()),
        }
    }

    /// Canonical face order of a location
    pub fn faces(&self, part_type: PartType, location: usize) -> &[Face] {
        self.category(part_type)
            .and_then(|c| c.locations.get(location))
            .map_or(&[][..], |l| l.faces.as_slice())
    }

    /// Name of a location in permutation-cycle notation, e.g. `ubr` or `ur2`
    pub fn location_name(&self, part_type: PartType, location: usize) -> String {
        let mut name: String = self
            .faces(part_type, location)
            .iter()
            .map(|face| face.letter())
            .collect();
        let per_slot = self.parts_per_slot(part_type);
        if per_slot > 1 {
            let slot_count = match part_type {
                PartType::Edge => 12,
                _ => 6,
            };
            name.push_str(&(location / slot_count + 1).to_string());
        }
        if part_type == PartType::Center {
            name.push_str("center");
        }
        name
    }

    /// Layer index of a location along `axis`, counted from the negative face
    pub fn layer_of(&self, part_type: PartType, location: usize, axis: usize) -> usize {
        self.category(part_type)
            .and_then(|c| c.locations.get(location))
            .map_or(0, |l| {
                ((l.position[axis] + self.layer_count as i32 - 1) / 2) as usize
            })
    }

    /// Find the location named by `faces` (and a 1-based disambiguator on
    /// cubes with several parts per slot).
    ///
    /// Returns the part type, the location and the index of `faces[0]` in the
    /// location's canonical face order. The faces must be a rotation of the
    /// canonical order; a mirrored order cannot be realised by a part.
    pub fn locate(
        &self,
        faces: &[Face],
        number: Option<usize>,
    ) -> Result<(PartType, usize, u8), CubeError> {
        let name = describe(faces, number);
        let part_type =
            PartType::from_face_count(faces.len()).ok_or_else(|| CubeError::ImpossiblePart(name.clone()))?;
        let mut axes = [false; 3];
        for face in faces {
            if std::mem::replace(&mut axes[face.axis()], true) {
                return Err(CubeError::ImpossiblePart(name));
            }
        }

        let per_slot = self.parts_per_slot(part_type);
        let index = number.unwrap_or(1);
        if per_slot == 0 || index == 0 || index > per_slot {
            return Err(CubeError::NoSuchPart(name));
        }
        let slot = index - 1;

        let b = self.layer_count as i32 - 1;
        let mut position = [0; 3];
        for face in faces {
            position[face.axis()] = face.normal()[face.axis()] * b;
        }
        let free: Vec<usize> = (0..3).filter(|&axis| !axes[axis]).collect();
        match free.as_slice() {
            [axis] => position[*axis] = inner_coordinate(slot, self.layer_count),
            [a1, a2] => {
                let inner = self.layer_count - 2;
                position[*a1] = inner_coordinate(slot / inner, self.layer_count);
                position[*a2] = inner_coordinate(slot % inner, self.layer_count);
            }
            _ => {}
        }

        let Some(category) = self.category(part_type) else {
            return Err(CubeError::NoSuchPart(name));
        };
        let location = *category
            .lookup
            .get(&position)
            .ok_or_else(|| CubeError::NoSuchPart(name.clone()))?;
        let canonical = &category.locations[location].faces;
        let offset = canonical
            .iter()
            .position(|&face| face == faces[0])
            .ok_or_else(|| CubeError::ImpossiblePart(name.clone()))?;
        let m = canonical.len();
        if (0..m).any(|j| canonical[(offset + j) % m] != faces[j]) {
            return Err(CubeError::ImpossiblePart(name));
        }
        Ok((part_type, location, offset as u8))
    }

    pub(crate) fn turn(&self, part_type: PartType, axis: usize, clockwise: bool) -> Option<&QuarterTurn> {
        let category = self.category(part_type)?;
        let turns = category.turns.get(axis)?;
        Some(&turns[usize::from(!clockwise)])
    }

    fn parts_per_slot(&self, part_type: PartType) -> usize {
        let inner = self.layer_count - 2;
        match part_type {
            PartType::Corner | PartType::Center => 1,
            PartType::Edge => inner,
            PartType::Side => inner * inner,
        }
    }

    fn category(&self, part_type: PartType) -> Option<&Category> {
        match part_type {
            PartType::Corner => Some(&self.corners),
            PartType::Edge => Some(&self.edges),
            PartType::Side => Some(&self.sides),
            PartType::Center => None,
        }
    }
}

impl Category {
    fn new(part_type: PartType, locations: Vec<Location>) -> Result<Category, CubeError> {
        let lookup: FxHashMap<Vec3, usize> = locations
            .iter()
            .enumerate()
            .map(|(index, location)| (location.position, index))
            .collect();
        let mut category = Category {
            part_type,
            locations,
            lookup,
            turns: Vec::with_capacity(3),
        };
        for axis in 0..3 {
            let clockwise = category.quarter_turn(axis, true)?;
            let counter = category.quarter_turn(axis, false)?;
            category.turns.push([clockwise, counter]);
        }
        Ok(category)
    }

    fn quarter_turn(&self, axis: usize, clockwise: bool) -> Result<QuarterTurn, CubeError> {
        let mut target = Vec::with_capacity(self.locations.len());
        let mut delta = Vec::with_capacity(self.locations.len());
        for location in &self.locations {
            let moved = rotate(location.position, axis, clockwise);
            let &to = self
                .lookup
                .get(&moved)
                .ok_or_else(|| CubeError::NoSuchPart(format!("{moved:?}")))?;
            let destination = &self.locations[to];
            let change = if self.part_type == PartType::Side {
                let turned = rotate(location.tangent, axis, clockwise);
                let normal = destination.faces[0].normal();
                let mut tangent = destination.tangent;
                let mut steps = None;
                for k in 0..4u8 {
                    if tangent == turned {
                        steps = Some(k);
                        break;
                    }
                    tangent = cross(tangent, normal);
                }
                steps
            } else {
                let sticker = rotate(location.faces[0].normal(), axis, clockwise);
                Face::from_normal(sticker)
                    .and_then(|face| destination.faces.iter().position(|&f| f == face))
                    .map(|index| index as u8)
            };
            let change = change.ok_or_else(|| CubeError::ImpossiblePart(format!("{moved:?}")))?;
            target.push(to);
            delta.push(change);
        }
        Ok(QuarterTurn { target, delta })
    }
}

const CORNER_SIGNS: [Vec3; 8] = [
    [1, 1, 1],
    [1, -1, 1],
    [-1, 1, 1],
    [-1, -1, 1],
    [1, 1, -1],
    [1, -1, -1],
    [-1, 1, -1],
    [-1, -1, -1],
];

const BASE_EDGES: [(Face, Face); 12] = [
    (Face::U, Face::R),
    (Face::U, Face::F),
    (Face::U, Face::L),
    (Face::U, Face::B),
    (Face::D, Face::R),
    (Face::D, Face::F),
    (Face::D, Face::L),
    (Face::D, Face::B),
    (Face::F, Face::R),
    (Face::F, Face::L),
    (Face::B, Face::R),
    (Face::B, Face::L),
];

/// Doubled, centred coordinate of the `index`-th inner layer
fn inner_coordinate(index: usize, layer_count: usize) -> i32 {
    2 * (index as i32 + 1) - (layer_count as i32 - 1)
}

fn side_tangent(face: Face) -> Vec3 {
    match face {
        Face::U => [0, 0, -1],
        Face::D => [0, 0, 1],
        _ => [0, 1, 0],
    }
}

/// Quarter turn about a coordinate axis, clockwise when viewed from the
/// positive end of the axis.
fn rotate(v: Vec3, axis: usize, clockwise: bool) -> Vec3 {
    let [x, y, z] = v;
    match (axis, clockwise) {
        (0, true) => [x, z, -y],
        (0, false) => [x, -z, y],
        (1, true) => [-z, y, x],
        (1, false) => [z, y, -x],
        (_, true) => [y, -x, z],
        (_, false) => [-y, x, z],
    }
}

fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn det(a: Vec3, b: Vec3, c: Vec3) -> i32 {
    let bc = cross(b, c);
    a[0] * bc[0] + a[1] * bc[1] + a[2] * bc[2]
}

fn describe(faces: &[Face], number: Option<usize>) -> String {
    let mut name: String = faces.iter().map(|face| face.letter()).collect();
    if let Some(number) = number {
        name.push_str(&number.to_string());
    }
    name
}
