//! Explicit permutation cycles such as `(ubr,bdr,dfr,fur)`.

use std::fmt;

use smol_str::SmolStr;

use super::AstError;
use crate::cube::{CubeError, Face, Geometry, PartType, PermutationState};

/// Extra twist applied when a cycle wraps from its last item to its first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PermutationSign {
    #[default]
    None,
    Plus,
    Minus,
    PlusPlus,
}

impl PermutationSign {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::PlusPlus => "++",
        }
    }

    /// Orientation change for a part type with the given modulo
    pub fn twist(self, modulo: u8) -> u8 {
        match self {
            Self::None => 0,
            Self::Plus => 1 % modulo,
            Self::Minus => (modulo - 1) % modulo,
            Self::PlusPlus => 2 % modulo,
        }
    }

    pub fn negated(self) -> Self {
        match self {
            Self::Plus => Self::Minus,
            Self::Minus => Self::Plus,
            other => other,
        }
    }

    /// The sign a cycle of `part_type` actually stores, or `None` if the
    /// sign makes no sense for that part type.
    fn legalize(self, part_type: PartType) -> Option<Self> {
        match (part_type, self) {
            (_, Self::None) => Some(Self::None),
            (PartType::Corner, Self::Plus | Self::Minus) => Some(self),
            (PartType::Edge, Self::Plus | Self::Minus) => Some(Self::Minus),
            (PartType::Side, _) => Some(self),
            _ => None,
        }
    }
}

impl fmt::Display for PermutationSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One location in a cycle, entered from a given face.
///
/// `orientation` is the index of the first named face in the location's
/// canonical face order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PermutationItem {
    pub part_type: PartType,
    pub location: usize,
    pub orientation: u8,
    /// Faces and disambiguator as written, e.g. `bdr` or `ur2`
    pub name: SmolStr,
}

impl PermutationItem {
    pub fn from_faces(
        geometry: &Geometry,
        faces: &[Face],
        number: Option<usize>,
    ) -> Result<Self, AstError> {
        let (part_type, location, orientation) = geometry.locate(faces, number)?;
        let mut name: String = faces.iter().map(|face| face.letter()).collect();
        if let Some(number) = number {
            name.push_str(&number.to_string());
        }
        Ok(Self {
            part_type,
            location,
            orientation,
            name: SmolStr::new(name),
        })
    }
}

/// Parts moved in a cycle: the part at item `i` goes to item `i + 1`, the
/// part at the last item to the first, twisted by the sign.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PermutationCycle {
    part_type: PartType,
    items: Vec<PermutationItem>,
    sign: PermutationSign,
}

impl PermutationCycle {
    pub fn new(items: Vec<PermutationItem>, sign: PermutationSign) -> Result<Self, AstError> {
        let Some(first) = items.first() else {
            return Err(AstError::EmptyCycle);
        };
        let part_type = first.part_type;
        for (index, item) in items.iter().enumerate() {
            if item.part_type != part_type {
                return Err(AstError::MixedPartTypes {
                    expected: part_type,
                    found: item.part_type,
                });
            }
            if items[..index].iter().any(|other| other.location == item.location) {
                return Err(AstError::DuplicateLocation(item.name.to_string()));
            }
        }
        let sign = sign.legalize(part_type).ok_or(AstError::IllegalSign {
            sign: sign.as_str(),
            part_type,
        })?;
        Ok(Self {
            part_type,
            items,
            sign,
        })
    }

    pub fn part_type(&self) -> PartType {
        self.part_type
    }

    pub fn items(&self) -> &[PermutationItem] {
        &self.items
    }

    pub fn sign(&self) -> PermutationSign {
        self.sign
    }

    /// The cycle that undoes this one
    pub fn inverted(&self) -> Self {
        let mut items = self.items.clone();
        items.reverse();
        let sign = self
            .sign
            .negated()
            .legalize(self.part_type)
            .unwrap_or(PermutationSign::None);
        Self {
            part_type: self.part_type,
            items,
            sign,
        }
    }

    /// Move the parts named by the cycle, then write the category back
    pub fn apply_to(&self, state: &mut PermutationState) -> Result<(), CubeError> {
        let part_type = self.part_type;
        let modulo = part_type.modulo();
        let current = state.orientations(part_type);
        let mut location = state.locations(part_type).to_vec();
        let mut orientation = current.to_vec();

        let len = self.items.len();
        for (index, from) in self.items.iter().enumerate() {
            let to = &self.items[(index + 1) % len];
            let part = state
                .part_at(part_type, from.location)
                .ok_or_else(|| CubeError::NoSuchPart(from.name.to_string()))?;
            let mut twisted =
                (current[part] % modulo + modulo - from.orientation % modulo + to.orientation) % modulo;
            if index + 1 == len {
                twisted = (twisted + self.sign.twist(modulo)) % modulo;
            }
            location[part] = to.location;
            orientation[part] = twisted;
        }
        state.set_parts(part_type, &location, &orientation)
    }
}

impl fmt::Display for PermutationCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.sign)?;
        for (index, item) in self.items.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            f.write_str(&item.name)?;
        }
        f.write_str(")")
    }
}
