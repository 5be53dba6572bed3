//! Notation symbols
//!
//! A [`Symbol`] is one concept of the move notation, independent of how a
//! particular notation spells it. Token symbols are what a token can stand
//! for; construct symbols name the compound statements and carry the syntax
//! placement a notation chooses for them.
//!
//! The declaration order is the rank the parser tries alternatives in.

use std::fmt;

use crate::cube::Face;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Symbol {
    // =========================================================================
    // PRIMARY TOKENS
    // =========================================================================
    Nop = 0,
    Move,
    Macro,

    // =========================================================================
    // OPERATOR TOKENS
    // =========================================================================
    GroupingBegin,
    GroupingEnd,
    InversionBegin,
    InversionEnd,
    InversionOperator,
    ReflectionBegin,
    ReflectionEnd,
    ReflectionOperator,
    RepetitionOperator,
    CommutationBegin,
    CommutationEnd,
    CommutationDelimiter,
    ConjugationBegin,
    ConjugationEnd,
    ConjugationDelimiter,
    RotationBegin,
    RotationEnd,
    RotationDelimiter,
    PermutationBegin,
    PermutationEnd,
    PermutationDelimiter,
    PermutationPlus,
    PermutationMinus,
    PermutationPlusPlus,

    // =========================================================================
    // FACES (permutation items)
    // =========================================================================
    FaceR,
    FaceU,
    FaceF,
    FaceL,
    FaceD,
    FaceB,

    // =========================================================================
    // CONSTRUCTS
    // =========================================================================
    Grouping,
    Inversion,
    Reflection,
    Repetition,
    Commutation,
    Conjugation,
    Rotation,
    Permutation,
}

/// Where the tokens of a construct sit relative to its operands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Syntax {
    /// A token on its own
    Primary,
    /// `op A`
    Prefix,
    /// `A op`
    Suffix,
    /// `begin A end`, binary: `begin A delimiter B end`
    Circumfix,
    /// `begin A end B`
    Precircumfix,
    /// `A begin B end`
    Postcircumfix,
    /// `count op A`, binary: `A delimiter B`
    Preinfix,
    /// `A op count`, binary: `A delimiter B`
    Postinfix,
}

impl Syntax {
    pub const ALL: [Syntax; 8] = [
        Syntax::Primary,
        Syntax::Prefix,
        Syntax::Suffix,
        Syntax::Circumfix,
        Syntax::Precircumfix,
        Syntax::Postcircumfix,
        Syntax::Preinfix,
        Syntax::Postinfix,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Syntax::Primary => "primary",
            Syntax::Prefix => "prefix",
            Syntax::Suffix => "suffix",
            Syntax::Circumfix => "circumfix",
            Syntax::Precircumfix => "precircumfix",
            Syntax::Postcircumfix => "postcircumfix",
            Syntax::Preinfix => "preinfix",
            Syntax::Postinfix => "postinfix",
        }
    }

    pub fn from_name(name: &str) -> Option<Syntax> {
        Syntax::ALL.into_iter().find(|syntax| syntax.name() == name)
    }
}

impl Symbol {
    pub const ALL: [Symbol; 41] = [
        Symbol::Nop,
        Symbol::Move,
        Symbol::Macro,
        Symbol::GroupingBegin,
        Symbol::GroupingEnd,
        Symbol::InversionBegin,
        Symbol::InversionEnd,
        Symbol::InversionOperator,
        Symbol::ReflectionBegin,
        Symbol::ReflectionEnd,
        Symbol::ReflectionOperator,
        Symbol::RepetitionOperator,
        Symbol::CommutationBegin,
        Symbol::CommutationEnd,
        Symbol::CommutationDelimiter,
        Symbol::ConjugationBegin,
        Symbol::ConjugationEnd,
        Symbol::ConjugationDelimiter,
        Symbol::RotationBegin,
        Symbol::RotationEnd,
        Symbol::RotationDelimiter,
        Symbol::PermutationBegin,
        Symbol::PermutationEnd,
        Symbol::PermutationDelimiter,
        Symbol::PermutationPlus,
        Symbol::PermutationMinus,
        Symbol::PermutationPlusPlus,
        Symbol::FaceR,
        Symbol::FaceU,
        Symbol::FaceF,
        Symbol::FaceL,
        Symbol::FaceD,
        Symbol::FaceB,
        Symbol::Grouping,
        Symbol::Inversion,
        Symbol::Reflection,
        Symbol::Repetition,
        Symbol::Commutation,
        Symbol::Conjugation,
        Symbol::Rotation,
        Symbol::Permutation,
    ];

    /// Constructs built from bracket tokens, in rank order
    pub const COMPOUNDS: [Symbol; 6] = [
        Symbol::Grouping,
        Symbol::Inversion,
        Symbol::Reflection,
        Symbol::Commutation,
        Symbol::Conjugation,
        Symbol::Rotation,
    ];

    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Constructs with two operands
    pub fn is_binary(self) -> bool {
        matches!(self, Symbol::Commutation | Symbol::Conjugation | Symbol::Rotation)
    }

    pub fn is_construct(self) -> bool {
        self >= Symbol::Grouping
    }

    pub fn begin(self) -> Option<Symbol> {
        match self {
            Symbol::Grouping => Some(Symbol::GroupingBegin),
            Symbol::Inversion => Some(Symbol::InversionBegin),
            Symbol::Reflection => Some(Symbol::ReflectionBegin),
            Symbol::Commutation => Some(Symbol::CommutationBegin),
            Symbol::Conjugation => Some(Symbol::ConjugationBegin),
            Symbol::Rotation => Some(Symbol::RotationBegin),
            Symbol::Permutation => Some(Symbol::PermutationBegin),
            _ => None,
        }
    }

    pub fn end(self) -> Option<Symbol> {
        match self {
            Symbol::Grouping => Some(Symbol::GroupingEnd),
            Symbol::Inversion => Some(Symbol::InversionEnd),
            Symbol::Reflection => Some(Symbol::ReflectionEnd),
            Symbol::Commutation => Some(Symbol::CommutationEnd),
            Symbol::Conjugation => Some(Symbol::ConjugationEnd),
            Symbol::Rotation => Some(Symbol::RotationEnd),
            Symbol::Permutation => Some(Symbol::PermutationEnd),
            _ => None,
        }
    }

    pub fn delimiter(self) -> Option<Symbol> {
        match self {
            Symbol::Commutation => Some(Symbol::CommutationDelimiter),
            Symbol::Conjugation => Some(Symbol::ConjugationDelimiter),
            Symbol::Rotation => Some(Symbol::RotationDelimiter),
            Symbol::Permutation => Some(Symbol::PermutationDelimiter),
            _ => None,
        }
    }

    pub fn operator(self) -> Option<Symbol> {
        match self {
            Symbol::Inversion => Some(Symbol::InversionOperator),
            Symbol::Reflection => Some(Symbol::ReflectionOperator),
            Symbol::Repetition => Some(Symbol::RepetitionOperator),
            _ => None,
        }
    }

    pub fn face(self) -> Option<Face> {
        match self {
            Symbol::FaceR => Some(Face::R),
            Symbol::FaceU => Some(Face::U),
            Symbol::FaceF => Some(Face::F),
            Symbol::FaceL => Some(Face::L),
            Symbol::FaceD => Some(Face::D),
            Symbol::FaceB => Some(Face::B),
            _ => None,
        }
    }

    pub fn for_face(face: Face) -> Symbol {
        match face {
            Face::R => Symbol::FaceR,
            Face::U => Symbol::FaceU,
            Face::F => Symbol::FaceF,
            Face::L => Symbol::FaceL,
            Face::D => Symbol::FaceD,
            Face::B => Symbol::FaceB,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Symbol::Nop => "nop",
            Symbol::Move => "move",
            Symbol::Macro => "macro",
            Symbol::GroupingBegin => "grouping_begin",
            Symbol::GroupingEnd => "grouping_end",
            Symbol::InversionBegin => "inversion_begin",
            Symbol::InversionEnd => "inversion_end",
            Symbol::InversionOperator => "inversion_operator",
            Symbol::ReflectionBegin => "reflection_begin",
            Symbol::ReflectionEnd => "reflection_end",
            Symbol::ReflectionOperator => "reflection_operator",
            Symbol::RepetitionOperator => "repetition_operator",
            Symbol::CommutationBegin => "commutation_begin",
            Symbol::CommutationEnd => "commutation_end",
            Symbol::CommutationDelimiter => "commutation_delimiter",
            Symbol::ConjugationBegin => "conjugation_begin",
            Symbol::ConjugationEnd => "conjugation_end",
            Symbol::ConjugationDelimiter => "conjugation_delimiter",
            Symbol::RotationBegin => "rotation_begin",
            Symbol::RotationEnd => "rotation_end",
            Symbol::RotationDelimiter => "rotation_delimiter",
            Symbol::PermutationBegin => "permutation_begin",
            Symbol::PermutationEnd => "permutation_end",
            Symbol::PermutationDelimiter => "permutation_delimiter",
            Symbol::PermutationPlus => "permutation_plus",
            Symbol::PermutationMinus => "permutation_minus",
            Symbol::PermutationPlusPlus => "permutation_plusplus",
            Symbol::FaceR => "face_r",
            Symbol::FaceU => "face_u",
            Symbol::FaceF => "face_f",
            Symbol::FaceL => "face_l",
            Symbol::FaceD => "face_d",
            Symbol::FaceB => "face_b",
            Symbol::Grouping => "grouping",
            Symbol::Inversion => "inversion",
            Symbol::Reflection => "reflection",
            Symbol::Repetition => "repetition",
            Symbol::Commutation => "commutation",
            Symbol::Conjugation => "conjugation",
            Symbol::Rotation => "rotation",
            Symbol::Permutation => "permutation",
        }
    }

    pub fn from_name(name: &str) -> Option<Symbol> {
        Symbol::ALL.into_iter().find(|symbol| symbol.name() == name)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of symbols; iterates in rank order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SymbolSet(u64);

impl SymbolSet {
    pub const EMPTY: SymbolSet = SymbolSet(0);

    pub fn of(symbols: &[Symbol]) -> Self {
        symbols.iter().fold(Self::EMPTY, |set, &symbol| set.with(symbol))
    }

    pub fn with(self, symbol: Symbol) -> Self {
        Self(self.0 | (1 << symbol.rank()))
    }

    pub fn without(self, symbol: Symbol) -> Self {
        Self(self.0 & !(1 << symbol.rank()))
    }

    pub fn insert(&mut self, symbol: Symbol) {
        *self = self.with(symbol);
    }

    pub fn contains(self, symbol: Symbol) -> bool {
        self.0 & (1 << symbol.rank()) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn union(self, other: SymbolSet) -> Self {
        Self(self.0 | other.0)
    }

    pub fn intersects(self, other: SymbolSet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn iter(self) -> impl Iterator<Item = Symbol> {
        Symbol::ALL.into_iter().filter(move |&symbol| self.contains(symbol))
    }

    /// Faces named by this set
    pub fn faces(self) -> impl Iterator<Item = Face> {
        self.iter().filter_map(Symbol::face)
    }
}

impl FromIterator<Symbol> for SymbolSet {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, |set, symbol| set.with(symbol))
    }
}
