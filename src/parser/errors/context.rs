//! Parse context tracking for context-aware error messages

/// Construct being parsed when an error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseContext {
    /// At the top level of a script
    Script,
    /// Inside `( ... )`
    Grouping,
    /// Inside `[A, B]`
    Commutation,
    /// Inside `[A: B]`
    Conjugation,
    /// Inside `<A>B`
    Rotation,
    /// A bracketed construct whose kind is not decided yet
    Compound,
    /// Inside a permutation cycle
    Permutation,
    /// Operand of a prefix or infix operator
    Operand,
    /// Body of a macro
    Macro,
}

impl ParseContext {
    /// Get a human-readable description of this context
    pub fn description(&self) -> &'static str {
        match self {
            Self::Script => "at top level",
            Self::Grouping => "in grouping",
            Self::Commutation => "in commutation",
            Self::Conjugation => "in conjugation",
            Self::Rotation => "in rotation",
            Self::Compound => "in bracketed statement",
            Self::Permutation => "in permutation cycle",
            Self::Operand => "in operand",
            Self::Macro => "in macro",
        }
    }

    /// What the parser would have accepted
    pub fn expected_description(&self) -> &'static str {
        match self {
            Self::Script | Self::Macro | Self::Operand => "a move, macro or bracketed statement",
            Self::Grouping | Self::Compound => "a statement, delimiter or closing bracket",
            Self::Commutation | Self::Conjugation | Self::Rotation => {
                "a statement or the closing bracket"
            }
            Self::Permutation => "a face, part number, sign, ',' or the closing bracket",
        }
    }
}
