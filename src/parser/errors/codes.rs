//! Error code definitions for parser diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Token errors (unexpected token, bad numbers)
//! - E02xx: Structural errors (unclosed constructs, missing operands, nesting)
//! - E03xx: Ambiguity errors
//! - E04xx: Permutation cycle errors
//! - E05xx: Macro errors

use std::fmt;

/// Error codes for parser diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Token errors
    // =========================================================================
    /// Token cannot start or continue a statement here
    E0101,
    /// Input ended where a token was required
    E0102,
    /// Repetition count or part number out of range
    E0103,

    // =========================================================================
    // E02xx: Structural errors
    // =========================================================================
    /// Construct opened but never closed
    E0201,
    /// Operand missing after an operator
    E0202,
    /// Statements nested too deeply
    E0203,

    // =========================================================================
    // E03xx: Ambiguity errors
    // =========================================================================
    /// More than one construct matches the delimiters seen
    E0301,

    // =========================================================================
    // E04xx: Permutation cycle errors
    // =========================================================================
    /// Sign not allowed for the part type of the cycle
    E0401,
    /// Same location listed twice
    E0402,
    /// Corners, edges and sides mixed in one cycle
    E0403,
    /// Faces that do not name a part
    E0404,
    /// Part number on a cube that has one part per slot
    E0405,
    /// More than one sign in a cycle
    E0406,

    // =========================================================================
    // E05xx: Macro errors
    // =========================================================================
    /// Error inside a macro body
    E0501,
    /// Macros nested too deeply
    E0502,
}

impl ErrorCode {
    /// Get the string representation of the error code (e.g., "E0201")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0103 => "E0103",
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0301 => "E0301",
            Self::E0401 => "E0401",
            Self::E0402 => "E0402",
            Self::E0403 => "E0403",
            Self::E0404 => "E0404",
            Self::E0405 => "E0405",
            Self::E0406 => "E0406",
            Self::E0501 => "E0501",
            Self::E0502 => "E0502",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::E0101 | Self::E0102 | Self::E0103 => "token error",
            Self::E0201 | Self::E0202 | Self::E0203 => "structural error",
            Self::E0301 => "ambiguity error",
            Self::E0401 | Self::E0402 | Self::E0403 | Self::E0404 | Self::E0405 | Self::E0406 => {
                "permutation error"
            }
            Self::E0501 | Self::E0502 => "macro error",
        }
    }

    /// Get the default message template for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::E0101 => "unexpected token",
            Self::E0102 => "unexpected end of input",
            Self::E0103 => "number out of range",
            Self::E0201 => "unclosed construct",
            Self::E0202 => "missing operand",
            Self::E0203 => "statements nested too deeply",
            Self::E0301 => "ambiguous statement",
            Self::E0401 => "illegal permutation sign",
            Self::E0402 => "duplicate permutation item",
            Self::E0403 => "mixed part types in permutation",
            Self::E0404 => "faces do not name a part",
            Self::E0405 => "part number not allowed",
            Self::E0406 => "more than one permutation sign",
            Self::E0501 => "error in macro",
            Self::E0502 => "macros nested too deeply",
        }
    }

    /// Check if this is a structural error (unclosed or incomplete construct)
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::E0201 | Self::E0202 | Self::E0203)
    }

    pub fn is_permutation(&self) -> bool {
        matches!(self.category_description(), "permutation error")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::E0201.as_str(), "E0201");
        assert_eq!(ErrorCode::E0502.as_str(), "E0502");
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(format!("{}", ErrorCode::E0301), "E0301");
    }

    #[test]
    fn test_error_code_default_message() {
        assert_eq!(ErrorCode::E0201.default_message(), "unclosed construct");
        assert_eq!(ErrorCode::E0402.default_message(), "duplicate permutation item");
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::E0202.category_description(), "structural error");
        assert_eq!(ErrorCode::E0301.category_description(), "ambiguity error");
        assert_eq!(ErrorCode::E0405.category_description(), "permutation error");
    }

    #[test]
    fn test_is_structural() {
        assert!(ErrorCode::E0201.is_structural());
        assert!(ErrorCode::E0203.is_structural());
        assert!(!ErrorCode::E0301.is_structural());
        assert!(ErrorCode::E0406.is_permutation());
    }
}
