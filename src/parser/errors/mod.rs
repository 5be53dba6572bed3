//! Errors raised while parsing a script
//!
//! Every [`ParseError`] carries an [`ErrorCode`], the byte range to
//! highlight and, for unclosed brackets, an "opened here" location. Errors
//! inside a macro body are kept as the cause of the error at the macro token.

mod codes;
mod context;
mod error;

pub use codes::ErrorCode;
pub use context::ParseContext;
pub use error::{ParseError, RelatedInfo};
