//! Error types for level decoding.

use thiserror::Error;

/// A level file that cannot be decoded.
///
/// Every variant that refers to a line carries its 1-based line number.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PersistError {
    /// The file is not valid UTF-8.
    #[error("level file is not valid UTF-8 (first bad byte at offset {offset})")]
    NotUtf8 {
        /// Byte offset of the first invalid sequence.
        offset: usize,
    },
    /// An expected `label=value` token is absent or out of order.
    #[error("line {line}: expected field `{field}`")]
    MissingField {
        /// Line number.
        line: usize,
        /// Label that was expected next.
        field: &'static str,
    },
    /// A value does not parse as the field's number type, or is not finite.
    #[error("line {line}: invalid value `{value}` for field `{field}`")]
    InvalidNumber {
        /// Line number.
        line: usize,
        /// Field label.
        field: &'static str,
        /// The offending text.
        value: String,
    },
    /// `type=` names no living entity kind.
    #[error("line {line}: unknown entity type {raw}")]
    UnknownKind {
        /// Line number.
        line: usize,
        /// The raw value found.
        raw: u16,
    },
    /// `facing=` names no facing.
    #[error("line {line}: unknown facing {raw}")]
    UnknownFacing {
        /// Line number.
        line: usize,
        /// The raw value found.
        raw: i32,
    },
    /// Extra text follows the last field.
    #[error("line {line}: unexpected trailing token `{token}`")]
    TrailingTokens {
        /// Line number.
        line: usize,
        /// First unexpected token.
        token: String,
    },
    /// The last entity line is missing its terminating newline.
    #[error("line {line}: entity record is not newline-terminated")]
    Truncated {
        /// Line number.
        line: usize,
    },
}
