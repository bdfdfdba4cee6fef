//! Error types for AsciiDoc conversion

use thiserror::Error;

/// Errors that abort a conversion
///
/// Unresolved references and unclosed emphasis are not errors; they degrade
/// to literal text.
#[derive(Debug, Error)]
pub enum Error {
    /// Input that the called converter cannot accept
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A node kind the writer has no rule for
    #[error("Don't know how to handle node `{kind}`")]
    UnsupportedNode { kind: String },

    /// Reading an HTML fragment into the DOM failed
    #[error("HTML parse error: {0}")]
    Html(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
