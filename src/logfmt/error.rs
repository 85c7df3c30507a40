use thiserror::Error;

/// Errors that can occur when decoding a logfmt line
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unexpected '{found}' at position {pos}")]
    UnexpectedChar { found: char, pos: usize },

    #[error("unterminated quoted value starting at position {pos}")]
    UnterminatedQuote { pos: usize },

    #[error("invalid escape sequence '\\{found}' at position {pos}")]
    InvalidEscape { found: char, pos: usize },
}
