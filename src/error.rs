//! Crate-level error combining lexing and parsing failures.
use std::error::Error as StdError;
use std::fmt;

use crate::parser::ParseError;
use crate::tokenizer::LexError;

/// Any error raised while turning text into a [`Value`](crate::Value).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The text could not be tokenized.
    Lex(LexError),
    /// The tokens do not form a value.
    Parse(ParseError),
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Lex(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lex(err) => write!(f, "lexing failed: {err}"),
            Self::Parse(err) => write!(f, "parsing failed: {err}"),
        }
    }
}

impl From<LexError> for Error {
    fn from(err: LexError) -> Self {
        Self::Lex(err)
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}
