//! # JSON Token
//!
//! Defines the tokens produced from a JSON document, along with the constant
//! lookup tables the lexer dispatches on.
use std::fmt::Display;

/// Bytes skipped between tokens.
pub const WHITESPACE: [u8; 5] = [b' ', b'\t', 0x08, b'\n', b'\r'];

/// Single-byte structural symbols.
pub const SYMBOLS: [u8; 6] = *b"[]{},:";

/// Keyword literals, in the order the lexer tries them.
pub const KEYWORDS: [&str; 3] = ["null", "true", "false"];

/// Classification of a [`Token`].
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    /// Quoted string, stored without the quotes
    String,
    /// Numeric literal, stored as its source text
    Number,
    /// One of `[ ] { } , :`
    Symbol,
    /// One of `null`, `true`, `false`
    Keyword,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // `pad` so that width and alignment flags apply
        f.pad(match self {
            Self::String => "STRING",
            Self::Number => "NUMBER",
            Self::Symbol => "SYMBOL",
            Self::Keyword => "KEYWORD",
        })
    }
}

/// A lexical unit: the literal text of the token and its kind.
///
/// Tokens are immutable once built and carry no source position.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    value: String,
    kind: TokenKind,
}

impl Token {
    /// Construct a token of the given kind.
    pub fn new<T: Into<String>>(kind: TokenKind, value: T) -> Self {
        Self {
            value: value.into(),
            kind,
        }
    }

    /// Construct a single-byte structural symbol token.
    #[must_use]
    pub fn symbol(byte: u8) -> Self {
        Self::new(TokenKind::Symbol, char::from(byte))
    }

    /// The literal text of the token.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The kind of the token.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Whether this is the structural symbol `symbol`.
    #[must_use]
    pub fn is_symbol(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Symbol && self.value == symbol
    }
}
