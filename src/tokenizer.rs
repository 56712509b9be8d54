//! # Tokenizer/ Lexer
//!
//! Turns the text of a JSON document into a flat sequence of tokens.
pub mod lexer;
pub mod token;

// Re-exports
pub use lexer::{LexError, LexOptions, lex, lex_with};
pub use token::{Token, TokenKind};
