/*!
# `jsontree` Library

Converts JSON text into an in-memory [`Value`] tree in two passes: the
[`tokenizer`] turns the whole input into a flat token sequence, then the
[`parser`] rebuilds the nested value from those tokens.

```
use jsontree::Value;

let value = jsontree::parse_str(r#"{"a": [true, null, 2.5]}"#).unwrap();
assert_eq!(
    value.get("a"),
    Some(&Value::Array(vec![Value::Bool(true), Value::Null, Value::Float(2.5)]))
);
```
*/

pub mod commands;
pub mod error;
pub mod parser;
pub mod tokenizer;
pub mod utils;
pub mod value;

// Re-exports
pub use error::Error;
pub use parser::{ParseError, ParseOptions, parse_value};
pub use tokenizer::{LexError, LexOptions, Token, TokenKind, lex};
pub use value::Value;

/// Lex and parse a complete document with default options.
///
/// # Errors
///
/// Returns the first lexing or parsing [`Error`].
pub fn parse_str(text: &str) -> Result<Value, Error> {
    parse_str_with(text, LexOptions::default(), &ParseOptions::default())
}

/// Lex and parse a complete document with explicit options.
///
/// # Errors
///
/// Returns the first lexing or parsing [`Error`].
pub fn parse_str_with(
    text: &str,
    lex_options: LexOptions,
    parse_options: &ParseOptions,
) -> Result<Value, Error> {
    let tokens = tokenizer::lex_with(text, lex_options)?;
    Ok(parser::parse_document(&tokens, parse_options)?)
}
