/*!
# JSON Parser

Recursive-descent parser turning a token sequence from the
[`tokenizer`](crate::tokenizer) into a [`Value`] tree.

## Examples

[`parse_value`] parses the value starting at the first token and reports how
many tokens it consumed:

```rust
use jsontree::{parser, tokenizer, Value};

let tokens = tokenizer::lex("[1,2,3]").unwrap();
let (value, consumed) = parser::parse_value(&tokens).unwrap();
let expected = vec![Value::Int(1), Value::Int(2), Value::Int(3)];
assert_eq!(value, Value::Array(expected));
assert_eq!(consumed, 7);
```

## Errors

Any error at any depth aborts the whole parse:

```rust
use jsontree::{parser::{self, ParseError}, tokenizer};

let tokens = tokenizer::lex(r#"{"a":1"#).unwrap();
let result = parser::parse_value(&tokens);
assert!(matches!(result, Err(ParseError::UnterminatedObject)));
```
*/
use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use log::{debug, trace};

use crate::tokenizer::{Token, TokenKind};
use crate::value::Value;

/// Nesting limit used by [`parse_value`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Hard ceiling on [`ParseOptions::max_depth`]. Each nesting level is one
/// recursive call, so larger limits are clamped to this value.
pub const MAX_DEPTH_LIMIT: usize = 512;

/// Limits applied while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of nested arrays/objects, at most [`MAX_DEPTH_LIMIT`].
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Represents errors that can occur while parsing a token sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No tokens to parse a value from.
    EmptyInput,
    /// A token that cannot appear at its position.
    UnexpectedToken(String),
    /// An object member whose key is not a string.
    InvalidSyntax(String),
    /// `[` without a matching `]`.
    UnterminatedArray,
    /// `{` without a matching `}`.
    UnterminatedObject,
    /// Numeric text that does not fit the value it maps to.
    InvalidNumber(String),
    /// Containers nested deeper than [`ParseOptions::max_depth`].
    DepthLimitExceeded(usize),
    /// Tokens left over after the document value.
    TrailingTokens {
        /// Tokens used by the document value
        consumed: usize,
        /// Tokens in the input
        total: usize,
    },
}

impl Error for ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "Empty input"),
            Self::UnexpectedToken(token) => {
                write!(f, "Unexpected token: {token}")
            }
            Self::InvalidSyntax(detail) => {
                write!(f, "Invalid syntax: {detail}")
            }
            Self::UnterminatedArray => write!(f, "Expected end of array"),
            Self::UnterminatedObject => write!(f, "Expected end of object"),
            Self::InvalidNumber(text) => write!(f, "Invalid number: {text}"),
            Self::DepthLimitExceeded(limit) => {
                write!(f, "Nesting deeper than {limit} levels")
            }
            Self::TrailingTokens { consumed, total } => write!(
                f,
                "Unexpected trailing tokens: value ends after {consumed} of \
                 {total} tokens"
            ),
        }
    }
}

/// Recursive-descent state shared by the nested calls of one parse.
struct Parser {
    options: ParseOptions,
}

impl Parser {
    /// Parse the value starting at `tokens[0]`, returning it and the number of
    /// tokens it spans.
    fn value(
        &self,
        tokens: &[Token],
        depth: usize,
    ) -> Result<(Value, usize), ParseError> {
        let token = tokens.first().ok_or(ParseError::EmptyInput)?;
        trace!("parse value at {} {:?}", token.kind(), token.value());

        match token.kind() {
            TokenKind::Symbol => match token.value() {
                "[" => self.array(tokens, self.enter(depth)?),
                "{" => self.object(tokens, self.enter(depth)?),
                ":" | "," => {
                    Err(ParseError::UnexpectedToken(token.value().to_string()))
                }
                // a stray closing bracket stands for its own text
                other => Ok((Value::String(other.to_string()), 1)),
            },
            TokenKind::Keyword => {
                let value = match token.value() {
                    "null" => Value::Null,
                    "true" => Value::Bool(true),
                    "false" => Value::Bool(false),
                    other => {
                        return Err(ParseError::UnexpectedToken(
                            other.to_string(),
                        ));
                    }
                };
                Ok((value, 1))
            }
            TokenKind::Number => Ok((number(token.value())?, 1)),
            TokenKind::String => {
                Ok((Value::String(token.value().to_string()), 1))
            }
        }
    }

    /// Depth of a container opened at `depth`.
    fn enter(&self, depth: usize) -> Result<usize, ParseError> {
        if depth >= self.options.max_depth {
            return Err(ParseError::DepthLimitExceeded(self.options.max_depth));
        }
        Ok(depth + 1)
    }

    /// Parse an array; `tokens[0]` is the opening `[`.
    fn array(
        &self,
        tokens: &[Token],
        depth: usize,
    ) -> Result<(Value, usize), ParseError> {
        let mut elements = Vec::new();
        let mut index = 1;

        while let Some(token) = tokens.get(index) {
            if token.is_symbol("]") {
                return Ok((Value::Array(elements), index + 1));
            }
            if token.is_symbol(",") {
                index += 1;
                continue;
            }
            let (element, consumed) = self.value(&tokens[index..], depth)?;
            elements.push(element);
            index += consumed;
        }

        Err(ParseError::UnterminatedArray)
    }

    /// Parse an object; `tokens[0]` is the opening `{`.
    ///
    /// A string token is skipped when first seen and read back as the key
    /// once the `:` after it is reached.
    fn object(
        &self,
        tokens: &[Token],
        depth: usize,
    ) -> Result<(Value, usize), ParseError> {
        let mut members = HashMap::new();
        let mut index = 1;

        while let Some(token) = tokens.get(index) {
            match token.kind() {
                TokenKind::Symbol if token.value() == "}" => {
                    return Ok((Value::Object(members), index + 1));
                }
                TokenKind::Symbol if token.value() == "," => index += 1,
                TokenKind::String => index += 1,
                TokenKind::Symbol if token.value() == ":" => {
                    let key = &tokens[index - 1];
                    if key.kind() != TokenKind::String {
                        return Err(ParseError::InvalidSyntax(format!(
                            "key must be string, found {}",
                            key.value()
                        )));
                    }
                    let rest = &tokens[index + 1..];
                    if rest.is_empty() {
                        return Err(ParseError::UnterminatedObject);
                    }
                    let (value, consumed) = self.value(rest, depth)?;
                    members.insert(key.value().to_string(), value);
                    index += 1 + consumed;
                }
                _ => {
                    return Err(ParseError::UnexpectedToken(
                        token.value().to_string(),
                    ));
                }
            }
        }

        Err(ParseError::UnterminatedObject)
    }
}

/// Map numeric text to [`Value::Float`] when it contains a `.`, otherwise to
/// [`Value::Int`].
fn number(text: &str) -> Result<Value, ParseError> {
    let parsed = if text.contains('.') {
        text.parse().map(Value::Float).ok()
    } else {
        text.parse().map(Value::Int).ok()
    };
    parsed.ok_or_else(|| ParseError::InvalidNumber(text.to_string()))
}

/// Parse the value starting at the first token, returning the value and the
/// number of tokens consumed. Uses [`DEFAULT_MAX_DEPTH`].
///
/// # Errors
///
/// Returns the first [`ParseError`] encountered at any nesting depth.
pub fn parse_value(tokens: &[Token]) -> Result<(Value, usize), ParseError> {
    parse_value_with(tokens, &ParseOptions::default())
}

/// Like [`parse_value`] with explicit [`ParseOptions`]. A `max_depth` above
/// [`MAX_DEPTH_LIMIT`] is clamped to it.
///
/// # Errors
///
/// Returns the first [`ParseError`] encountered at any nesting depth.
pub fn parse_value_with(
    tokens: &[Token],
    options: &ParseOptions,
) -> Result<(Value, usize), ParseError> {
    let options = ParseOptions {
        max_depth: options.max_depth.min(MAX_DEPTH_LIMIT),
    };
    Parser { options }.value(tokens, 0)
}

/// Parse a whole document: exactly one value spanning every token.
///
/// # Errors
///
/// Returns a [`ParseError`] if the value is malformed or tokens are left over.
pub fn parse_document(
    tokens: &[Token],
    options: &ParseOptions,
) -> Result<Value, ParseError> {
    let (value, consumed) = parse_value_with(tokens, options)?;
    if consumed != tokens.len() {
        return Err(ParseError::TrailingTokens {
            consumed,
            total: tokens.len(),
        });
    }
    debug!(
        "parsed {} of depth {} from {consumed} tokens",
        value.type_name(),
        value.depth()
    );
    Ok(value)
}
