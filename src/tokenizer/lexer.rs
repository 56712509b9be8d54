//! # JSON Lexer
//!
//! Scans the text of a JSON document once, left to right, into a sequence of
//! [`Token`]s. The scan never backtracks over emitted tokens; it only looks
//! ahead within the token currently being read.
//!
//! ```
//! use jsontree::tokenizer::{lex, TokenKind};
//!
//! let tokens = lex(r#"{"a": [12, 3.5]}"#).unwrap();
//! assert_eq!(tokens.len(), 9);
//! assert_eq!(tokens[1].kind(), TokenKind::String);
//! assert_eq!(tokens[1].value(), "a");
//! ```
//!
//! The default lexer is deliberately strict: a number may never start with
//! `0`, and string contents are copied verbatim. Both behaviors can be relaxed
//! through [`LexOptions`].
use std::error::Error;
use std::fmt;

use log::{debug, trace};

use crate::tokenizer::token::{KEYWORDS, SYMBOLS, WHITESPACE};
use crate::tokenizer::{Token, TokenKind};

/// Capabilities that relax the default lexer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LexOptions {
    /// Accept a number starting with `0` as long as the next byte is not a
    /// digit, e.g. `0` or `0.25`. `01` is still rejected.
    pub allow_lone_zero: bool,
    /// Decode backslash escapes inside strings. `\uXXXX` is kept verbatim.
    pub decode_escapes: bool,
}

/// Errors that abort lexing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A string was opened but never closed.
    UnterminatedString,
    /// Malformed numeric literal: disallowed leading zero, a sign without
    /// digits, or a `.` without a following digit.
    InvalidNumber(String),
    /// A character that cannot start any token.
    UnexpectedToken {
        /// The offending character
        found: char,
        /// Byte offset of the character in the input
        offset: usize,
    },
    /// Unknown escape sequence, only reported when decoding escapes.
    InvalidEscape(char),
}

impl Error for LexError {}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedString => write!(f, "Unterminated string"),
            Self::InvalidNumber(text) => write!(f, "Invalid number: {text}"),
            Self::UnexpectedToken { found, offset } => {
                write!(f, "Unexpected token {found:?} at byte {offset}")
            }
            Self::InvalidEscape(c) => {
                write!(f, "Invalid escape sequence: \\{c}")
            }
        }
    }
}

/// A lexer over the bytes of a single, fully buffered JSON document.
struct Lexer<'a> {
    /// The input text, used for slicing token values
    text: &'a str,
    /// The input as bytes, used for dispatch
    input: &'a [u8],
    /// Current position (byte under examination)
    position: usize,
    options: LexOptions,
}

impl<'a> Lexer<'a> {
    const fn new(text: &'a str, options: LexOptions) -> Self {
        Self {
            text,
            input: text.as_bytes(),
            position: 0,
            options,
        }
    }

    /// The byte under examination, `None` at end of input.
    fn current(&self) -> Option<u8> {
        self.peek(0)
    }

    /// The byte `offset` bytes past the current position.
    fn peek(&self, offset: usize) -> Option<u8> {
        self.input.get(self.position + offset).copied()
    }

    /// The full character starting at byte `offset`, for diagnostics.
    fn char_at(&self, offset: usize) -> char {
        self.text
            .get(offset..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    /// Run the scan to completion.
    fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while let Some(byte) = self.current() {
            trace!("dispatch {:?} at {}", char::from(byte), self.position);
            match byte {
                b'"' => tokens.push(self.read_string()?),
                b'-' | b'0'..=b'9' => tokens.push(self.read_number()?),
                b if SYMBOLS.contains(&b) => {
                    tokens.push(Token::symbol(b));
                    self.position += 1;
                }
                b if WHITESPACE.contains(&b) => self.position += 1,
                _ => tokens.push(self.read_keyword()?),
            }
        }

        Ok(tokens)
    }

    /// Reads a quoted string and returns a STRING token holding its content.
    fn read_string(&mut self) -> Result<Token, LexError> {
        // skip opening quote
        self.position += 1;
        let start = self.position;

        if self.options.decode_escapes {
            return self.read_escaped_string(start);
        }

        let closing = self.input[start..].iter().position(|&b| b == b'"');
        let Some(len) = closing else {
            return Err(LexError::UnterminatedString);
        };
        let end = start + len;
        self.position = end + 1;

        Ok(Token::new(TokenKind::String, &self.text[start..end]))
    }

    /// Reads the rest of a string starting at `start`, decoding escapes.
    fn read_escaped_string(&mut self, start: usize) -> Result<Token, LexError> {
        let mut content = String::new();
        // start of the run of bytes not yet copied into `content`
        let mut run_start = start;

        while let Some(byte) = self.current() {
            match byte {
                b'"' => {
                    content.push_str(&self.text[run_start..self.position]);
                    self.position += 1;
                    return Ok(Token::new(TokenKind::String, content));
                }
                b'\\' => {
                    let escaped =
                        self.peek(1).ok_or(LexError::UnterminatedString)?;
                    if escaped == b'u' {
                        self.position += 2;
                        continue;
                    }
                    let decoded = unescape(escaped).ok_or_else(|| {
                        LexError::InvalidEscape(self.char_at(self.position + 1))
                    })?;
                    content.push_str(&self.text[run_start..self.position]);
                    content.push(decoded);
                    self.position += 2;
                    run_start = self.position;
                }
                _ => self.position += 1,
            }
        }

        Err(LexError::UnterminatedString)
    }

    /// Reads a numeric literal and returns a NUMBER token.
    ///
    /// The token ends at the first byte that is neither a digit nor the first
    /// digit-flanked `.`; that byte is left for the next dispatch.
    fn read_number(&mut self) -> Result<Token, LexError> {
        let start = self.position;

        if self.current() == Some(b'0') && !self.lone_zero_allowed() {
            return Err(LexError::InvalidNumber(self.digits_from(start)));
        }

        // optional leading '-'
        if self.current() == Some(b'-') {
            self.position += 1;
            if !self.current().is_some_and(|b| b.is_ascii_digit()) {
                let text = &self.text[start..self.position];
                return Err(LexError::InvalidNumber(text.to_string()));
            }
        }

        // first digit
        self.position += 1;

        let mut seen_period = false;
        while let Some(byte) = self.current() {
            match byte {
                b'0'..=b'9' => self.position += 1,
                // the byte before is always a digit here
                b'.' if !seen_period => {
                    if !self.peek(1).is_some_and(|b| b.is_ascii_digit()) {
                        return Err(LexError::InvalidNumber(
                            self.text[start..=self.position].to_string(),
                        ));
                    }
                    seen_period = true;
                    self.position += 1;
                }
                _ => break,
            }
        }

        Ok(Token::new(TokenKind::Number, &self.text[start..self.position]))
    }

    fn lone_zero_allowed(&self) -> bool {
        self.options.allow_lone_zero
            && !self.peek(1).is_some_and(|b| b.is_ascii_digit())
    }

    /// The run of digits starting at `start`, used to report a bad literal.
    fn digits_from(&self, start: usize) -> String {
        let len = self.input[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        self.text[start..start + len].to_string()
    }

    /// Reads one of the keyword literals `null`, `true`, or `false`.
    fn read_keyword(&mut self) -> Result<Token, LexError> {
        let rest = &self.input[self.position..];
        match KEYWORDS.iter().find(|kw| rest.starts_with(kw.as_bytes())) {
            Some(keyword) => {
                self.position += keyword.len();
                Ok(Token::new(TokenKind::Keyword, *keyword))
            }
            None => Err(LexError::UnexpectedToken {
                found: self.char_at(self.position),
                offset: self.position,
            }),
        }
    }
}

/// Maps the byte after a backslash to the character it stands for.
const fn unescape(byte: u8) -> Option<char> {
    match byte {
        b'"' => Some('"'),
        b'\\' => Some('\\'),
        b'/' => Some('/'),
        b'b' => Some('\u{08}'),
        b'f' => Some('\u{0C}'),
        b'n' => Some('\n'),
        b'r' => Some('\r'),
        b't' => Some('\t'),
        _ => None,
    }
}

/// Tokenize a JSON document with the default, strict options.
///
/// # Errors
///
/// Returns the first [`LexError`] encountered; no partial token sequence is
/// produced.
pub fn lex(text: &str) -> Result<Vec<Token>, LexError> {
    lex_with(text, LexOptions::default())
}

/// Tokenize a JSON document with the given options.
///
/// # Errors
///
/// Returns the first [`LexError`] encountered; no partial token sequence is
/// produced.
pub fn lex_with(
    text: &str,
    options: LexOptions,
) -> Result<Vec<Token>, LexError> {
    let tokens = Lexer::new(text, options).tokenize()?;
    debug!("lexed {} bytes into {} tokens", text.len(), tokens.len());
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(Token::value).collect()
    }

    #[test]
    fn test_empty() {
        let tokens = lex("").unwrap();
        assert!(tokens.is_empty());

        let tokens = lex(" \t\n\r\u{08}").unwrap();
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_keywords() {
        let tokens = lex("null true false").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Keyword, "null"),
                Token::new(TokenKind::Keyword, "true"),
                Token::new(TokenKind::Keyword, "false"),
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_only() {
        // the keyword is matched by prefix; the rest is lexed separately
        let result = lex("nullx");
        assert_eq!(
            result,
            Err(LexError::UnexpectedToken {
                found: 'x',
                offset: 4
            })
        );
    }

    #[test]
    fn test_misspelled_keyword() {
        let result = lex("[tru]");
        assert_eq!(
            result,
            Err(LexError::UnexpectedToken {
                found: 't',
                offset: 1
            })
        );
    }

    #[test]
    fn test_symbols() {
        let tokens = lex("[ ] { } , :").unwrap();
        assert_eq!(values(&tokens), vec!["[", "]", "{", "}", ",", ":"]);
        assert!(tokens.iter().all(|t| t.kind() == TokenKind::Symbol));
    }

    #[test]
    fn test_number_variants() {
        let cases = [
            ("1", "1"),
            ("-0", "-0"),
            ("123", "123"),
            ("-123", "-123"),
            ("3.14", "3.14"),
            ("-10.05", "-10.05"),
        ];
        for (input, expected) in cases {
            let tokens = lex(input).unwrap();
            assert_eq!(
                tokens,
                vec![Token::new(TokenKind::Number, expected)],
                "input: {input}"
            );
        }
    }

    #[test]
    fn test_number_terminator_is_next_token() {
        let tokens = lex("[12,3]").unwrap();
        assert_eq!(values(&tokens), vec!["[", "12", ",", "3", "]"]);
        assert_eq!(tokens[1].kind(), TokenKind::Number);
    }

    #[test]
    fn test_leading_zero_rejected() {
        // current behavior: even the lone literal `0` is rejected
        assert_eq!(lex("0"), Err(LexError::InvalidNumber("0".to_string())));
        assert_eq!(lex("[0.5]"), Err(LexError::InvalidNumber("0".to_string())));
        assert_eq!(lex("012"), Err(LexError::InvalidNumber("012".to_string())));
    }

    #[test]
    fn test_lone_zero_option() {
        let options = LexOptions {
            allow_lone_zero: true,
            ..LexOptions::default()
        };
        assert_eq!(values(&lex_with("0", options).unwrap()), vec!["0"]);
        assert_eq!(
            values(&lex_with("[0.25]", options).unwrap()),
            vec!["[", "0.25", "]"]
        );
        assert_eq!(
            lex_with("01", options),
            Err(LexError::InvalidNumber("01".to_string()))
        );
    }

    #[test]
    fn test_period_requires_digits() {
        assert_eq!(lex("1."), Err(LexError::InvalidNumber("1.".to_string())));
        assert_eq!(lex("[1.]"), Err(LexError::InvalidNumber("1.".to_string())));
    }

    #[test]
    fn test_second_period_ends_token() {
        let result = lex("1.2.3");
        assert_eq!(
            result,
            Err(LexError::UnexpectedToken {
                found: '.',
                offset: 3
            })
        );
    }

    #[test]
    fn test_bare_minus() {
        assert_eq!(lex("-"), Err(LexError::InvalidNumber("-".to_string())));
        assert_eq!(lex("[-]"), Err(LexError::InvalidNumber("-".to_string())));
    }

    #[test]
    fn test_string() {
        let tokens = lex(r#""hello world""#).unwrap();
        assert_eq!(tokens, vec![Token::new(TokenKind::String, "hello world")]);
    }

    #[test]
    fn test_string_keeps_backslashes() {
        let tokens = lex(r#""a\nb""#).unwrap();
        assert_eq!(tokens, vec![Token::new(TokenKind::String, r"a\nb")]);
    }

    #[test]
    fn test_string_non_ascii() {
        let tokens = lex("[\"héllo\", \"日本\"]").unwrap();
        assert_eq!(values(&tokens), vec!["[", "héllo", ",", "日本", "]"]);
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(lex("\"unterminated"), Err(LexError::UnterminatedString));
    }

    #[test]
    fn test_unexpected_character() {
        assert_eq!(
            lex("[1, @]"),
            Err(LexError::UnexpectedToken { found: '@', offset: 4 })
        );
        assert_eq!(
            lex("é"),
            Err(LexError::UnexpectedToken { found: 'é', offset: 0 })
        );
    }

    #[test]
    fn test_escape_sequences() {
        let options = LexOptions {
            decode_escapes: true,
            ..LexOptions::default()
        };
        let cases = [
            (r#""Test \"quoted\" text""#, "Test \"quoted\" text"),
            (r#""Backslash: \\""#, "Backslash: \\"),
            (r#""Forward slash: \/""#, "Forward slash: /"),
            (r#""Backspace: \b""#, "Backspace: \u{08}"),
            (r#""Form feed: \f""#, "Form feed: \u{0C}"),
            (r#""Newline: \n""#, "Newline: \n"),
            (r#""Carriage return: \r""#, "Carriage return: \r"),
            (r#""Tab: \t""#, "Tab: \t"),
            (r#""Unicode: \u0041""#, r"Unicode: \u0041"),
        ];

        for (input, expected) in cases {
            let tokens = lex_with(input, options).unwrap();
            assert_eq!(
                tokens,
                vec![Token::new(TokenKind::String, expected)],
                "input: {input}"
            );
        }
    }

    #[test]
    fn test_invalid_escape() {
        let options = LexOptions {
            decode_escapes: true,
            ..LexOptions::default()
        };
        assert_eq!(
            lex_with(r#""\q""#, options),
            Err(LexError::InvalidEscape('q'))
        );
        assert_eq!(
            lex_with(r#""abc\"#, options),
            Err(LexError::UnterminatedString)
        );
        assert_eq!(
            lex_with(r#""abc\""#, options),
            Err(LexError::UnterminatedString)
        );
    }

    #[test]
    fn test_escaped_quote_without_decoding() {
        // without decoding, the first quote closes the string
        let result = lex(r#""a\"b""#);
        assert_eq!(
            result,
            Err(LexError::UnexpectedToken {
                found: 'b',
                offset: 4
            })
        );
    }

    #[test]
    fn test_document() {
        let tokens = lex(r#"{"a":1,"b":[true,null]}"#).unwrap();
        let kinds: Vec<TokenKind> = tokens.iter().map(Token::kind).collect();
        assert_eq!(
            values(&tokens),
            vec![
                "{", "a", ":", "1", ",", "b", ":", "[", "true", ",", "null",
                "]", "}"
            ]
        );
        assert_eq!(kinds[1], TokenKind::String);
        assert_eq!(kinds[3], TokenKind::Number);
        assert_eq!(kinds[8], TokenKind::Keyword);
    }
}
