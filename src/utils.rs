//! Host-side helpers for the `jt` binary: input buffering and colorized
//! output.

use anyhow::Context as _;
use colored::Colorize;
use std::fs;
use std::io::{self, ErrorKind, Read, Write};
use std::path::Path;

use crate::tokenizer::{Token, TokenKind};
use crate::value::Value;

/// Read the whole input into a single buffer: the file at `path`, or all of
/// `reader` when no path is given.
///
/// # Errors
///
/// Returns an error if the input cannot be read or is not valid UTF-8.
pub fn read_input<R: Read>(
    path: Option<&Path>,
    mut reader: R,
) -> anyhow::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path).with_context(|| {
            format!("Failed to read file {}", path.display())
        }),
        None => {
            let mut buffer = String::new();
            reader
                .read_to_string(&mut buffer)
                .context("Failed to read standard input")?;
            Ok(buffer)
        }
    }
}

/// Runs `write` and maps a broken pipe to success, so that piping into tools
/// like `head` exits cleanly.
fn ignore_broken_pipe(
    write: impl FnOnce() -> io::Result<()>,
    what: &'static str,
) -> anyhow::Result<()> {
    match write() {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::BrokenPipe => Ok(()),
        Err(err) => Err(err).context(what),
    }
}

/// Quote and escape `text` as a JSON string literal.
fn quoted(text: &str) -> io::Result<String> {
    serde_json::to_string(text).map_err(io::Error::other)
}

/// Write a parsed value, colorized, followed by a newline.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_colored_value<W: Write>(
    writer: &mut W,
    value: &Value,
    pretty: bool,
) -> anyhow::Result<()> {
    ignore_broken_pipe(
        || {
            write_colored_json(writer, value, 0, pretty)?;
            writeln!(writer)
        },
        "write colorized JSON to stdout",
    )
}

/// Write one token per line: its kind followed by its text.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_tokens<W: Write>(
    writer: &mut W,
    tokens: &[Token],
) -> anyhow::Result<()> {
    ignore_broken_pipe(
        || {
            for token in tokens {
                let kind = format!("{:<8}", token.kind());
                let text = match token.kind() {
                    TokenKind::String => quoted(token.value())?.green(),
                    TokenKind::Number => token.value().yellow(),
                    TokenKind::Keyword => token.value().red(),
                    TokenKind::Symbol => token.value().normal(),
                };
                writeln!(writer, "{}{text}", kind.dimmed())?;
            }
            Ok(())
        },
        "write token stream to stdout",
    )
}

/// Recursively write a JSON value with syntax highlighting.
fn write_colored_json<W: Write>(
    writer: &mut W,
    value: &Value,
    indent: usize,
    pretty: bool,
) -> io::Result<()> {
    let next_indent = indent + 2;

    match value {
        Value::Null => write!(writer, "{}", "null".red().dimmed()),
        Value::Bool(b) => {
            write!(writer, "{}", b.to_string().yellow().bold())
        }
        Value::Int(n) => write!(writer, "{}", n.to_string().yellow()),
        Value::Float(n) => write!(writer, "{}", format!("{n:?}").yellow()),
        Value::String(s) => write!(writer, "{}", quoted(s)?.green()),
        Value::Array(arr) => {
            write!(writer, "[")?;
            for (i, item) in arr.iter().enumerate() {
                if pretty {
                    writeln!(writer)?;
                    write!(writer, "{:width$}", "", width = next_indent)?;
                }
                write_colored_json(writer, item, next_indent, pretty)?;
                if i < arr.len() - 1 {
                    write!(writer, ",")?;
                }
            }
            if pretty && !arr.is_empty() {
                writeln!(writer)?;
                write!(writer, "{:width$}", "", width = indent)?;
            }
            write!(writer, "]")
        }
        Value::Object(obj) => {
            write!(writer, "{{")?;
            // key order is unspecified; sort for stable output
            let mut entries: Vec<_> = obj.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            for (i, (key, val)) in entries.iter().enumerate() {
                if pretty {
                    writeln!(writer)?;
                    write!(writer, "{:width$}", "", width = next_indent)?;
                }
                write!(writer, "{}", quoted(key)?.cyan())?;
                if pretty {
                    write!(writer, ": ")?;
                } else {
                    write!(writer, ":")?;
                }
                write_colored_json(writer, val, next_indent, pretty)?;
                if i < entries.len() - 1 {
                    write!(writer, ",")?;
                }
            }
            if pretty && !entries.is_empty() {
                writeln!(writer)?;
                write!(writer, "{:width$}", "", width = indent)?;
            }
            write!(writer, "}}")
        }
    }
}
