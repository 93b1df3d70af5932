//! Error types and diagnostic rendering.
//!
//! Parsing has exactly two fatal error kinds — [`LexError`] from
//! tokenization and [`ParseError`] from the grammar — both carrying a byte
//! [`Span`] and a message, wrapped by [`JonError`] at the public boundary.
//! Typed access on a value tree fails with [`AccessError`]. Schema
//! validation never errors at all; it returns an accumulated violation list
//! (see [`crate::schema`]).
//!
//! The caret presentation (source line plus a pointer at the offending
//! column) is layered on top of the structured span payload by [`snippet`],
//! so callers that want machine-readable positions use the span and callers
//! that want terminal output use the rendering.

use thiserror::Error;

use crate::token::Span;
use crate::value::ValueKind;

/// Fatal tokenization failure: unterminated string or block comment,
/// malformed numeric literal. The whole lex aborts; no partial stream is
/// returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct LexError {
    pub span: Span,
    pub message: String,
}

/// Fatal grammar failure: an unexpected token where a specific set was
/// required, or an integer literal outside the 64-bit signed range. The
/// whole parse aborts; no partial tree is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ParseError {
    pub span: Span,
    pub message: String,
}

/// Any fatal error produced while turning source text into a value tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JonError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl JonError {
    pub fn span(&self) -> Span {
        match self {
            JonError::Lex(e) => e.span,
            JonError::Parse(e) => e.span,
        }
    }

    /// Render the offending source line with a caret under the error column.
    pub fn snippet(&self, source: &str) -> String {
        snippet(source, self.span(), &self.to_string())
    }
}

/// Failed typed access on a [`crate::Value`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: ValueKind,
        found: ValueKind,
    },
    #[error("key not found: `{0}`")]
    KeyNotFound(String),
}

/// Convenience alias used throughout jon-core.
pub type Result<T> = std::result::Result<T, JonError>;

/// Reconstruct the source line containing `span` and point a caret at its
/// column:
///
/// ```text
/// line 2, column 7:
/// port: 0x
///       ^ expected hexadecimal digit, got new line
/// ```
///
/// `source` must be the text the span was produced from; it is normalized
/// the same way the lexer normalizes it, so offsets line up.
pub fn snippet(source: &str, span: Span, message: &str) -> String {
    let normalized = crate::lexer::normalize(source);
    let source = normalized.as_ref();
    let offset = span.offset.min(source.len());

    let line_start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
    let line_end = source[offset..]
        .find('\n')
        .map_or(source.len(), |i| offset + i);
    let line_no = source[..offset].matches('\n').count() + 1;
    let column = source[line_start..offset].chars().count();

    let line = &source[line_start..line_end];
    format!(
        "line {}, column {}:\n{}\n{}^ {}",
        line_no,
        column + 1,
        line,
        " ".repeat(column),
        message
    )
}
