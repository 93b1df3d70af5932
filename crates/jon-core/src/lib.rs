//! # jon-core
//!
//! Parser, writer, and schema validator for **JON** — a relaxed superset of
//! JSON meant for human-written configuration.
//!
//! Compared to JSON, JON adds unquoted keys and bare strings, `//` and
//! nestable `/* */` comments, newlines as entry separators (commas stay
//! legal and optional), trailing separators, binary/octal/hex integer
//! literals with `_` digit separators, `nan`/`inf`/`-inf` float literals,
//! and verbatim multi-line strings via triple quotes. Documents are static
//! data: no expressions, references, or computed values.
//!
//! ## Quick start
//!
//! ```rust
//! use jon_core::{parse, validate};
//!
//! let doc = parse(
//!     "
//!     name: 'demo'
//!     port: 0x1F90
//!     tags: [web, api]
//!     ",
//! )
//! .unwrap();
//! assert_eq!(doc.at("port").unwrap().as_int().unwrap(), 8080);
//!
//! let schema = parse(
//!     "
//!     type: 'object'
//!     props: {
//!         name: {type: 'string'}
//!         port: {type: 'int', maxi: 65535}
//!         tags: {type: 'array', items: {type: 'string'}}
//!     }
//!     ",
//! )
//! .unwrap();
//! assert!(validate(&doc, &schema).is_valid());
//! ```
//!
//! ## Modules
//!
//! - [`lexer`] — source text → token stream
//! - [`parser`] — token stream → [`Value`] tree
//! - [`value`] — the `Value` tree and its typed accessors
//! - [`writer`] — `Value` tree → JON text (`stringify`, `stringify_pretty`)
//! - [`schema`] — declarative validation of one value tree against another
//! - [`json`] — conversion to and from `serde_json::Value`
//! - [`error`] — fatal error types and caret-snippet rendering

pub mod error;
pub mod json;
pub mod lexer;
pub mod parser;
pub mod schema;
pub mod token;
pub mod value;
pub mod writer;

pub use error::{AccessError, JonError, LexError, ParseError, Result};
pub use json::{from_json, to_json};
pub use lexer::lex;
pub use parser::{parse, parse_tokens};
pub use schema::{validate, PathSegment, ValidationResult, Violation};
pub use token::{Span, Token, TokenKind, TokenStream};
pub use value::{Object, Value, ValueKind};
pub use writer::{stringify, stringify_pretty};
