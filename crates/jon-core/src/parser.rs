//! Recursive-descent parser from token stream to value tree.
//!
//! The grammar is deliberately small: a document is one value; objects and
//! arrays separate their entries with commas or newlines, interchangeably,
//! with any number of separators (including none) between entries and
//! trailing separators allowed. Any value kind is legal at the root, and a
//! document whose first two tokens are `key :` is parsed as an object
//! without surrounding braces — the common shape of a config file.
//!
//! Parsing is a single pass with one token of lookahead (two only for the
//! braceless-root check). Any unexpected token is a fatal [`ParseError`]
//! carrying the offending token's description and span; no partial tree is
//! ever returned.

use crate::error::{JonError, ParseError};
use crate::lexer;
use crate::token::{Token, TokenKind, TokenStream};
use crate::value::{Object, Value};

/// Parse a JON document into a [`Value`] tree.
///
/// This is the main entry point of the crate: it lexes `source` and parses
/// the resulting stream. An empty (or separator-only) document is `null`.
pub fn parse(source: &str) -> Result<Value, JonError> {
    let tokens = lexer::lex(source)?;
    Ok(parse_tokens(tokens)?)
}

/// Parse an already-lexed token stream. The stream must be terminated by an
/// `Eof` token, as produced by [`lexer::lex`].
pub fn parse_tokens(tokens: TokenStream) -> Result<Value, ParseError> {
    Parser { tokens, index: 0 }.document()
}

struct Parser {
    tokens: TokenStream,
    index: usize,
}

impl Parser {
    // Cursor //

    fn peek(&self) -> &Token {
        // The stream is Eof-terminated and the cursor never passes Eof.
        &self.tokens[self.index.min(self.tokens.len() - 1)]
    }

    fn peek2(&self) -> &Token {
        &self.tokens[(self.index + 1).min(self.tokens.len() - 1)]
    }

    fn kind(&self) -> TokenKind {
        self.peek().kind
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    fn bump(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.index += 1;
        }
        token
    }

    fn skip_separators(&mut self) {
        while self.kind().is_separator() {
            self.index += 1;
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token, ParseError> {
        if self.at(kind) {
            Ok(self.bump())
        } else {
            Err(self.expected(what))
        }
    }

    fn expected(&self, what: &str) -> ParseError {
        let token = self.peek();
        ParseError {
            span: token.span,
            message: format!("expected {what}, got {token}"),
        }
    }

    // Grammar //

    fn document(&mut self) -> Result<Value, ParseError> {
        self.skip_separators();
        if self.at(TokenKind::Eof) {
            return Ok(Value::Null);
        }

        // `key: …` at the top level starts a braceless root object.
        let value = if self.at(TokenKind::String) && self.peek2().kind == TokenKind::Colon {
            self.members(TokenKind::Eof)?
        } else {
            self.value()?
        };

        self.skip_separators();
        if !self.at(TokenKind::Eof) {
            return Err(self.expected("end of document"));
        }
        Ok(value)
    }

    fn value(&mut self) -> Result<Value, ParseError> {
        match self.kind() {
            TokenKind::LBrace => self.object(),
            TokenKind::LBracket => self.array(),
            TokenKind::Null => {
                self.bump();
                Ok(Value::Null)
            }
            TokenKind::False => {
                self.bump();
                Ok(Value::Bool(false))
            }
            TokenKind::True => {
                self.bump();
                Ok(Value::Bool(true))
            }
            TokenKind::Nan => {
                self.bump();
                Ok(Value::Float(f64::NAN))
            }
            TokenKind::Inf => {
                self.bump();
                Ok(Value::Float(f64::INFINITY))
            }
            TokenKind::NegInf => {
                self.bump();
                Ok(Value::Float(f64::NEG_INFINITY))
            }
            TokenKind::BinInt | TokenKind::OctInt | TokenKind::HexInt | TokenKind::DecInt => {
                self.int_literal()
            }
            TokenKind::Float => self.float_literal(),
            TokenKind::String => {
                let token = self.bump();
                Ok(Value::String(token.text))
            }
            _ => Err(self.expected("a value")),
        }
    }

    fn object(&mut self) -> Result<Value, ParseError> {
        self.bump(); // `{`
        let object = self.members(TokenKind::RBrace)?;
        self.bump(); // `}`, guaranteed by `members`
        Ok(object)
    }

    /// Parse `key: value` members until `end` — `}` for braced objects,
    /// `Eof` for a braceless root. Duplicate keys: last write wins, the
    /// first occurrence keeps its position.
    fn members(&mut self, end: TokenKind) -> Result<Value, ParseError> {
        let mut object = Object::new();
        loop {
            self.skip_separators();
            if self.at(end) {
                break;
            }
            let key = match self.kind() {
                TokenKind::String => self.bump().text,
                _ if end == TokenKind::RBrace => return Err(self.expected("an object key or `}`")),
                _ => return Err(self.expected("an object key")),
            };
            self.expect(TokenKind::Colon, "`:`")?;
            let value = self.value()?;
            object.insert(key, value);
        }
        Ok(Value::Object(object))
    }

    fn array(&mut self) -> Result<Value, ParseError> {
        self.bump(); // `[`
        let mut values = Vec::new();
        loop {
            self.skip_separators();
            if self.at(TokenKind::RBracket) {
                self.bump();
                break;
            }
            if self.at(TokenKind::Eof) {
                return Err(self.expected("a value or `]`"));
            }
            values.push(self.value()?);
        }
        Ok(Value::Array(values))
    }

    // Literal conversion //

    fn int_literal(&mut self) -> Result<Value, ParseError> {
        let token = self.bump();
        let base = token.int_base().unwrap_or(10);
        match i64::from_str_radix(&token.text, base) {
            Ok(n) => Ok(Value::Int(n)),
            Err(_) => Err(ParseError {
                span: token.span,
                message: format!("{token} is out of the 64-bit signed integer range"),
            }),
        }
    }

    fn float_literal(&mut self) -> Result<Value, ParseError> {
        let token = self.bump();
        match token.text.parse::<f64>() {
            Ok(f) => Ok(Value::Float(f)),
            Err(_) => Err(ParseError {
                span: token.span,
                message: format!("malformed float literal `{}`", token.text),
            }),
        }
    }
}
