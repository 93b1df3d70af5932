//! JON lexer — a single forward scan from source text to a flat token stream.
//!
//! The scanner has no knowledge of grammar nesting; it only knows lexemes:
//!
//! - Punctuation `, : { } [ ]` and significant newlines (entry separators)
//! - `//` line comments and `/* */` block comments with arbitrary nesting
//! - Verbatim strings: `'…'`, `"…"`, and triple-quoted multi-line strings;
//!   there are no escape sequences in JON
//! - Numbers: `0b`/`0o`/`0x` prefixed integers, decimal integers, and
//!   decimal floats, all with optional `_` digit separators
//! - Bare words, matched against the keyword literals (`null`, `false`,
//!   `true`, `nan`, `inf`, `-inf`) and otherwise emitted as strings — this
//!   is how unquoted object keys and unquoted scalar text arrive
//!
//! One byte of lookahead suffices everywhere except triple-quote detection
//! (two) and numeric prefix detection (one past the sign). Every error here
//! is fatal to the whole scan: no recovery, no partial stream.

use std::borrow::Cow;

use crate::error::LexError;
use crate::token::{Span, Token, TokenKind, TokenStream};

/// Fold Windows line endings so the scanner only ever sees `\n`. Bare `\r`
/// is treated as insignificant whitespace downstream.
pub(crate) fn normalize(source: &str) -> Cow<'_, str> {
    if source.contains("\r\n") {
        Cow::Owned(source.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(source)
    }
}

/// Tokenize a JON document.
///
/// Total over any well-formed UTF-8 input: returns a stream terminated by
/// exactly one `Eof` token, or a fatal [`LexError`] for an unterminated
/// string or block comment or a malformed numeric literal. Token spans are
/// byte offsets into the newline-normalized source.
pub fn lex(source: &str) -> Result<TokenStream, LexError> {
    let source = normalize(source);
    Scanner::new(&source).run()
}

struct Scanner<'src> {
    src: &'src str,
    bytes: &'src [u8],
    index: usize,
    token_start: usize,
    tokens: TokenStream,
}

impl<'src> Scanner<'src> {
    fn new(src: &'src str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            index: 0,
            token_start: 0,
            tokens: TokenStream::new(),
        }
    }

    fn run(mut self) -> Result<TokenStream, LexError> {
        while !self.eof() {
            self.token_start = self.index;
            self.scan_token()?;
        }
        self.tokens
            .push(Token::new(TokenKind::Eof, "", Span::new(self.index, 0)));
        Ok(self.tokens)
    }

    // Cursor //

    fn eof(&self) -> bool {
        self.index >= self.bytes.len()
    }

    fn peek(&self) -> u8 {
        self.bytes.get(self.index).copied().unwrap_or(0)
    }

    fn lookup(&self, dist: usize) -> u8 {
        self.bytes.get(self.index + dist).copied().unwrap_or(0)
    }

    fn advance(&mut self, dist: usize) {
        self.index = (self.index + dist).min(self.bytes.len());
    }

    fn push(&mut self, kind: TokenKind, text: impl Into<String>) {
        let span = Span::new(self.token_start, self.index - self.token_start);
        self.tokens.push(Token::new(kind, text, span));
    }

    // Scanning //

    fn scan_token(&mut self) -> Result<(), LexError> {
        match self.peek() {
            // A `/` that opens no comment is ordinary bare-word text.
            b'/' if matches!(self.lookup(1), b'/' | b'*') => self.scan_comment(),
            b'\'' | b'"' => self.scan_string(),
            b @ (b',' | b':' | b'{' | b'}' | b'[' | b']') => {
                let kind = match b {
                    b',' => TokenKind::Comma,
                    b':' => TokenKind::Colon,
                    b'{' => TokenKind::LBrace,
                    b'}' => TokenKind::RBrace,
                    b'[' => TokenKind::LBracket,
                    _ => TokenKind::RBracket,
                };
                self.advance(1);
                self.push(kind, "");
                Ok(())
            }
            b'\n' => {
                self.advance(1);
                self.push(TokenKind::Newline, "");
                Ok(())
            }
            b' ' | b'\t' | b'\r' => {
                self.advance(1);
                Ok(())
            }
            b => {
                if b.is_ascii_digit()
                    || (matches!(b, b'+' | b'-') && self.lookup(1).is_ascii_digit())
                {
                    self.scan_number()
                } else {
                    self.scan_bare();
                    Ok(())
                }
            }
        }
    }

    fn scan_comment(&mut self) -> Result<(), LexError> {
        if self.lookup(1) == b'*' {
            self.advance(2);
            let mut depth: u32 = 1;
            while depth > 0 {
                if self.eof() {
                    return Err(self.span_error("unterminated block comment"));
                }
                if self.peek() == b'/' && self.lookup(1) == b'*' {
                    depth += 1;
                    self.advance(2);
                } else if self.peek() == b'*' && self.lookup(1) == b'/' {
                    depth -= 1;
                    self.advance(2);
                } else {
                    self.advance(1);
                }
            }
        } else {
            // Line comment; the newline itself stays for the separator token.
            while !self.eof() && self.peek() != b'\n' {
                self.advance(1);
            }
        }
        Ok(())
    }

    fn scan_string(&mut self) -> Result<(), LexError> {
        let quote = self.peek();
        if self.lookup(1) == quote && self.lookup(2) == quote {
            self.scan_multiline_string(quote)
        } else {
            self.scan_normal_string(quote)
        }
    }

    fn scan_normal_string(&mut self, quote: u8) -> Result<(), LexError> {
        self.advance(1);
        let content_start = self.index;
        loop {
            if self.eof() || self.peek() == b'\n' {
                return Err(self.span_error("unterminated string"));
            }
            if self.peek() == quote {
                break;
            }
            self.advance(1);
        }
        let text = self.src[content_start..self.index].to_string();
        self.advance(1);
        self.push(TokenKind::String, text);
        Ok(())
    }

    fn scan_multiline_string(&mut self, quote: u8) -> Result<(), LexError> {
        self.advance(3);
        let content_start = self.index;
        loop {
            if self.eof() {
                return Err(self.span_error("unterminated multi-line string"));
            }
            if self.peek() == quote && self.lookup(1) == quote && self.lookup(2) == quote {
                break;
            }
            self.advance(1);
        }
        let text = self.src[content_start..self.index].to_string();
        self.advance(3);
        self.push(TokenKind::String, text);
        Ok(())
    }

    fn scan_number(&mut self) -> Result<(), LexError> {
        let mut text = String::new();
        let mut signed = false;
        match self.peek() {
            b'+' => {
                signed = true;
                self.advance(1);
            }
            b'-' => {
                signed = true;
                text.push('-');
                self.advance(1);
            }
            _ => {}
        }

        let kind = if self.peek() == b'0' && matches!(self.lookup(1), b'b' | b'B') {
            if signed {
                return Err(self.span_error("signed binary literals are not allowed"));
            }
            self.advance(2);
            self.digits(&mut text, is_bin_digit, "binary digit")?;
            TokenKind::BinInt
        } else if self.peek() == b'0' && matches!(self.lookup(1), b'o' | b'O') {
            if signed {
                return Err(self.span_error("signed octal literals are not allowed"));
            }
            self.advance(2);
            self.digits(&mut text, is_oct_digit, "octal digit")?;
            TokenKind::OctInt
        } else if self.peek() == b'0' && matches!(self.lookup(1), b'x' | b'X') {
            if signed {
                return Err(self.span_error("signed hexadecimal literals are not allowed"));
            }
            self.advance(2);
            self.digits(&mut text, is_hex_digit, "hexadecimal digit")?;
            TokenKind::HexInt
        } else {
            self.digits(&mut text, is_dec_digit, "digit")?;
            if self.peek() == b'.' {
                text.push('.');
                self.advance(1);
                self.digits(&mut text, is_dec_digit, "fractional part of number")?;
                TokenKind::Float
            } else {
                TokenKind::DecInt
            }
        };

        self.push(kind, text);
        Ok(())
    }

    /// Collect digits into `text`, skipping `_` separators. At least one
    /// digit is required at the current position.
    fn digits(
        &mut self,
        text: &mut String,
        accept: fn(u8) -> bool,
        expected: &str,
    ) -> Result<(), LexError> {
        if !accept(self.peek()) {
            return Err(self.expected_error(expected));
        }
        while !self.eof() {
            let b = self.peek();
            if b == b'_' {
                self.advance(1);
                continue;
            }
            if !accept(b) {
                break;
            }
            text.push(b as char);
            self.advance(1);
        }
        Ok(())
    }

    fn scan_bare(&mut self) {
        while !self.eof() && !is_bare_terminator(self.peek()) {
            self.advance(1);
        }
        let src = self.src;
        let word = src[self.token_start..self.index].trim_end();
        let span = Span::new(self.token_start, word.len());
        let token = match word {
            "null" => Token::new(TokenKind::Null, "", span),
            "false" => Token::new(TokenKind::False, "", span),
            "true" => Token::new(TokenKind::True, "", span),
            "nan" => Token::new(TokenKind::Nan, "", span),
            "inf" => Token::new(TokenKind::Inf, "", span),
            "-inf" => Token::new(TokenKind::NegInf, "", span),
            _ => Token::new(TokenKind::String, word, span),
        };
        self.tokens.push(token);
    }

    // Errors //

    /// Error spanning the lexeme scanned so far.
    fn span_error(&self, message: impl Into<String>) -> LexError {
        LexError {
            span: Span::new(self.token_start, (self.index - self.token_start).max(1)),
            message: message.into(),
        }
    }

    /// "expected X, got Y" error pointing at the current character.
    fn expected_error(&self, expected: &str) -> LexError {
        let (got, len) = if self.eof() {
            ("[EOF]".to_string(), 0)
        } else if self.peek() == b'\n' {
            ("new line".to_string(), 1)
        } else {
            let c = self.src[self.index..].chars().next().unwrap_or('\u{fffd}');
            (format!("`{c}`"), c.len_utf8())
        };
        LexError {
            span: Span::new(self.index, len),
            message: format!("expected {expected}, got {got}"),
        }
    }
}

fn is_bin_digit(b: u8) -> bool {
    matches!(b, b'0' | b'1')
}

fn is_oct_digit(b: u8) -> bool {
    matches!(b, b'0'..=b'7')
}

fn is_dec_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

/// Bytes that end a bare word. Spaces do not: `label: two words` keeps the
/// whole right-hand side as one string, trimmed of trailing whitespace.
fn is_bare_terminator(b: u8) -> bool {
    matches!(
        b,
        b',' | b':' | b'{' | b'}' | b'[' | b']' | b'\'' | b'"' | b'\n'
    )
}
