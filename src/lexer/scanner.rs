use super::keywords::KeywordTable;
use super::token::{Position, Span, Token, TokenKind, TokenSequence};
use crate::error::{InternalErrorKind, LispError, Result};
use std::sync::Arc;

/// Source name used when none is given
pub const DEFAULT_SOURCE_NAME: &str = "stdin";

/// Tokenizes `source[0, length)` as a buffer named `stdin`
///
/// Fails with an internal error if `length` exceeds the buffer.
pub fn tokenize(source: &[u8], length: usize) -> Result<TokenSequence> {
    let Some(bytes) = source.get(..length) else {
        return Err(LispError::internal(
            InternalErrorKind::NullReference,
            format!(
                "length {} exceeds source buffer of {} bytes",
                length,
                source.len()
            ),
        ));
    };
    Lexer::default().tokenize(bytes)
}

/// Converts source buffers into token sequences
#[derive(Debug, Clone)]
pub struct Lexer {
    source_name: Arc<str>,
}

impl Default for Lexer {
    fn default() -> Self {
        Lexer::new(DEFAULT_SOURCE_NAME)
    }
}

impl Lexer {
    /// Creates a lexer whose token positions report `source_name`
    pub fn new(source_name: impl Into<Arc<str>>) -> Self {
        Lexer {
            source_name: source_name.into(),
        }
    }

    /// Name stamped into every position
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Scans the whole buffer. The first error aborts the scan.
    pub fn tokenize(&self, source: &[u8]) -> Result<TokenSequence> {
        let source: Arc<[u8]> = Arc::from(source);
        let tokens = Scanner::new(&source, self.source_name.clone()).scan_tokens()?;
        Ok(TokenSequence::new(source, tokens))
    }
}

/// Scanning state for one tokenize call
struct Scanner<'a> {
    source: &'a [u8],
    source_name: Arc<str>,
    tokens: Vec<Token>,
    /// Start of the current token
    start: usize,
    start_line: usize,
    start_column: usize,
    /// Current position in source
    current: usize,
    /// Current line number (0-indexed)
    line: usize,
    /// Offset of the first byte of the current line
    line_start: usize,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a [u8], source_name: Arc<str>) -> Self {
        Scanner {
            source,
            source_name,
            tokens: Vec::new(),
            start: 0,
            start_line: 0,
            start_column: 0,
            current: 0,
            line: 0,
            line_start: 0,
        }
    }

    fn scan_tokens(mut self) -> Result<Vec<Token>> {
        while !self.is_at_end() {
            self.start = self.current;
            self.start_line = self.line;
            self.start_column = self.current - self.line_start;
            self.scan_token()?;
        }

        self.start = self.current;
        self.start_line = self.line;
        self.start_column = self.current - self.line_start;
        self.add_token(TokenKind::Eof);

        Ok(self.tokens)
    }

    fn scan_token(&mut self) -> Result<()> {
        let c = self.advance();

        match c {
            b' ' | b'\t' | b'\r' => {}
            b'\n' => self.newline(),

            b'+' => self.add_token(TokenKind::Plus),
            b'-' => self.add_token(TokenKind::Minus),
            b'*' => self.add_token(TokenKind::Asterisk),
            b'/' => self.add_token(TokenKind::Slash),
            b'(' => self.add_token(TokenKind::LeftParen),
            b')' => self.add_token(TokenKind::RightParen),

            b'"' => self.scan_string()?,
            b';' => self.skip_line_comment(),

            c if c.is_ascii_digit() => self.scan_number(),
            c if c.is_ascii_alphabetic() => self.scan_identifier_or_keyword(),

            _ => {
                return Err(LispError::lexer(self.token_position(), "unrecognized token"));
            }
        }

        Ok(())
    }

    fn newline(&mut self) {
        self.line += 1;
        self.line_start = self.current;
    }

    // The newline itself is left for scan_token so the line counter moves.
    fn skip_line_comment(&mut self) {
        while !self.is_at_end() && self.peek() != b'\n' {
            self.advance();
        }
    }

    fn scan_string(&mut self) -> Result<()> {
        while !self.is_at_end() && self.peek() != b'"' {
            if self.advance() == b'\n' {
                self.newline();
            }
        }

        if self.is_at_end() {
            return Err(LispError::lexer(
                self.current_position(),
                "unterminated string",
            ));
        }

        self.advance(); // Closing "
        self.add_token(TokenKind::String);
        Ok(())
    }

    // `42.` is accepted as a float with an empty fraction.
    fn scan_number(&mut self) {
        self.skip_digits();

        if self.peek() == b'.' {
            self.advance();
            self.skip_digits();
            self.add_token(TokenKind::Float);
        } else {
            self.add_token(TokenKind::Integer);
        }
    }

    fn skip_digits(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }
    }

    fn scan_identifier_or_keyword(&mut self) {
        while self.peek().is_ascii_alphanumeric() {
            self.advance();
        }

        let text = &self.source[self.start..self.current];
        let kind = KeywordTable::global()
            .lookup(text)
            .unwrap_or(TokenKind::Identifier);
        self.add_token(kind);
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> u8 {
        let c = self.source[self.current];
        self.current += 1;
        c
    }

    fn peek(&self) -> u8 {
        if self.is_at_end() {
            0
        } else {
            self.source[self.current]
        }
    }

    fn token_position(&self) -> Position {
        Position::new(self.start_line, self.start_column, self.source_name.clone())
    }

    fn current_position(&self) -> Position {
        Position::new(
            self.line,
            self.current - self.line_start,
            self.source_name.clone(),
        )
    }

    fn add_token(&mut self, kind: TokenKind) {
        let token = Token::new(
            kind,
            self.token_position(),
            Span::new(self.start, self.current),
        );
        self.tokens.push(token);
    }
}
