use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

/// Where a token or lexeme begins
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Line number (0-indexed)
    pub line: usize,
    /// Byte offset from the start of the line (0-indexed)
    pub column: usize,
    /// Name of the buffer the token was read from
    pub source_name: Arc<str>,
}

impl Position {
    /// Creates a new position
    pub fn new(line: usize, column: usize, source_name: Arc<str>) -> Self {
        Position {
            line,
            column,
            source_name,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.source_name, self.line, self.column)
    }
}

/// Half-open byte range `[start, end)` into a source buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// First byte of the lexeme
    pub start: usize,
    /// One past the last byte of the lexeme
    pub end: usize,
}

impl Span {
    /// Creates a new span; `start` must not exceed `end`
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Span { start, end }
    }

    /// Number of bytes covered
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for the zero-width span of the end-of-stream token
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A single token from the source code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The type of token
    pub kind: TokenKind,
    /// Where the token begins
    pub position: Position,
    /// Byte range of the token text in the scanned buffer
    pub lexeme: Span,
}

impl Token {
    /// Creates a new token with the given properties
    pub fn new(kind: TokenKind, position: Position, lexeme: Span) -> Self {
        Token {
            kind,
            position,
            lexeme,
        }
    }
}

/// All possible token types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Operators
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Asterisk,
    /// `/`
    Slash,

    // Delimiters
    /// `(`
    LeftParen,
    /// `)`
    RightParen,

    // Keywords
    /// `define`
    Define,
    /// `var`
    Var,
    /// `lambda`
    Lambda,
    /// `if`
    If,
    /// `nil`
    Nil,
    /// `false`
    False,
    /// `true`
    True,

    // Literals
    /// Digit run
    Integer,
    /// Digit run, a dot, and an optional digit run
    Float,
    /// Double-quoted text, quotes included in the lexeme
    String,

    /// Alphanumeric run that is not a keyword
    Identifier,

    /// End of stream marker
    Eof,
}

impl TokenKind {
    /// Check if token is one of the four arithmetic operators
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Plus | TokenKind::Minus | TokenKind::Asterisk | TokenKind::Slash
        )
    }

    /// Check if token is a keyword
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Define
                | TokenKind::Var
                | TokenKind::Lambda
                | TokenKind::If
                | TokenKind::Nil
                | TokenKind::False
                | TokenKind::True
        )
    }

    /// Check if token can stand on its own as a literal expression
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::Integer
                | TokenKind::Float
                | TokenKind::String
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Nil
        )
    }

    /// Upper-case name used in token dumps
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Asterisk => "ASTERISK",
            TokenKind::Slash => "SLASH",
            TokenKind::LeftParen => "LPAREN",
            TokenKind::RightParen => "RPAREN",
            TokenKind::Define => "DEFINE",
            TokenKind::Var => "VAR",
            TokenKind::Lambda => "LAMBDA",
            TokenKind::If => "IF",
            TokenKind::Nil => "NIL",
            TokenKind::False => "BOOLEAN(FALSE)",
            TokenKind::True => "BOOLEAN(TRUE)",
            TokenKind::Integer => "INTEGER",
            TokenKind::Float => "FLOAT",
            TokenKind::String => "STRING",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered tokens of one scanned buffer, terminated by exactly one [`TokenKind::Eof`]
///
/// The sequence shares ownership of the buffer it was scanned from, so every
/// [`Span`] it hands out stays valid for as long as the sequence is alive.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenSequence {
    source: Arc<[u8]>,
    tokens: Vec<Token>,
}

impl TokenSequence {
    pub(crate) fn new(source: Arc<[u8]>, tokens: Vec<Token>) -> Self {
        debug_assert!(matches!(tokens.last(), Some(t) if t.kind == TokenKind::Eof));
        TokenSequence { source, tokens }
    }

    /// The scanned buffer
    pub fn source(&self) -> &[u8] {
        &self.source
    }

    /// All tokens, `Eof` included
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of tokens, `Eof` included
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Never true: a sequence always holds its `Eof` token
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate over the tokens in source order
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Token kinds in source order
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.kind).collect()
    }

    /// Raw bytes of a token's lexeme
    pub fn lexeme(&self, token: &Token) -> &[u8] {
        &self.source[token.lexeme.start..token.lexeme.end]
    }

    /// Lexeme as text; invalid UTF-8 (only possible inside strings) is replaced
    pub fn lexeme_str(&self, token: &Token) -> Cow<'_, str> {
        String::from_utf8_lossy(self.lexeme(token))
    }

    /// One-line description of a token
    pub fn describe<'a>(&'a self, token: &'a Token) -> TokenDisplay<'a> {
        TokenDisplay {
            token,
            lexeme: self.lexeme_str(token),
        }
    }
}

impl Index<usize> for TokenSequence {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenSequence {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// `LispToken => KIND 'lexeme' @ file:line:column`
pub struct TokenDisplay<'a> {
    token: &'a Token,
    lexeme: Cow<'a, str>,
}

impl fmt::Display for TokenDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LispToken => {} '{}' @ {}",
            self.token.kind, self.lexeme, self.token.position
        )
    }
}
