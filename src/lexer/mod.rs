//! Lexical analysis for minilisp
//!
//! Converts a source buffer into an ordered [`TokenSequence`].

mod keywords;
mod scanner;
mod token;

pub use keywords::KeywordTable;
pub use scanner::{tokenize, Lexer, DEFAULT_SOURCE_NAME};
pub use token::{Position, Span, Token, TokenDisplay, TokenKind, TokenSequence};
