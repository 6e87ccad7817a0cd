//! minilisp parser module
//!
//! Parses a [`TokenSequence`](crate::lexer::TokenSequence) into an abstract syntax tree.

mod ast;
mod sexpr_parser;

pub use ast::{AstNode, Identifier, Literal, LiteralKind};
pub use sexpr_parser::{parse, parse_all, SExprParser, MAX_NESTING_DEPTH};
