//! # minilisp - front end for a minimal Lisp
//!
//! Converts raw source text into a token stream and then into an abstract
//! syntax tree, ready for an evaluator.
//!
//! ```text
//! Source bytes → Lexer → TokenSequence → Parser → AstNode
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use minilisp::{parse, tokenize, AstNode};
//!
//! # fn main() -> minilisp::Result<()> {
//! let source = b"(define square (x) (* x x))";
//! let tokens = tokenize(source, source.len())?;
//! let ast = parse(&tokens)?;
//!
//! match &ast {
//!     AstNode::FunctionDefinition { name, parameters, .. } => {
//!         assert_eq!(name.name, "square");
//!         assert_eq!(parameters.len(), 1);
//!     }
//!     other => panic!("unexpected node {other:?}"),
//! }
//! assert_eq!(ast.to_string(), "(define square (x) (* x x))");
//! # Ok(())
//! # }
//! ```
//!
//! ## Grammar
//!
//! Every compound form is fully parenthesized and picked by the token after `(`:
//!
//! - `(define name (params...) body)` - function definition
//! - `(if condition then else)` - conditional
//! - `(lambda (params...) body)` - anonymous function
//! - `(var name value)` - variable declaration
//! - `(callee args...)` - call; `+ - * /` are valid callees
//!
//! Integers, floats (`42.` included), double-quoted strings, `true`, `false`,
//! `nil` and bare identifiers are terminal expressions.
//!
//! ## Errors
//!
//! Both stages are fail-fast: the first problem aborts the call and nothing
//! partial is returned. Lexer and parser errors render as
//! `<file>:<line>:<column>: <message>`, with lines and columns counted from 0.
//!
//! ```rust
//! let err = minilisp::tokenize(b"\"abc", 4).unwrap_err();
//! assert_eq!(err.to_string(), "stdin:0:4: unterminated string");
//! ```

pub mod config;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod render;
pub mod repl;

/// Version of the minilisp front end
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export main types
pub use config::{EmitMode, ReplConfig};
pub use error::{ErrorSeverity, InternalErrorKind, LispError, Result};
pub use lexer::{tokenize, KeywordTable, Lexer, Position, Span, Token, TokenKind, TokenSequence};
pub use parser::{
    parse, parse_all, AstNode, Identifier, Literal, LiteralKind, SExprParser, MAX_NESTING_DEPTH,
};
pub use repl::{Repl, ReplSummary};

/// Tokenizes and parses a whole buffer, every top-level form included
pub fn check_source(
    source_name: &str,
    source: &[u8],
) -> Result<(TokenSequence, Vec<AstNode>)> {
    let tokens = Lexer::new(source_name).tokenize(source)?;
    let nodes = parse_all(&tokens)?;
    Ok((tokens, nodes))
}
