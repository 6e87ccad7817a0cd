//! Tests for tokenization through the public API

use minilisp::{tokenize, LispError, Lexer, TokenKind, TokenSequence};

fn lex(source: &str) -> TokenSequence {
    tokenize(source.as_bytes(), source.len()).unwrap()
}

fn texts(tokens: &TokenSequence) -> Vec<String> {
    tokens
        .iter()
        .map(|t| tokens.lexeme_str(t).into_owned())
        .collect()
}

// ====================
// Sequences
// ====================

#[test]
fn test_empty_input_is_only_eof() {
    let tokens = tokenize(b"", 0).unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
}

#[test]
fn test_whitespace_only_input() {
    let tokens = lex(" \t\r\n  \n");
    assert_eq!(tokens.kinds(), vec![TokenKind::Eof]);
    assert_eq!(tokens[0].position.line, 2);
}

#[test]
fn test_exactly_one_eof() {
    let tokens = lex("(define f (x) x) (f 1)");
    let eofs = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
    assert_eq!(eofs, 1);
    assert_eq!(tokens.tokens().last().map(|t| t.kind), Some(TokenKind::Eof));
}

#[test]
fn test_function_definition_tokens() {
    let tokens = lex("(define add (a b) (+ a b))");
    assert_eq!(
        tokens.kinds(),
        vec![
            TokenKind::LeftParen,
            TokenKind::Define,
            TokenKind::Identifier,
            TokenKind::LeftParen,
            TokenKind::Identifier,
            TokenKind::Identifier,
            TokenKind::RightParen,
            TokenKind::LeftParen,
            TokenKind::Plus,
            TokenKind::Identifier,
            TokenKind::Identifier,
            TokenKind::RightParen,
            TokenKind::RightParen,
            TokenKind::Eof,
        ]
    );
    assert_eq!(texts(&tokens)[2], "add");
}

#[test]
fn test_adjacent_tokens_need_no_space() {
    let tokens = lex("(f\"s\"1.5)");
    assert_eq!(texts(&tokens), vec!["(", "f", "\"s\"", "1.5", ")", ""]);
}

#[test]
fn test_minus_before_digit_is_operator() {
    let tokens = lex("-5");
    assert_eq!(
        tokens.kinds(),
        vec![TokenKind::Minus, TokenKind::Integer, TokenKind::Eof]
    );
}

#[test]
fn test_float_with_second_dot() {
    // `1.2.3` is a float `1.2` followed by an unrecognized `.`
    let err = tokenize(b"1.2.3", 5).unwrap_err();
    assert_eq!(err.to_string(), "stdin:0:3: unrecognized token");
}

// ====================
// Spans and positions
// ====================

#[test]
fn test_spans_stay_in_bounds() {
    let source = "(var msg \"hi\") ; greeting\n(if true 1.0 nil)";
    let tokens = lex(source);
    for token in &tokens {
        assert!(token.lexeme.start <= token.lexeme.end);
        assert!(token.lexeme.end <= source.len());
    }
}

#[test]
fn test_comment_advances_line() {
    let tokens = lex("; comment\n42");
    assert_eq!(tokens.kinds(), vec![TokenKind::Integer, TokenKind::Eof]);
    assert_eq!(tokens.lexeme(&tokens[0]), b"42");
    assert_eq!(tokens[0].position.line, 1);
}

#[test]
fn test_custom_source_name() {
    let tokens = Lexer::new("prog.lisp").tokenize(b"\n  x").unwrap();
    assert_eq!(
        tokens.describe(&tokens[0]).to_string(),
        "LispToken => IDENTIFIER 'x' @ prog.lisp:1:2"
    );
}

// ====================
// Errors
// ====================

#[test]
fn test_unterminated_string_at_end_of_input() {
    let err = tokenize(b"\"abc", 4).unwrap_err();
    let LispError::Lexer { position, message } = err else {
        panic!("expected lexer error");
    };
    assert_eq!(message, "unterminated string");
    assert_eq!((position.line, position.column), (0, 4));
}

#[test]
fn test_first_error_wins() {
    let err = tokenize(b"(# \"x", 5).unwrap_err();
    assert_eq!(err.to_string(), "stdin:0:1: unrecognized token");
}

#[test]
fn test_idempotent_tokenize() {
    let source = b"(define f (x)\n  (if x \"yes\" 0.5))";
    let first = tokenize(source, source.len()).unwrap();
    let second = tokenize(source, source.len()).unwrap();
    assert_eq!(first.kinds(), second.kinds());
    assert_eq!(texts(&first), texts(&second));
    assert_eq!(first, second);
}
