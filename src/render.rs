//! Human and machine readable dumps of tokens and trees

use crate::config::EmitMode;
use crate::lexer::TokenSequence;
use crate::parser::AstNode;

/// One `LispToken => KIND 'lexeme' @ file:line:column` line per token
pub fn dump_tokens(tokens: &TokenSequence) -> String {
    tokens
        .iter()
        .map(|token| tokens.describe(token).to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Each root printed back as an s-expression, one per line
pub fn dump_ast(nodes: &[AstNode]) -> String {
    nodes
        .iter()
        .map(AstNode::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// The roots as a pretty-printed JSON array
pub fn ast_to_json(nodes: &[AstNode]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(nodes)
}

/// Renders one processed input the way `mode` asks for
pub fn render(
    mode: EmitMode,
    tokens: &TokenSequence,
    nodes: &[AstNode],
) -> serde_json::Result<String> {
    match mode {
        EmitMode::Tokens => Ok(dump_tokens(tokens)),
        EmitMode::Ast => Ok(dump_ast(nodes)),
        EmitMode::Json => ast_to_json(nodes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check_source;

    #[test]
    fn test_dump_tokens() {
        let (tokens, _) = check_source("stdin", b"(f 1)").unwrap();
        assert_eq!(
            dump_tokens(&tokens),
            "LispToken => LPAREN '(' @ stdin:0:0\n\
             LispToken => IDENTIFIER 'f' @ stdin:0:1\n\
             LispToken => INTEGER '1' @ stdin:0:3\n\
             LispToken => RPAREN ')' @ stdin:0:4\n\
             LispToken => EOF '' @ stdin:0:5"
        );
    }

    #[test]
    fn test_dump_ast() {
        let (_, nodes) =
            check_source("stdin", b"(var  x   \"a b\")\n(lambda (a b)\n  (if a b nil))").unwrap();
        assert_eq!(
            dump_ast(&nodes),
            "(var x \"a b\")\n(lambda (a b) (if a b nil))"
        );
    }

    #[test]
    fn test_json() {
        let (tokens, nodes) = check_source("demo.lisp", b"(var x 1)").unwrap();
        let json = render(EmitMode::Json, &tokens, &nodes).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let decl = &value[0]["VariableDeclaration"];
        assert_eq!(decl["name"]["name"], "x");
        assert_eq!(decl["name"]["position"]["source_name"], "demo.lisp");
        assert_eq!(decl["value"]["Literal"]["kind"], "Integer");
        assert_eq!(decl["value"]["Literal"]["raw"], "1");

        let back: Vec<AstNode> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, nodes);
    }
}
