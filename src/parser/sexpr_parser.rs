use super::ast::{AstNode, Identifier, Literal, LiteralKind};
use crate::error::{LispError, Result};
use crate::lexer::{Token, TokenKind, TokenSequence};

/// Deepest nesting of parenthesized forms the parser accepts
pub const MAX_NESTING_DEPTH: usize = 256;

/// Parses exactly one top-level declaration; anything after it is an error
pub fn parse(tokens: &TokenSequence) -> Result<AstNode> {
    let mut parser = SExprParser::new(tokens);
    let node = parser.parse_declaration()?;
    parser.expect_end()?;
    Ok(node)
}

/// Parses every top-level declaration, one root per form
pub fn parse_all(tokens: &TokenSequence) -> Result<Vec<AstNode>> {
    SExprParser::new(tokens).parse()
}

/// Recursive-descent parser over a token sequence
///
/// One token of lookahead, no backtracking. Every production checks the kind
/// of its leading token before consuming it, and the first mismatch aborts the
/// whole parse with the offending token's position. Forms nested deeper than
/// [`MAX_NESTING_DEPTH`] are rejected instead of recursing further.
pub struct SExprParser<'a> {
    tokens: &'a TokenSequence,
    current: usize,
    depth: usize,
}

impl<'a> SExprParser<'a> {
    /// Creates a new parser positioned at the first token
    pub fn new(tokens: &'a TokenSequence) -> Self {
        SExprParser {
            tokens,
            current: 0,
            depth: 0,
        }
    }

    /// Parses declarations until the end of the stream
    pub fn parse(&mut self) -> Result<Vec<AstNode>> {
        let mut declarations = Vec::new();

        while !self.is_at_end() {
            declarations.push(self.parse_declaration()?);
        }

        Ok(declarations)
    }

    /// declaration := '(' expression ')'
    pub fn parse_declaration(&mut self) -> Result<AstNode> {
        if !self.check(TokenKind::LeftParen) {
            return Err(self.expected_error("`(` to start a declaration"));
        }
        self.parse_form()
    }

    /// Fails unless only the end-of-stream token remains
    pub fn expect_end(&self) -> Result<()> {
        if self.is_at_end() {
            Ok(())
        } else {
            Err(self.expected_error("end of input"))
        }
    }

    fn parse_expression(&mut self) -> Result<AstNode> {
        let kind = self.peek().kind;

        match kind {
            TokenKind::LeftParen => self.parse_form(),
            TokenKind::Identifier => Ok(AstNode::Identifier(self.parse_identifier()?)),
            kind if kind.is_literal() => Ok(AstNode::Literal(self.parse_literal())),
            _ => Err(self.expected_error("an expression")),
        }
    }

    fn parse_form(&mut self) -> Result<AstNode> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(LispError::parser(
                self.peek().position.clone(),
                "nesting too deep",
            ));
        }

        self.depth += 1;
        let node = self.parse_form_contents();
        self.depth -= 1;
        node
    }

    /// A parenthesized form; the token after `(` picks the production
    fn parse_form_contents(&mut self) -> Result<AstNode> {
        self.consume(TokenKind::LeftParen, "`(`")?;

        let kind = self.peek().kind;
        match kind {
            TokenKind::Define => self.parse_function_definition(),
            TokenKind::If => self.parse_if(),
            TokenKind::Lambda => self.parse_lambda(),
            TokenKind::Var => self.parse_var(),
            TokenKind::Identifier => self.parse_function_call(),
            kind if kind.is_operator() => self.parse_function_call(),
            _ => Err(self.expected_error(
                "`define`, `if`, `lambda`, `var`, an operator or a function name",
            )),
        }
    }

    /// (define name (params...) body)
    fn parse_function_definition(&mut self) -> Result<AstNode> {
        self.advance(); // consume 'define'

        let name = self.parse_identifier()?;
        let parameters = self.parse_parameters()?;
        let body = Box::new(self.parse_expression()?);

        self.consume(TokenKind::RightParen, "`)` to close the definition")?;

        Ok(AstNode::FunctionDefinition {
            name,
            parameters,
            body,
        })
    }

    /// (callee args...)
    fn parse_function_call(&mut self) -> Result<AstNode> {
        let head = self.advance();
        let callee = Identifier::new(self.tokens.lexeme_str(head), head.position.clone());

        let mut arguments = Vec::new();
        while !self.check(TokenKind::RightParen) {
            arguments.push(self.parse_expression()?);
        }
        self.advance(); // consume ')'

        Ok(AstNode::FunctionCall { callee, arguments })
    }

    /// (if condition then else)
    fn parse_if(&mut self) -> Result<AstNode> {
        let keyword = self.advance(); // consume 'if'

        let condition = Box::new(self.parse_expression()?);
        let then_branch = Box::new(self.parse_expression()?);
        let else_branch = Box::new(self.parse_expression()?);

        self.consume(TokenKind::RightParen, "`)` after the else branch")?;

        Ok(AstNode::IfStatement {
            position: keyword.position.clone(),
            condition,
            then_branch,
            else_branch,
        })
    }

    /// (lambda (params...) body)
    fn parse_lambda(&mut self) -> Result<AstNode> {
        let keyword = self.advance(); // consume 'lambda'

        let parameters = self.parse_parameters()?;
        let body = Box::new(self.parse_expression()?);

        self.consume(TokenKind::RightParen, "`)` to close the lambda")?;

        Ok(AstNode::LambdaExpression {
            position: keyword.position.clone(),
            parameters,
            body,
        })
    }

    /// (var name value)
    fn parse_var(&mut self) -> Result<AstNode> {
        self.advance(); // consume 'var'

        let name = self.parse_identifier()?;
        let value = Box::new(self.parse_expression()?);

        self.consume(TokenKind::RightParen, "`)` to close the declaration")?;

        Ok(AstNode::VariableDeclaration { name, value })
    }

    /// '(' identifier* ')'
    fn parse_parameters(&mut self) -> Result<Vec<Identifier>> {
        self.consume(TokenKind::LeftParen, "`(` to open the parameter list")?;

        let mut parameters = Vec::new();
        while !self.check(TokenKind::RightParen) {
            if !self.check(TokenKind::Identifier) {
                return Err(self.expected_error("a parameter name or `)`"));
            }
            parameters.push(self.parse_identifier()?);
        }
        self.advance(); // consume ')'

        Ok(parameters)
    }

    fn parse_identifier(&mut self) -> Result<Identifier> {
        let token = self.consume(TokenKind::Identifier, "an identifier")?;
        Ok(Identifier::new(
            self.tokens.lexeme_str(token),
            token.position.clone(),
        ))
    }

    // Callers have already checked `is_literal` on the current token.
    fn parse_literal(&mut self) -> Literal {
        let token = self.advance();
        let kind = match token.kind {
            TokenKind::Integer => LiteralKind::Integer,
            TokenKind::Float => LiteralKind::Float,
            TokenKind::String => LiteralKind::String,
            TokenKind::True | TokenKind::False => LiteralKind::Bool,
            _ => LiteralKind::Nil,
        };
        Literal::new(kind, self.tokens.lexeme_str(token), token.position.clone())
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn peek(&self) -> &'a Token {
        let tokens = self.tokens;
        &tokens[self.current]
    }

    fn advance(&mut self) -> &'a Token {
        let token = self.peek();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn consume(&mut self, kind: TokenKind, expected: &str) -> Result<&'a Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.expected_error(expected))
        }
    }

    /// Describes a token for error messages
    fn token_description(&self, token: &Token) -> String {
        match token.kind {
            TokenKind::LeftParen => "`(`".to_string(),
            TokenKind::RightParen => "`)`".to_string(),
            TokenKind::Eof => "end of file".to_string(),
            TokenKind::Integer => format!("integer `{}`", self.tokens.lexeme_str(token)),
            TokenKind::Float => format!("float `{}`", self.tokens.lexeme_str(token)),
            TokenKind::String => format!("string {}", self.tokens.lexeme_str(token)),
            TokenKind::Identifier => format!("identifier `{}`", self.tokens.lexeme_str(token)),
            kind if kind.is_keyword() => format!("keyword `{}`", self.tokens.lexeme_str(token)),
            _ => format!("operator `{}`", self.tokens.lexeme_str(token)),
        }
    }

    /// Syntax error at the current token with an expected/found message
    fn expected_error(&self, expected: &str) -> LispError {
        let token = self.peek();
        LispError::parser(
            token.position.clone(),
            format!("expected {}, found {}", expected, self.token_description(token)),
        )
    }
}
