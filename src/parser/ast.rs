use crate::lexer::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A name as written in the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    /// Identifier text
    pub name: String,
    /// Where the identifier token begins
    pub position: Position,
}

impl Identifier {
    /// Creates a new identifier
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Identifier {
            name: name.into(),
            position,
        }
    }
}

/// Literal kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiteralKind {
    /// Digit run
    Integer,
    /// Number with a fractional dot
    Float,
    /// Double-quoted text
    String,
    /// `true` or `false`
    Bool,
    /// `nil`
    Nil,
}

/// A literal and its raw source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Literal {
    /// What kind of literal this is
    pub kind: LiteralKind,
    /// The lexeme exactly as scanned; strings keep their quotes
    pub raw: String,
    /// Where the literal token begins
    pub position: Position,
}

impl Literal {
    /// Creates a new literal
    pub fn new(kind: LiteralKind, raw: impl Into<String>, position: Position) -> Self {
        Literal {
            kind,
            raw: raw.into(),
            position,
        }
    }

    /// String contents without the surrounding quotes, `None` for other kinds
    pub fn string_value(&self) -> Option<&str> {
        match self.kind {
            LiteralKind::String => self
                .raw
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"')),
            _ => None,
        }
    }
}

/// Parsed forms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AstNode {
    /// `(define name (params...) body)`
    FunctionDefinition {
        /// Name of the function, with the position of its token
        name: Identifier,
        /// Parameter names in declaration order
        parameters: Vec<Identifier>,
        /// Function body
        body: Box<AstNode>,
    },

    /// `(callee args...)`
    FunctionCall {
        /// Function being called; operators appear under their symbol
        callee: Identifier,
        /// Argument expressions in call order
        arguments: Vec<AstNode>,
    },

    /// `(if condition then else)`
    IfStatement {
        /// Where the `if` keyword begins
        position: Position,
        /// Condition expression to evaluate
        condition: Box<AstNode>,
        /// Expression used when the condition holds
        then_branch: Box<AstNode>,
        /// Expression used otherwise
        else_branch: Box<AstNode>,
    },

    /// `(lambda (params...) body)`
    LambdaExpression {
        /// Where the `lambda` keyword begins
        position: Position,
        /// Parameter names in declaration order
        parameters: Vec<Identifier>,
        /// Lambda body
        body: Box<AstNode>,
    },

    /// `(var name value)`
    VariableDeclaration {
        /// Name being declared
        name: Identifier,
        /// Initial value expression
        value: Box<AstNode>,
    },

    /// Integer, float, string, boolean or nil
    Literal(Literal),

    /// Bare identifier reference
    Identifier(Identifier),
}

impl AstNode {
    /// Short name of the variant
    pub fn kind_name(&self) -> &'static str {
        match self {
            AstNode::FunctionDefinition { .. } => "FunctionDefinition",
            AstNode::FunctionCall { .. } => "FunctionCall",
            AstNode::IfStatement { .. } => "IfStatement",
            AstNode::LambdaExpression { .. } => "LambdaExpression",
            AstNode::VariableDeclaration { .. } => "VariableDeclaration",
            AstNode::Literal(_) => "Literal",
            AstNode::Identifier(_) => "Identifier",
        }
    }

    /// Position of the token that names the node.
    ///
    /// Definitions and declarations report their name, calls their callee,
    /// `if` and `lambda` their keyword.
    pub fn position(&self) -> &Position {
        match self {
            AstNode::FunctionDefinition { name, .. } => &name.position,
            AstNode::FunctionCall { callee, .. } => &callee.position,
            AstNode::IfStatement { position, .. } | AstNode::LambdaExpression { position, .. } => {
                position
            }
            AstNode::VariableDeclaration { name, .. } => &name.position,
            AstNode::Literal(literal) => &literal.position,
            AstNode::Identifier(identifier) => &identifier.position,
        }
    }

    /// Total number of nodes in this tree, parameters excluded
    pub fn node_count(&self) -> usize {
        1 + match self {
            AstNode::FunctionDefinition { body, .. } | AstNode::LambdaExpression { body, .. } => {
                body.node_count()
            }
            AstNode::FunctionCall { arguments, .. } => {
                arguments.iter().map(AstNode::node_count).sum()
            }
            AstNode::IfStatement {
                condition,
                then_branch,
                else_branch,
                ..
            } => condition.node_count() + then_branch.node_count() + else_branch.node_count(),
            AstNode::VariableDeclaration { value, .. } => value.node_count(),
            AstNode::Literal(_) | AstNode::Identifier(_) => 0,
        }
    }
}

fn write_parameters(f: &mut fmt::Formatter<'_>, parameters: &[Identifier]) -> fmt::Result {
    f.write_str("(")?;
    for (i, param) in parameters.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        f.write_str(&param.name)?;
    }
    f.write_str(")")
}

/// Prints the node back as an s-expression
impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstNode::FunctionDefinition {
                name,
                parameters,
                body,
            } => {
                write!(f, "(define {} ", name.name)?;
                write_parameters(f, parameters)?;
                write!(f, " {})", body)
            }
            AstNode::FunctionCall { callee, arguments } => {
                write!(f, "({}", callee.name)?;
                for arg in arguments {
                    write!(f, " {}", arg)?;
                }
                f.write_str(")")
            }
            AstNode::IfStatement {
                condition,
                then_branch,
                else_branch,
                ..
            } => write!(f, "(if {} {} {})", condition, then_branch, else_branch),
            AstNode::LambdaExpression {
                parameters, body, ..
            } => {
                f.write_str("(lambda ")?;
                write_parameters(f, parameters)?;
                write!(f, " {})", body)
            }
            AstNode::VariableDeclaration { name, value } => {
                write!(f, "(var {} {})", name.name, value)
            }
            AstNode::Literal(literal) => f.write_str(&literal.raw),
            AstNode::Identifier(identifier) => f.write_str(&identifier.name),
        }
    }
}
