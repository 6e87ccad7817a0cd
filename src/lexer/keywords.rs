use super::token::TokenKind;
use std::collections::HashMap;

lazy_static::lazy_static! {
    /// Reserved words, built on first use and never mutated afterwards
    static ref KEYWORDS: KeywordTable = KeywordTable::build();
}

/// Mapping from reserved lexeme text to its token kind
#[derive(Debug)]
pub struct KeywordTable {
    entries: HashMap<&'static str, TokenKind>,
}

impl KeywordTable {
    fn build() -> Self {
        let entries = [
            ("define", TokenKind::Define),
            ("var", TokenKind::Var),
            ("lambda", TokenKind::Lambda),
            ("if", TokenKind::If),
            ("nil", TokenKind::Nil),
            ("false", TokenKind::False),
            ("true", TokenKind::True),
        ]
        .into_iter()
        .collect();

        KeywordTable { entries }
    }

    /// The process-wide table
    pub fn global() -> &'static KeywordTable {
        &KEYWORDS
    }

    /// Exact-text lookup; prefixes and case variants do not match
    pub fn lookup(&self, text: &[u8]) -> Option<TokenKind> {
        let text = std::str::from_utf8(text).ok()?;
        self.entries.get(text).copied()
    }

    /// Number of reserved words
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
