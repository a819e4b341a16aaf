//! Token model shared by the lexer, parser, and code generator
//!
//! Tokens are immutable: the pipeline stages build new sequences instead of
//! editing tokens in place. Each [`TokenKind`] carries fixed metadata
//! (operator-ness, precedence, associativity, operand count) resolved through
//! exhaustive matches, so adding a kind without its metadata fails to compile.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of token kinds in the keyword query language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// A search term (bare word run or quoted phrase)
    Term,
    /// The AND operator (`AND` keyword or `,`)
    And,
    /// The NOT operator (`NOT` or `ANDNOT` keyword)
    Not,
    /// The OR operator
    Or,
    /// The NEAR proximity operator
    Near,
    /// The ONEAR order-preserving proximity operator
    OrderedNear,
    /// The `(` grouping token
    LeftParen,
    /// The `)` grouping token
    RightParen,
}

/// Operator associativity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Associativity {
    Left,
    Right,
}

impl TokenKind {
    /// Whether this kind is a boolean or proximity operator
    ///
    /// Parentheses group but never operate; terms are operands.
    pub fn is_operator(&self) -> bool {
        match self {
            TokenKind::And
            | TokenKind::Not
            | TokenKind::Or
            | TokenKind::Near
            | TokenKind::OrderedNear => true,
            TokenKind::Term | TokenKind::LeftParen | TokenKind::RightParen => false,
        }
    }

    /// Binding strength of this kind
    ///
    /// The values are arbitrary; only the relative order matters. Parentheses
    /// bind tightest, then proximity, then AND/NOT, then OR.
    pub fn precedence(&self) -> u8 {
        match self {
            TokenKind::Term => 0,
            TokenKind::Or => 2,
            TokenKind::And | TokenKind::Not => 3,
            TokenKind::Near | TokenKind::OrderedNear => 5,
            TokenKind::LeftParen | TokenKind::RightParen => 13,
        }
    }

    /// Associativity of this kind; every current operator is left-associative
    pub fn associativity(&self) -> Associativity {
        match self {
            TokenKind::Term
            | TokenKind::And
            | TokenKind::Not
            | TokenKind::Or
            | TokenKind::Near
            | TokenKind::OrderedNear
            | TokenKind::LeftParen
            | TokenKind::RightParen => Associativity::Left,
        }
    }

    /// Number of operands this kind consumes, or `None` for non-operators
    ///
    /// Every current operator is binary.
    pub fn operand_count(&self) -> Option<usize> {
        match self {
            TokenKind::And
            | TokenKind::Not
            | TokenKind::Or
            | TokenKind::Near
            | TokenKind::OrderedNear => Some(2),
            TokenKind::Term | TokenKind::LeftParen | TokenKind::RightParen => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Term => "Term",
            TokenKind::And => "And",
            TokenKind::Not => "Not",
            TokenKind::Or => "Or",
            TokenKind::Near => "Near",
            TokenKind::OrderedNear => "OrderedNear",
            TokenKind::LeftParen => "LeftParen",
            TokenKind::RightParen => "RightParen",
        };
        write!(f, "{}", name)
    }
}

/// A lexical token: kind, source text, and 1-based starting column
///
/// Keyword tokens retain their original-case text (`aNd`, `,`) for
/// diagnostics even though keyword matching is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: usize,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = \"{}\"", self.kind, self.text)
    }
}
