//! Code generation: postfix tokens to a CONTAINSTABLE search condition
//!
//! Evaluates the postfix sequence against a stack of predicate fragments.
//! Terms push their quoted text; binary operators pop two fragments and push
//! the combined form. Every binary combination is fully parenthesized, so the
//! output never relies on the engine's precedence rules.

use serde::{Deserialize, Serialize};

use crate::compiler::token::{Token, TokenKind};
use crate::error::{CompileError, Result};

/// Proximity window for NEAR/ONEAR, in tokens
const NEAR_WINDOW: u32 = 2000;

/// Which FORMSOF expansion the generated predicate requests
///
/// `Inflectional` matches stemmed variants, `Thesaurus` matches synonyms,
/// `Both` combines the two with OR. Wildcard terms bypass expansion entirely:
/// prefix matching and fuzzy matching do not compose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormsOfMode {
    /// No fuzzy matching
    None,
    /// Stemmed variants of the term
    Inflectional,
    /// Thesaurus synonyms of the term
    Thesaurus,
    /// Stemmed variants or synonyms
    #[default]
    Both,
}

/// Generate a search condition from a postfix token sequence
///
/// Fails with [`CompileError::EmptyExpression`] on empty input,
/// [`CompileError::MissingOperand`] when an operator finds too few operands,
/// [`CompileError::UnexpectedTokenType`] if a parenthesis survived parsing,
/// [`CompileError::NearProximityOperandError`] when a proximity operator gets
/// a subexpression operand, and [`CompileError::StackImbalance`] when
/// evaluation does not reduce to exactly one fragment.
pub fn generate(postfix: &[Token], mode: FormsOfMode) -> Result<String> {
    if postfix.is_empty() {
        return Err(CompileError::EmptyExpression);
    }

    let mut stack: Vec<String> = Vec::with_capacity(postfix.len());

    for token in postfix {
        if let Some(operand_count) = token.kind.operand_count() {
            if stack.len() < operand_count {
                return Err(CompileError::MissingOperand {
                    token: token.clone(),
                });
            }

            let (Some(right), Some(left)) = (stack.pop(), stack.pop()) else {
                return Err(CompileError::MissingOperand {
                    token: token.clone(),
                });
            };

            let combined = match token.kind {
                TokenKind::And => {
                    format!("({} AND {})", forms_of(&left, mode), forms_of(&right, mode))
                }
                TokenKind::Or => {
                    format!("({} OR {})", forms_of(&left, mode), forms_of(&right, mode))
                }
                TokenKind::Not => format!(
                    "({} AND NOT {})",
                    forms_of(&left, mode),
                    forms_of(&right, mode)
                ),
                TokenKind::Near => combine_near(left, right, token, false)?,
                TokenKind::OrderedNear => combine_near(left, right, token, true)?,
                TokenKind::Term | TokenKind::LeftParen | TokenKind::RightParen => {
                    return Err(CompileError::UnexpectedTokenType {
                        token: token.clone(),
                    })
                }
            };

            stack.push(combined);
        } else if token.kind == TokenKind::Term {
            stack.push(quote(&token.text));
        } else {
            // A parenthesis reaching evaluation is a parser contract
            // violation, not a user mistake.
            return Err(CompileError::UnexpectedTokenType {
                token: token.clone(),
            });
        }
    }

    if stack.len() != 1 {
        return Err(CompileError::StackImbalance { count: stack.len() });
    }

    let Some(result) = stack.pop() else {
        return Err(CompileError::StackImbalance { count: 0 });
    };

    // A bare single-term query still gets its expansion here.
    Ok(forms_of(&result, mode))
}

/// Combine two operands under NEAR/ONEAR
///
/// Proximity operators accept only simple or prefix-wildcard terms; operands
/// are never FORMSOF-expanded.
fn combine_near(left: String, right: String, token: &Token, ordered: bool) -> Result<String> {
    if is_compound(&left) || is_compound(&right) {
        return Err(CompileError::NearProximityOperandError {
            token: token.clone(),
        });
    }

    let match_order = if ordered { "TRUE" } else { "FALSE" };

    Ok(format!(
        "(NEAR(({}, {}), {}, {}))",
        left, right, NEAR_WINDOW, match_order
    ))
}

/// Apply FORMSOF expansion to an operand, when it qualifies
///
/// Compound fragments were already expanded when they were still leaves, and
/// wildcard terms bypass fuzzy matching.
fn forms_of(text: &str, mode: FormsOfMode) -> String {
    if is_compound(text) || is_prefix_wildcard(text) {
        return text.to_string();
    }

    match mode {
        FormsOfMode::None => text.to_string(),
        FormsOfMode::Inflectional => format!("FORMSOF(INFLECTIONAL, {})", text),
        FormsOfMode::Thesaurus => format!("FORMSOF(THESAURUS, {})", text),
        FormsOfMode::Both => format!(
            "(FORMSOF(INFLECTIONAL, {}) OR FORMSOF(THESAURUS, {}))",
            text, text
        ),
    }
}

/// Whether a fragment is a combined subexpression rather than a single term
fn is_compound(text: &str) -> bool {
    text.starts_with('(') && text.ends_with(')')
}

/// Whether a quoted fragment ends in a prefix wildcard (`"appl*"`)
fn is_prefix_wildcard(text: &str) -> bool {
    text.ends_with("*\"")
}

/// Double-quote a term for the predicate output
fn quote(text: &str) -> String {
    format!("\"{}\"", text)
}
