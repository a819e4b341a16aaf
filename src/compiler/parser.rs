//! Shunting-yard parser: infix tokens to postfix (RPN)
//!
//! The parser validates parenthesis structure only. Operand arity is not
//! checked here; an orphan operator passes through unchanged and the code
//! generator rejects it when evaluation comes up short.

use crate::compiler::token::{Associativity, Token, TokenKind};
use crate::error::{CompileError, Result};

/// Convert an infix token sequence to postfix notation
///
/// Implements Dijkstra's shunting-yard algorithm over an output queue and an
/// operator/parenthesis stack. Fails with [`CompileError::EmptyParentheses`]
/// on `()`, [`CompileError::MissingLeftParenthesis`] when a `)` has no open
/// match, and [`CompileError::UnmatchedLeftParenthesis`] when a `(` is never
/// closed.
pub fn to_postfix(infix: &[Token]) -> Result<Vec<Token>> {
    reject_empty_parentheses(infix)?;

    let mut output = Vec::with_capacity(infix.len());
    let mut stack: Vec<Token> = Vec::new();

    for token in infix {
        if token.kind.is_operator() {
            // Left-associative operators yield to stack tops of equal or
            // higher precedence; right-associative only to strictly higher.
            loop {
                let pops_top = match stack.last() {
                    Some(top) if top.kind.is_operator() => match token.kind.associativity() {
                        Associativity::Left => {
                            token.kind.precedence() <= top.kind.precedence()
                        }
                        Associativity::Right => {
                            token.kind.precedence() < top.kind.precedence()
                        }
                    },
                    _ => false,
                };
                if !pops_top {
                    break;
                }
                if let Some(top) = stack.pop() {
                    output.push(top);
                }
            }
            stack.push(token.clone());
        } else if token.kind == TokenKind::Term {
            output.push(token.clone());
        } else if token.kind == TokenKind::LeftParen {
            stack.push(token.clone());
        } else {
            // Right parenthesis: drain to the matching left parenthesis and
            // discard the pair.
            let mut found_left_paren = false;

            while let Some(top) = stack.pop() {
                if top.kind == TokenKind::LeftParen {
                    found_left_paren = true;
                    break;
                }
                output.push(top);
            }

            if !found_left_paren {
                return Err(CompileError::MissingLeftParenthesis {
                    token: token.clone(),
                });
            }
        }
    }

    while let Some(top) = stack.pop() {
        if top.kind == TokenKind::LeftParen {
            return Err(CompileError::UnmatchedLeftParenthesis { token: top });
        }
        output.push(top);
    }

    Ok(output)
}

/// A `(` immediately followed by `)` is rejected regardless of context
fn reject_empty_parentheses(infix: &[Token]) -> Result<()> {
    for pair in infix.windows(2) {
        if pair[0].kind == TokenKind::LeftParen && pair[1].kind == TokenKind::RightParen {
            return Err(CompileError::EmptyParentheses {
                token: pair[0].clone(),
            });
        }
    }

    Ok(())
}
