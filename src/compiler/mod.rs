//! Keyword query compilation pipeline
//!
//! Orchestrates the three stages — lexing, shunting-yard parsing, and code
//! generation — and applies two grammar-forgiving normalizations between
//! them. Human-typed queries are messy; the normalizations accept the common
//! slips (stray commas, doubled ANDs, mismatched apostrophe styles) without
//! hiding genuinely malformed input.
//!
//! # Example
//!
//! ```rust
//! use kqlc::{translate, FormsOfMode};
//!
//! let predicate = translate("a AND b", FormsOfMode::None).unwrap();
//! assert_eq!(predicate, "(\"a\" AND \"b\")");
//! ```

pub mod codegen;
pub mod lexer;
pub mod parser;
pub mod token;

use tracing::debug;

use crate::compiler::codegen::FormsOfMode;
use crate::compiler::token::{Token, TokenKind};
use crate::error::{CompileError, Result};

/// Compile a search expression into a CONTAINSTABLE search condition
///
/// Runs tokenize → AND normalization → postfix parse → apostrophe
/// normalization → generate. Failures from any stage propagate unchanged.
pub fn translate(expression: &str, mode: FormsOfMode) -> Result<String> {
    let tokens = lexer::tokenize(expression)?;

    if tokens.is_empty() {
        return Err(CompileError::EmptyExpression);
    }

    let tokens = normalize_and_keywords(tokens)?;
    let postfix = parser::to_postfix(&tokens)?;
    let postfix = normalize_apostrophes(postfix);

    debug!(
        tokens = tokens.len(),
        postfix = postfix.len(),
        "compiling search expression"
    );

    codegen::generate(&postfix, mode)
}

/// Extract the searched terms from an expression, in order
///
/// Returns the literal term texts with all operator and parenthesis tokens
/// filtered out. Apostrophe normalization still applies, so a term with an
/// apostrophe yields both spellings; AND normalization is skipped on purpose
/// since orphan operators never were terms and cannot leak into the result.
pub fn extract_terms(expression: &str) -> Result<Vec<String>> {
    let tokens = lexer::tokenize(expression)?;
    let tokens = normalize_apostrophes(tokens);

    Ok(tokens
        .into_iter()
        .filter(|token| token.kind == TokenKind::Term)
        .map(|token| token.text)
        .collect())
}

/// Forgiving AND handling: strip orphans, then collapse duplicates
///
/// Repeated commas and ANDs behave like a single AND, and a stray leading or
/// trailing AND is dropped rather than rejected.
fn normalize_and_keywords(tokens: Vec<Token>) -> Result<Vec<Token>> {
    let tokens = strip_orphan_ands(tokens)?;

    Ok(collapse_duplicate_ands(tokens))
}

/// Drop a leading and/or trailing orphan And token
///
/// A single-token sequence is left alone so a lone operator still reaches the
/// generator's arity check. A sequence of exactly two orphan And tokens would
/// strip to nothing; that is an empty expression, reported as such.
fn strip_orphan_ands(mut tokens: Vec<Token>) -> Result<Vec<Token>> {
    if tokens.len() == 1 {
        return Ok(tokens);
    }

    let leading = tokens.first().is_some_and(|t| t.kind == TokenKind::And);
    let trailing = tokens.last().is_some_and(|t| t.kind == TokenKind::And);

    if leading && trailing && tokens.len() == 2 {
        return Err(CompileError::EmptyExpression);
    }

    if trailing {
        tokens.pop();
    }
    if leading {
        tokens.remove(0);
    }

    Ok(tokens)
}

/// Collapse every run of consecutive And tokens into one
fn collapse_duplicate_ands(tokens: Vec<Token>) -> Vec<Token> {
    let mut collapsed = Vec::with_capacity(tokens.len());
    let mut previous_was_and = false;

    for token in tokens {
        let is_and = token.kind == TokenKind::And;

        if previous_was_and && is_and {
            continue;
        }

        previous_was_and = is_and;
        collapsed.push(token);
    }

    collapsed
}

/// Apostrophe tolerance: match both the straight and typographic spelling
///
/// Every term containing `'` or `’` is replaced by the typographic spelling,
/// the straight spelling, and an Or token, all at the original position.
/// Applied to the postfix sequence, this only ever expands one leaf into
/// `leaf leaf OR` and cannot disturb operator or parenthesis structure.
fn normalize_apostrophes(tokens: Vec<Token>) -> Vec<Token> {
    let mut normalized = Vec::with_capacity(tokens.len());

    for token in tokens {
        if token.kind == TokenKind::Term
            && (token.text.contains('\'') || token.text.contains('’'))
        {
            normalized.push(Token::new(
                TokenKind::Term,
                token.text.replace('\'', "’"),
                token.position,
            ));
            normalized.push(Token::new(
                TokenKind::Term,
                token.text.replace('’', "'"),
                token.position,
            ));
            normalized.push(Token::new(TokenKind::Or, "OR", token.position));
        } else {
            normalized.push(token);
        }
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn term(text: &str, position: usize) -> Token {
        Token::new(TokenKind::Term, text, position)
    }

    #[test]
    fn test_translate_empty_expression() {
        assert_eq!(
            translate("", FormsOfMode::Both).unwrap_err().kind(),
            ErrorKind::EmptyExpression
        );
        assert_eq!(
            translate("   ", FormsOfMode::Both).unwrap_err().kind(),
            ErrorKind::EmptyExpression
        );
    }

    #[test]
    fn test_translate_propagates_lexer_errors() {
        assert_eq!(
            translate("a \"b", FormsOfMode::None).unwrap_err().kind(),
            ErrorKind::UnmatchedDoubleQuote
        );
        assert_eq!(
            translate("a*b", FormsOfMode::None).unwrap_err().kind(),
            ErrorKind::MisplacedAsteriskInTerm
        );
    }

    #[test]
    fn test_translate_propagates_parser_errors() {
        assert_eq!(
            translate("(a", FormsOfMode::None).unwrap_err().kind(),
            ErrorKind::UnmatchedLeftParenthesis
        );
    }

    #[test]
    fn test_strip_leading_orphan_and() {
        let tokens = strip_orphan_ands(vec![
            Token::new(TokenKind::And, ",", 1),
            term("a", 2),
        ])
        .unwrap();
        assert_eq!(tokens, vec![term("a", 2)]);
    }

    #[test]
    fn test_strip_trailing_orphan_and() {
        let tokens = strip_orphan_ands(vec![
            term("a", 1),
            Token::new(TokenKind::And, ",", 2),
        ])
        .unwrap();
        assert_eq!(tokens, vec![term("a", 1)]);
    }

    #[test]
    fn test_strip_both_orphan_ands() {
        let tokens = strip_orphan_ands(vec![
            Token::new(TokenKind::And, ",", 1),
            term("a", 2),
            Token::new(TokenKind::And, ",", 3),
        ])
        .unwrap();
        assert_eq!(tokens, vec![term("a", 2)]);
    }

    #[test]
    fn test_single_orphan_and_is_kept_for_arity_check() {
        let input = vec![Token::new(TokenKind::And, ",", 1)];
        assert_eq!(strip_orphan_ands(input.clone()).unwrap(), input);
    }

    #[test]
    fn test_two_orphan_ands_is_an_empty_expression() {
        let input = vec![
            Token::new(TokenKind::And, ",", 1),
            Token::new(TokenKind::And, ",", 2),
        ];
        assert_eq!(
            strip_orphan_ands(input).unwrap_err(),
            CompileError::EmptyExpression
        );
    }

    #[test]
    fn test_collapse_duplicate_ands() {
        let tokens = collapse_duplicate_ands(vec![
            term("a", 1),
            Token::new(TokenKind::And, ",", 2),
            Token::new(TokenKind::And, "AND", 4),
            Token::new(TokenKind::And, ",", 8),
            term("b", 9),
        ]);
        assert_eq!(
            tokens,
            vec![
                term("a", 1),
                Token::new(TokenKind::And, ",", 2),
                term("b", 9),
            ]
        );
    }

    #[test]
    fn test_apostrophe_normalization_expands_leaf() {
        let tokens = normalize_apostrophes(vec![term("l'avion", 1)]);
        assert_eq!(
            tokens,
            vec![
                term("l’avion", 1),
                term("l'avion", 1),
                Token::new(TokenKind::Or, "OR", 1),
            ]
        );
    }

    #[test]
    fn test_apostrophe_normalization_is_spelling_insensitive() {
        assert_eq!(
            normalize_apostrophes(vec![term("l'avion", 1)]),
            normalize_apostrophes(vec![term("l’avion", 1)])
        );
    }

    #[test]
    fn test_apostrophe_normalization_ignores_plain_terms() {
        let input = vec![term("avion", 1), Token::new(TokenKind::And, "AND", 7)];
        assert_eq!(normalize_apostrophes(input.clone()), input);
    }

    #[test]
    fn test_extract_terms_in_order() {
        let terms = extract_terms("a , (( b AND c) OR (d AND e))").unwrap();
        assert_eq!(terms, ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_extract_terms_skips_operators_and_parens() {
        let terms = extract_terms("x NEAR y ONEAR z, (w)").unwrap();
        assert_eq!(terms, ["x", "y", "z", "w"]);
    }

    #[test]
    fn test_extract_terms_yields_both_apostrophe_spellings() {
        let terms = extract_terms("l'avion").unwrap();
        assert_eq!(terms, ["l’avion", "l'avion"]);
    }

    #[test]
    fn test_extract_terms_does_not_balance_the_expression() {
        // Orphan ANDs make translate fail but extraction still works.
        assert_eq!(extract_terms(",a,b,").unwrap(), ["a", "b"]);
        assert_eq!(extract_terms(",,").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_extract_terms_propagates_lexer_errors() {
        assert_eq!(
            extract_terms("\"open").unwrap_err().kind(),
            ErrorKind::UnmatchedDoubleQuote
        );
    }
}
