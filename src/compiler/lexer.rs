//! Lexer for the keyword query language
//!
//! Tokenization runs as a short pipeline over character runs:
//!
//! 1. split the input into maximal runs of whitespace, "other" text, and
//!    singleton control characters (`(`, `)`, `"`, `,`);
//! 2. fold the runs between a double-quote pair into one literal run;
//! 3. drop pure-whitespace runs;
//! 4. classify each run against the keyword table and map it to a [`Token`];
//! 5. coalesce adjacent terms into one multi-word term.
//!
//! Classifying by character class before quote folding lets a single pass
//! treat `(` both as an implicit word separator and, inside quotes, as
//! ordinary text.

use crate::compiler::token::{Token, TokenKind};
use crate::error::{CompileError, Result};

/// A run of characters plus its 0-based starting offset
struct Run {
    text: String,
    offset: usize,
}

/// Tokenize a search expression into an ordered token sequence
///
/// Fails with [`CompileError::UnmatchedDoubleQuote`] on an unbalanced quote
/// and [`CompileError::MisplacedAsteriskInTerm`] when a term contains `*`
/// anywhere but its final character. An input with no tokens (empty or pure
/// whitespace) yields an empty sequence; rejecting it is the compiler's call.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    let runs = split(input);
    let runs = fold_literals(runs)?;
    let runs = remove_whitespace_runs(runs);
    let tokens = classify(runs)?;

    Ok(merge_adjacent_terms(tokens))
}

/// Split the input into maximal same-class character runs
///
/// Control characters are always emitted as singleton runs; whitespace and
/// "other" characters aggregate until the class changes.
fn split(input: &str) -> Vec<Run> {
    let mut runs = Vec::with_capacity(input.len() / 2);
    let mut buffer = String::new();
    let mut in_whitespace = false;
    let mut in_other = false;
    let mut run_start = 0;

    for (i, c) in input.chars().enumerate() {
        if c.is_whitespace() {
            if in_other {
                runs.push(Run {
                    text: std::mem::take(&mut buffer),
                    offset: run_start,
                });
                in_other = false;
            }
            if !in_whitespace {
                in_whitespace = true;
                run_start = i;
            }
            buffer.push(c);
        } else if is_other(c) {
            if in_whitespace {
                runs.push(Run {
                    text: std::mem::take(&mut buffer),
                    offset: run_start,
                });
                in_whitespace = false;
            }
            if !in_other {
                in_other = true;
                run_start = i;
            }
            buffer.push(c);
        } else {
            if in_whitespace || in_other {
                runs.push(Run {
                    text: std::mem::take(&mut buffer),
                    offset: run_start,
                });
                in_whitespace = false;
                in_other = false;
            }
            runs.push(Run {
                text: c.to_string(),
                offset: i,
            });
        }
    }

    if in_whitespace || in_other {
        runs.push(Run {
            text: buffer,
            offset: run_start,
        });
    }

    runs
}

/// Whether a character belongs to the "other" class (ordinary term text)
fn is_other(c: char) -> bool {
    !c.is_whitespace() && c != '(' && c != ')' && c != '"' && c != ','
}

/// Fold the runs between a double-quote pair into a single literal run
///
/// The folded run keeps its surrounding quotes so that later classification
/// never mistakes a quoted keyword for an operator; the quotes are stripped
/// once the kind is known. A quote pair with nothing between them is dropped.
fn fold_literals(runs: Vec<Run>) -> Result<Vec<Run>> {
    let mut folded = Vec::with_capacity(runs.len());
    let mut buffered: Vec<Run> = Vec::new();
    let mut in_literal = false;

    for run in runs {
        if run.text == "\"" {
            if !in_literal {
                in_literal = true;
            } else {
                if !buffered.is_empty() {
                    let offset = buffered[0].offset;
                    let mut text = String::from("\"");
                    for piece in buffered.drain(..) {
                        text.push_str(&piece.text);
                    }
                    text.push('"');
                    folded.push(Run { text, offset });
                }
                in_literal = false;
            }
            continue;
        }

        if in_literal {
            buffered.push(run);
        } else {
            folded.push(run);
        }
    }

    if in_literal {
        return Err(CompileError::UnmatchedDoubleQuote);
    }

    Ok(folded)
}

/// Drop pure-whitespace runs; they only ever served as delimiters
///
/// Quoted runs keep their surrounding quotes at this point, so a literal of
/// whitespace (`"  "`) survives.
fn remove_whitespace_runs(runs: Vec<Run>) -> Vec<Run> {
    runs.into_iter()
        .filter(|run| !run.text.trim().is_empty())
        .collect()
}

/// Map each run to a token, converting offsets to 1-based columns
fn classify(runs: Vec<Run>) -> Result<Vec<Token>> {
    let mut tokens = Vec::with_capacity(runs.len());

    for run in runs {
        let kind = keyword_kind(&run.text);
        let text = strip_quotes(run.text);
        // 1-based so positions line up with text editor columns.
        let token = Token::new(kind, text, run.offset + 1);

        if token.kind == TokenKind::Term && !is_asterisk_free_or_asterisk_ended(&token.text) {
            return Err(CompileError::MisplacedAsteriskInTerm { token });
        }

        tokens.push(token);
    }

    Ok(tokens)
}

/// Classify a run's text against the keyword table
///
/// Matching is case-insensitive and exact; `nearxxx` is a term. Quoted runs
/// still carry their quotes here and therefore never match a keyword.
fn keyword_kind(text: &str) -> TokenKind {
    match text {
        "(" => TokenKind::LeftParen,
        ")" => TokenKind::RightParen,
        "," => TokenKind::And,
        _ if text.eq_ignore_ascii_case("OR") => TokenKind::Or,
        _ if text.eq_ignore_ascii_case("AND") => TokenKind::And,
        _ if text.eq_ignore_ascii_case("NOT") => TokenKind::Not,
        _ if text.eq_ignore_ascii_case("NEAR") => TokenKind::Near,
        _ if text.eq_ignore_ascii_case("ONEAR") => TokenKind::OrderedNear,
        _ if text.eq_ignore_ascii_case("ANDNOT") => TokenKind::Not,
        _ => TokenKind::Term,
    }
}

/// Strip the surrounding double quotes left by literal folding
fn strip_quotes(text: String) -> String {
    if text.len() > 1 && text.starts_with('"') && text.ends_with('"') {
        text[1..text.len() - 1].to_string()
    } else {
        text
    }
}

/// A term may contain `*` only as its final character
fn is_asterisk_free_or_asterisk_ended(text: &str) -> bool {
    match text.find('*') {
        None => true,
        Some(index) => index == text.len() - 1,
    }
}

/// Coalesce consecutive terms into one multi-word term
///
/// Adjacent terms only exist because the whitespace between them was removed;
/// an unbroken run of bare words with no operator between them is one phrase.
/// Texts are joined with a single space and the merged token keeps the first
/// token's position.
fn merge_adjacent_terms(tokens: Vec<Token>) -> Vec<Token> {
    let mut merged = Vec::with_capacity(tokens.len());
    let mut pending: Option<Token> = None;

    for token in tokens {
        if token.kind == TokenKind::Term {
            pending = Some(match pending.take() {
                None => token,
                Some(first) => Token::new(
                    TokenKind::Term,
                    format!("{} {}", first.text, token.text),
                    first.position,
                ),
            });
        } else {
            if let Some(term) = pending.take() {
                merged.push(term);
            }
            merged.push(token);
        }
    }

    if let Some(term) = pending {
        merged.push(term);
    }

    merged
}
