//! kqlc — keyword query language compiler
//!
//! Compiles forgiving, human-typed keyword search queries (bare terms,
//! quoted phrases, AND/OR/NOT/NEAR/ONEAR, comma-as-AND, parentheses, prefix
//! wildcards) into fuzzy-matching boolean predicates for a full-text search
//! engine (CONTAINSTABLE FORMSOF/NEAR syntax).
//!
//! ```rust
//! use kqlc::{translate, FormsOfMode};
//!
//! let predicate = translate("test", FormsOfMode::Both).unwrap();
//! assert_eq!(
//!     predicate,
//!     "(FORMSOF(INFLECTIONAL, \"test\") OR FORMSOF(THESAURUS, \"test\"))"
//! );
//! ```

pub mod compiler;
pub mod error;

pub use compiler::codegen::{generate, FormsOfMode};
pub use compiler::lexer::tokenize;
pub use compiler::parser::to_postfix;
pub use compiler::token::{Associativity, Token, TokenKind};
pub use compiler::{extract_terms, translate};
pub use error::{CompileError, ErrorKind, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
