//! PHPDoc type-expression compiler.
//!
//! This crate turns textual PHPDoc-style type annotations — arrays, shaped
//! arrays and lists, unions, and magic operators such as `key-of<T>` — into
//! an immutable typed AST that a mapping or validation layer can consume.
//!
//! The pipeline:
//!
//! 1. [`scanner`] isolates the exact substring holding one type expression
//!    inside a free-form docblock (`@var`, `@param`, `@return`, aliases…).
//! 2. [`token`] lexes that substring into a flat token sequence.
//! 3. [`parser`] drives a recursive-descent grammar over a
//!    [`stream::TokenStream`], producing a [`types::Type`] or a structured
//!    [`error::ParseError`].
//!
//! ```
//! use phpdoc_types::parser::TypeParser;
//! use phpdoc_types::scanner;
//! use phpdoc_types::types::Type;
//!
//! let raw = scanner::var_type("/** @var array{name: string} the config */").unwrap();
//! assert_eq!(raw, "array{name: string}");
//!
//! let ty = TypeParser::new().parse(&raw).unwrap();
//! assert!(matches!(ty, Type::ShapedArray(_)));
//! ```
//!
//! Parsing is synchronous and allocation-light: each parse owns its own
//! token stream and produces a fresh AST, so results can be shared or
//! cached freely afterwards.

pub mod error;
pub mod parser;
pub mod scanner;
pub mod stream;
pub mod token;
pub mod types;

pub use error::ParseError;
pub use parser::TypeParser;
pub use types::Type;

/// Parse a type expression with a default parser (no enums registered).
pub fn parse_type(raw: &str) -> Result<Type, ParseError> {
    TypeParser::new().parse(raw)
}
