/// Expression parsing entry points and the comparison level.
///
/// Declares `ParseResult` and hosts the top of the expression grammar.
pub mod core;

/// Binary operator parsing.
///
/// Implements the left-associative additive and multiplicative levels and
/// the token-to-operator mapping.
pub mod binary;

/// Unary and primary expression parsing.
///
/// Handles unary minus, exponentiation, literals, grouping, and
/// identifier-or-call dispatch.
pub mod unary;

/// Statement parsing.
///
/// Implements logic for parsing statements: assignments, conditionals,
/// loops, function definitions, `return`, the print form, and expression
/// statements, plus the program rule.
pub mod statement;

/// Block parsing.
///
/// Parses brace-delimited statement sequences.
pub mod block;

/// Utility functions for the parser.
///
/// Provides shared helpers for comma-separated lists and identifiers.
pub mod utils;
