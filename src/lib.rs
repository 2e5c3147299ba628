//! # minicalc
//!
//! minicalc is a small imperative expression language interpreter written in
//! Rust. It parses and evaluates arithmetic, comparisons, variable
//! assignments, conditionals, while-loops, user-defined functions and a
//! handful of built-in math functions.
//!
//! The core is the classic three-stage pipeline: lexical analysis →
//! syntactic analysis (AST construction) → tree-walking evaluation. The
//! interpreter state — one global environment and one function registry per
//! run — is owned by the caller and passed by reference into [`evaluate`],
//! and errors found while running are reported into a [`Diagnostics`] sink
//! instead of aborting: the evaluator substitutes `0` and keeps going.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::interpreter::{
    evaluator::core::Evaluator,
    lexer::tokenize,
    parser::statement::parse_program,
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Stmt` enums and related types that
/// represent the syntactic structure of source code as a tree. The AST is
/// built by the parser and traversed by the evaluator; its `Display`
/// implementations render the fully-parenthesized prefix form used for
/// diagnostics and tracing.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source line numbers to AST nodes for error reporting.
/// - Renders any node as prefix text.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing,
/// or evaluating code, together with the `Diagnostics` sink that carries
/// non-fatal reports to the caller as a side channel.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line numbers and remediation hints for user feedback.
/// - Collects best-effort diagnostics without interrupting evaluation.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, the value
/// representation and the interpreter state to provide a complete runtime
/// for source code evaluation.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, state.
/// - Provides entry points for parsing and evaluating user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;

pub use crate::{
    ast::Program,
    error::{Diagnostics, ParseError},
    interpreter::{
        env::{Environment, FunctionRegistry},
        value::Value,
    },
};

/// Parses source text into a [`Program`].
///
/// Lexing is total: illegal characters are reported into `diagnostics` and
/// skipped. Parsing is not: a malformed token sequence produces a single
/// [`ParseError`] naming the offending token, its line and a remediation
/// hint where one is determinable, and no AST is returned for that input —
/// there is no statement-level recovery and no partial tree.
///
/// # Errors
/// Returns the first [`ParseError`] found in the token sequence.
///
/// # Examples
/// ```
/// use minicalc::{Diagnostics, parse};
///
/// let mut diagnostics = Diagnostics::new();
///
/// let program = parse("x = 1 + 2", &mut diagnostics).unwrap();
/// assert_eq!(program.to_string(), "(program (assign x (+ 1 2)))");
///
/// // `1 +` has a missing operand: no AST comes back.
/// assert!(parse("1 +", &mut diagnostics).is_err());
/// ```
pub fn parse(source: &str, diagnostics: &mut Diagnostics) -> Result<Program, ParseError> {
    let tokens = tokenize(source, diagnostics);
    let mut iter = tokens.iter().peekable();

    parse_program(&mut iter)
}

/// Evaluates a parsed program against caller-owned interpreter state.
///
/// The environment and function registry persist across calls, so a driver
/// can feed one statement (or file) at a time into the same state. Runtime
/// errors — undefined names, arity mismatches, division by zero — are
/// reported into `diagnostics` and replaced with `0`; evaluation always
/// runs to completion. A top-level `return` stops the program and becomes
/// its result.
///
/// # Parameters
/// - `program`: The parsed root node.
/// - `env`: The global environment for this run.
/// - `functions`: The function registry for this run.
/// - `diagnostics`: Sink receiving one line per runtime error.
///
/// # Returns
/// `Some(Value)` when the last evaluated statement produced a result,
/// `None` otherwise.
///
/// # Examples
/// ```
/// use minicalc::{Diagnostics, Environment, FunctionRegistry, Value, evaluate, parse};
///
/// let mut diagnostics = Diagnostics::new();
/// let mut env = Environment::new();
/// let mut functions = FunctionRegistry::new();
///
/// let program = parse("x = 5 x + 1", &mut diagnostics).unwrap();
/// let result = evaluate(&program, &mut env, &mut functions, &mut diagnostics);
///
/// assert_eq!(result, Some(Value::Integer(6)));
/// assert_eq!(env.get("x"), Some(Value::Integer(5)));
/// assert!(diagnostics.is_empty());
/// ```
pub fn evaluate(program: &Program,
                env: &mut Environment,
                functions: &mut FunctionRegistry,
                diagnostics: &mut Diagnostics)
                -> Option<Value> {
    Evaluator::new(env, functions, diagnostics).eval_program(program)
}

/// Parses and evaluates a source string in one step.
///
/// Convenience wrapper for drivers: equivalent to [`parse`] followed by
/// [`evaluate`] against the same state.
///
/// # Errors
/// Returns the [`ParseError`] when the source does not parse; nothing is
/// evaluated in that case.
///
/// # Examples
/// ```
/// use minicalc::{Diagnostics, Environment, FunctionRegistry, Value, interpret};
///
/// let mut diagnostics = Diagnostics::new();
/// let mut env = Environment::new();
/// let mut functions = FunctionRegistry::new();
///
/// let source = "def double(n) { return n * 2 } double(21)";
/// let result = interpret(source, &mut env, &mut functions, &mut diagnostics).unwrap();
///
/// assert_eq!(result, Some(Value::Integer(42)));
/// ```
pub fn interpret(source: &str,
                 env: &mut Environment,
                 functions: &mut FunctionRegistry,
                 diagnostics: &mut Diagnostics)
                 -> Result<Option<Value>, ParseError> {
    let program = parse(source, diagnostics)?;
    Ok(evaluate(&program, env, functions, diagnostics))
}
