/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, evaluates expressions and statements,
/// performs arithmetic and comparisons, manages variable state, and produces
/// results. It is the core execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Handles variables, functions, and control flow.
/// - Reports runtime errors such as division by zero or undefined names and
///   keeps going with a default value.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as
/// numbers, identifiers, operators, delimiters, and keywords. This is the
/// first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with type and source
///   location.
/// - Handles numeric literals, identifiers, keywords and operators.
/// - Reports illegal characters and skips them without failing.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and
/// constructs an AST that represents the syntactic structure of expressions
/// and statements. This enables the evaluator to execute user code.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates correct grammar and syntax, reporting errors with location
///   info and a remediation hint where one is determinable.
/// - Supports arithmetic, function calls, assignments, conditionals and
///   loops.
pub mod parser;
/// The environment and function registry hold the interpreter state.
///
/// Both live for a whole run and are owned by the caller driving the run
/// loop; the evaluator only borrows them.
///
/// # Responsibilities
/// - Maps variable names to their current values (flat, non-lexical).
/// - Maps function names to their definitions, insert-once.
pub mod env;
/// The value module defines the runtime data type for evaluation.
///
/// The language is purely numeric; this module declares the `Value` enum
/// with its integer and real variants, truthiness, and promotion.
pub mod value;
