use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::parse_comma_separated,
        },
    },
};

/// Parses a unary expression.
///
/// Supports the prefix operator `-` (numeric negation). Unary minus is
/// right-associative and binds looser than `^`, so `-2 ^ 2` is `-(2 ^ 2)`
/// while `2 ^ -3` is `2 ^ (-3)`.
///
/// Grammar:
/// ```text
///     unary := "-" unary
///            | exponent
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// An [`Expr::Negate`] or an exponentiation-level expression.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Minus, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let expr = parse_unary(tokens)?;
        Ok(Expr::Negate { expr: Box::new(expr),
                          line })
    } else {
        parse_exponent(tokens)
    }
}

/// Parses exponentiation expressions.
///
/// Exponentiation is right-associative: `a ^ b ^ c` parses as
/// `a ^ (b ^ c)`. The right-hand side re-enters the unary level so that an
/// exponent may itself be negated.
///
/// Grammar: `exponent := primary ("^" unary)?`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// An exponentiation expression tree.
fn parse_exponent<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let left = parse_primary(tokens)?;

    if let Some((Token::Caret, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let right = parse_unary(tokens)?;
        return Ok(Expr::BinaryOp { op:    BinaryOperator::Pow,
                                   left:  Box::new(left),
                                   right: Box::new(right),
                                   line });
    }

    Ok(left)
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - numeric literals
/// - identifiers and function calls
/// - parenthesized expressions
///
/// This function does not handle unary operators. It dispatches based on the
/// leading token; anything else is a parse error with a hint keyed by the
/// token kind.
///
/// Grammar (simplified):
/// ```text
///     primary := NUMBER
///              | identifier_or_call
///              | "(" expression ")"
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary
///   expression.
///
/// # Returns
/// The parsed primary [`Expr`] or a `ParseError` on failure.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let peeked = tokens.peek()
                       .ok_or(ParseError::UnexpectedEndOfInput { line: 0 })?;

    match peeked {
        (Token::Integer(..) | Token::Real(..), _) => parse_literal(tokens),
        (Token::LParen, _) => parse_grouping(tokens),
        (Token::Identifier(_), _) => parse_identifier_or_call(tokens),
        (tok @ (Token::Plus
         | Token::Star
         | Token::Slash
         | Token::Caret
         | Token::Less
         | Token::Greater
         | Token::LessEqual
         | Token::GreaterEqual
         | Token::EqualEqual
         | Token::BangEqual),
         line) => Err(ParseError::DanglingOperator { op:   operator_text(tok).to_string(),
                                                     line: *line, }),
        (Token::RParen, line) => Err(ParseError::UnexpectedClosingParen { line: *line }),
        (Token::RBrace, line) => Err(ParseError::UnexpectedClosingBrace { line: *line }),
        (tok, line) => Err(ParseError::UnexpectedToken { token: format!("{tok:?}"),
                                                         line:  *line, }),
    }
}

/// Parses a numeric literal into an [`Expr::Number`].
fn parse_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Integer(n), line)) => Ok(Expr::Number { value: (*n).into(),
                                                             line:  *line, }),
        Some((Token::Real(r), line)) => Ok(Expr::Number { value: (*r).into(),
                                                          line:  *line, }),
        _ => unreachable!("parse_primary peeked a literal"),
    }
}

/// Parses a parenthesized expression.
///
/// Expected form `( expression )`
///
/// The function consumes the opening parenthesis, parses the enclosed
/// expression, and then requires a closing `)`. Failure to find the closing
/// parenthesis yields `ParseError::ExpectedClosingParen`.
///
/// Grammar: `grouping := "(" expression ")"`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at `(`.
///
/// # Returns
/// The inner expression as-is (no wrapper node).
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().expect("parse_primary peeked '('");
    let expr = parse_expression(tokens)?;
    match tokens.next() {
        Some((Token::RParen, _)) => Ok(expr),
        _ => Err(ParseError::ExpectedClosingParen { line }),
    }
}

/// Parses an identifier or a function call.
///
/// Supported forms:
///
/// - `identifier`
/// - `identifier(arg1, arg2, ...)`
///
/// The function first consumes the identifier token. If the next token is
/// `(`, a function-call expression is parsed; whether the name is a builtin
/// or a user-defined function is resolved at evaluation time. Otherwise it
/// is a variable reference.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at an identifier.
///
/// # Returns
/// - [`Expr::Call`] if followed by parentheses,
/// - [`Expr::Variable`] otherwise.
///
/// # Errors
/// Returns a `ParseError` if call arguments fail to parse or the closing
/// `)` is missing.
fn parse_identifier_or_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (name, line) = match tokens.next() {
        Some((Token::Identifier(n), line)) => (n.clone(), *line),
        _ => unreachable!("parse_primary peeked an identifier"),
    };

    if let Some((Token::LParen, _)) = tokens.peek() {
        tokens.next();
        let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen, line)?;
        return Ok(Expr::Call { name,
                               arguments,
                               line });
    }

    Ok(Expr::Variable { name, line })
}

/// The source text of an operator token, for diagnostics.
const fn operator_text(token: &Token) -> &'static str {
    match token {
        Token::Plus => "+",
        Token::Minus => "-",
        Token::Star => "*",
        Token::Slash => "/",
        Token::Caret => "^",
        Token::Less => "<",
        Token::Greater => ">",
        Token::LessEqual => "<=",
        Token::GreaterEqual => ">=",
        Token::EqualEqual => "==",
        Token::BangEqual => "!=",
        _ => "?",
    }
}
