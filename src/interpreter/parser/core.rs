use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::binary::{parse_additive, token_to_binary_operator},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, comparison, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar: `expression := comparison`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_comparison(tokens)
}

/// Parses the comparison level.
///
/// Comparison operators (`<`, `>`, `<=`, `>=`, `==`, `!=`) sit at the lowest
/// precedence and are non-associative: at most one comparison may appear in
/// an expression, and a chained form like `1 < 2 < 3` is rejected.
///
/// Grammar: `comparison := additive (cmp_op additive)?`
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// Either the additive expression itself or a single comparison node.
///
/// # Errors
/// Returns [`ParseError::ChainedComparison`] when a second comparison
/// operator follows the first one.
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let left = parse_additive(tokens)?;

    if let Some((token, line)) = tokens.peek()
       && let Some(op) = token_to_binary_operator(token)
       && op.is_comparison()
    {
        let line = *line;
        tokens.next();

        let right = parse_additive(tokens)?;

        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && op.is_comparison()
        {
            return Err(ParseError::ChainedComparison { line: *line });
        }

        return Ok(Expr::BinaryOp { op,
                                   left: Box::new(left),
                                   right: Box::new(right),
                                   line });
    }

    Ok(left)
}
