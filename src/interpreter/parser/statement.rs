use std::iter::Peekable;

use crate::{
    ast::{Block, Expr, FunctionDef, Program, Stmt},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression},
            utils::{parse_comma_separated, parse_identifier},
        },
    },
};

/// Parses a whole program: a sequence of statements until end of input.
///
/// Statement separation is purely by grammar shape; newlines carry no
/// meaning. Any parse failure aborts the whole program — no partial tree is
/// produced.
///
/// Grammar: `program := statement*`
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, line)` pairs.
///
/// # Returns
/// The parsed [`Program`] root node.
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Program>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut statements = Vec::new();

    while tokens.peek().is_some() {
        statements.push(parse_statement(tokens)?);
    }

    Ok(Program { statements })
}

/// Parses a single statement.
///
/// A statement may be one of:
/// - an `if` / `if`-`else` conditional,
/// - a `while` loop,
/// - a function definition,
/// - a `return` statement,
/// - the print form `print ( expression )`,
/// - an assignment,
/// - an expression used as a statement.
///
/// The leading token decides the construct. `print` is not a reserved word:
/// the print form is recognized only in statement position when the
/// identifier `print` is immediately followed by `(`. Assignments are
/// detected with one token of lookahead (`ID =`), which distinguishes them
/// from a comparison such as `x == 3`.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, line)` pairs.
///
/// # Returns
/// A parsed [`Stmt`] node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::If, line)) => {
            let line = *line;
            tokens.next();
            parse_if_statement(tokens, line)
        },
        Some((Token::While, line)) => {
            let line = *line;
            tokens.next();
            parse_while_statement(tokens, line)
        },
        Some((Token::Def, line)) => {
            let line = *line;
            tokens.next();
            parse_function_definition(tokens, line)
        },
        Some((Token::Return, line)) => {
            let line = *line;
            tokens.next();
            let value = parse_expression(tokens)?;
            Ok(Stmt::Return { value, line })
        },
        Some((Token::Identifier(name), line)) => {
            let (name, line) = (name.clone(), *line);

            let mut lookahead = tokens.clone();
            lookahead.next();
            match lookahead.peek() {
                Some((Token::Equals, _)) => {
                    tokens.next();
                    tokens.next();
                    let value = parse_expression(tokens)?;
                    Ok(Stmt::Assign { name, value, line })
                },
                Some((Token::LParen, _)) if name == "print" => {
                    tokens.next();
                    tokens.next();
                    let value = parse_expression(tokens)?;
                    match tokens.next() {
                        Some((Token::RParen, _)) => Ok(Stmt::Print { value, line }),
                        _ => Err(ParseError::ExpectedClosingParen { line }),
                    }
                },
                _ => parse_expression_statement(tokens),
            }
        },
        _ => parse_expression_statement(tokens),
    }
}

/// Parses an expression used as a statement.
fn parse_expression_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = tokens.peek().map_or(0, |(_, l)| *l);
    let expr = parse_expression(tokens)?;

    Ok(Stmt::Expression { expr, line })
}

/// Parses an `if` statement with an optional `else` branch.
///
/// Syntax:
/// ```text
///     if (condition) { statements }
///     if (condition) { statements } else { statements }
/// ```
/// Both branches are brace-delimited blocks, so an `else` always binds to
/// the `if` whose block it follows — the nearest unmatched one.
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `if` keyword.
/// - `line`: Line number of the `if` token.
///
/// # Returns
/// A [`Stmt::If`] or [`Stmt::IfElse`] node.
///
/// # Errors
/// - [`ParseError::IncompleteCondition`] when the parenthesized condition or
///   the block after it is missing.
/// - Propagates any errors from sub-expression parsing.
fn parse_if_statement<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let condition = parse_condition(tokens, "if", line)?;
    let then_block = parse_statement_block(tokens, "if", line)?;

    if let Some((Token::Else, _)) = tokens.peek() {
        tokens.next();

        let else_block = match tokens.peek() {
            Some((Token::LBrace, brace_line)) => {
                let brace_line = *brace_line;
                tokens.next();
                parse_block(tokens, brace_line)?
            },
            Some((tok, line)) => {
                return Err(ParseError::UnexpectedToken { token: format!("Expected '{{' after 'else', found {tok:?}"),
                                                         line:  *line, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        };

        return Ok(Stmt::IfElse { condition,
                                 then_block,
                                 else_block,
                                 line });
    }

    Ok(Stmt::If { condition,
                  then_block,
                  line })
}

/// Parses a `while` statement.
///
/// Syntax: `while (condition) { statements }`
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `while` keyword.
/// - `line`: Line number of the `while` token.
///
/// # Returns
/// A [`Stmt::While`] node.
fn parse_while_statement<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let condition = parse_condition(tokens, "while", line)?;
    let body = parse_statement_block(tokens, "while", line)?;

    Ok(Stmt::While { condition,
                     body,
                     line })
}

/// Parses the parenthesized condition of an `if` or `while` head.
///
/// A missing `(` is an incomplete condition; a missing `)` is an unbalanced
/// parenthesis.
fn parse_condition<'a, I>(tokens: &mut Peekable<I>,
                          keyword: &'static str,
                          line: usize)
                          -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::LParen, _)) => {
            tokens.next();
        },
        _ => return Err(ParseError::IncompleteCondition { keyword, line }),
    }

    let condition = parse_expression(tokens)?;

    match tokens.next() {
        Some((Token::RParen, _)) => Ok(condition),
        _ => Err(ParseError::ExpectedClosingParen { line }),
    }
}

/// Parses the block belonging to an `if` or `while` head.
///
/// A missing `{` is reported as an incomplete condition, matching the hint
/// given for a missing parenthesis.
fn parse_statement_block<'a, I>(tokens: &mut Peekable<I>,
                                keyword: &'static str,
                                line: usize)
                                -> ParseResult<Block>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::LBrace, brace_line)) => {
            let brace_line = *brace_line;
            tokens.next();
            parse_block(tokens, brace_line)
        },
        _ => Err(ParseError::IncompleteCondition { keyword, line }),
    }
}

/// Parses a function definition.
///
/// Syntax: `def name(param1, param2, ...) { statements }`
///
/// The parameter list may be empty. The definition only builds the AST node;
/// registering the function (and rejecting duplicates) happens at
/// evaluation time.
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `def` keyword.
/// - `line`: Line number of the `def` token.
///
/// # Returns
/// A [`Stmt::FunctionDef`] node.
///
/// # Errors
/// Returns [`ParseError::InvalidFunctionDefinition`] when the name, the
/// parameter list parentheses, or the body brace is missing.
fn parse_function_definition<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let name = match tokens.peek() {
        Some((Token::Identifier(_), _)) => parse_identifier(tokens)?,
        _ => return Err(ParseError::InvalidFunctionDefinition { line }),
    };

    match tokens.peek() {
        Some((Token::LParen, _)) => {
            tokens.next();
        },
        _ => return Err(ParseError::InvalidFunctionDefinition { line }),
    }

    let params = parse_comma_separated(tokens, parse_identifier, &Token::RParen, line)?;

    let body = match tokens.peek() {
        Some((Token::LBrace, brace_line)) => {
            let brace_line = *brace_line;
            tokens.next();
            parse_block(tokens, brace_line)?
        },
        _ => return Err(ParseError::InvalidFunctionDefinition { line }),
    };

    Ok(Stmt::FunctionDef(FunctionDef { name,
                                       params,
                                       body,
                                       line }))
}
