use crate::{
    ast::{Block, Expr, Program, Stmt},
    error::{Diagnostics, RuntimeError},
    interpreter::{
        env::{Environment, FunctionRegistry},
        value::Value,
    },
};

/// The non-local control transfer raised by a `return` statement.
///
/// A `ReturnSignal` carries exactly one numeric payload and unwinds
/// evaluation up to the nearest enclosing function-call boundary, where it
/// is caught and converted into that call's result. It travels as the `Err`
/// arm of [`EvalResult`], so every evaluation step re-propagates it with
/// `?` — no host exception mechanism is involved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnSignal {
    /// The value carried back to the call boundary.
    pub value: Value,
}

/// Result type used by the evaluator.
///
/// The `Err` arm is not an error: it is the in-flight `return` signal.
/// Runtime errors never take this path — they are reported to the
/// diagnostics sink and evaluation continues with a default value.
pub type EvalResult<T> = Result<T, ReturnSignal>;

/// Walks the AST against caller-owned interpreter state.
///
/// The evaluator borrows the three state objects for the duration of one
/// evaluation: the (global or per-call) [`Environment`], the process-wide
/// [`FunctionRegistry`], and the [`Diagnostics`] sink. It holds no state of
/// its own, so the caller that drives the run loop keeps full ownership of
/// everything that outlives a single evaluation.
///
/// Evaluation is best-effort: undefined names, arity mismatches and
/// arithmetic failures are reported and replaced with `0` so the rest of
/// the program still runs.
pub struct Evaluator<'a> {
    pub(crate) env:         &'a mut Environment,
    pub(crate) functions:   &'a mut FunctionRegistry,
    pub(crate) diagnostics: &'a mut Diagnostics,
}

impl<'a> Evaluator<'a> {
    /// Creates an evaluator borrowing the given interpreter state.
    pub fn new(env: &'a mut Environment,
               functions: &'a mut FunctionRegistry,
               diagnostics: &'a mut Diagnostics)
               -> Self {
        Self { env,
               functions,
               diagnostics }
    }

    /// Evaluates a whole program against the borrowed state.
    ///
    /// Statements run in order; the program's value is the last statement's
    /// value, or `None` when that statement produced no result. A top-level
    /// `return` has no call boundary to unwind to: it stops the program and
    /// its payload becomes the program's result.
    ///
    /// # Parameters
    /// - `program`: The parsed root node.
    ///
    /// # Returns
    /// `Some(Value)` when the program produced a result, `None` otherwise.
    pub fn eval_program(&mut self, program: &Program) -> Option<Value> {
        match self.eval_statements(&program.statements) {
            Ok(result) => result,
            Err(ReturnSignal { value }) => Some(value),
        }
    }

    /// Evaluates a sequence of statements, keeping the last value.
    fn eval_statements(&mut self, statements: &[Stmt]) -> EvalResult<Option<Value>> {
        let mut last = None;
        for statement in statements {
            last = self.eval_statement(statement)?;
        }
        Ok(last)
    }

    /// Evaluates the statements of a block in the current environment.
    ///
    /// Blocks do not open a scope of their own; assignments inside a block
    /// land in the enclosing environment. The block's value is the value of
    /// its last statement (empty block: no result).
    pub(crate) fn eval_block(&mut self, block: &Block) -> EvalResult<Option<Value>> {
        self.eval_statements(&block.statements)
    }

    /// Evaluates a single statement.
    ///
    /// # Parameters
    /// - `statement`: Statement to evaluate.
    ///
    /// # Returns
    /// `Some(Value)` for statements that yield a result, or `None` when no
    /// value is produced (a skipped `if`, a definition, a `print`).
    pub fn eval_statement(&mut self, statement: &Stmt) -> EvalResult<Option<Value>> {
        match statement {
            Stmt::Expression { expr, .. } => Ok(Some(self.eval(expr)?)),
            Stmt::Assign { name, value, .. } => {
                let value = self.eval(value)?;
                Ok(Some(self.env.assign(name, value)))
            },
            Stmt::If { condition, then_block, .. } => {
                if self.eval(condition)?.is_truthy() {
                    self.eval_block(then_block)
                } else {
                    Ok(None)
                }
            },
            Stmt::IfElse { condition,
                           then_block,
                           else_block,
                           .. } => {
                if self.eval(condition)?.is_truthy() {
                    self.eval_block(then_block)
                } else {
                    self.eval_block(else_block)
                }
            },
            Stmt::While { condition, body, .. } => {
                while self.eval(condition)?.is_truthy() {
                    self.eval_block(body)?;
                }
                // Legacy convention: the loop yields whatever `x` holds
                // after the last iteration, 0 when `x` was never bound.
                Ok(Some(self.env.get("x").unwrap_or(Value::ZERO)))
            },
            Stmt::FunctionDef(def) => {
                if let Err(error) = self.functions.define(def.clone()) {
                    self.diagnostics.report(error);
                }
                Ok(None)
            },
            Stmt::Return { value, .. } => {
                let value = self.eval(value)?;
                Err(ReturnSignal { value })
            },
            Stmt::Print { value, .. } => {
                let value = self.eval(value)?;
                println!("{value}");
                Ok(None)
            },
        }
    }

    /// Evaluates an expression to a value.
    ///
    /// Expressions always produce a value; failure cases substitute `0`
    /// after reporting. Operands evaluate left before right.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The computed [`Value`], or the in-flight return signal when a
    /// `return` fired inside a nested call's argument list.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Number { value, .. } => Ok((*value).into()),
            Expr::Variable { name, line } => Ok(self.eval_variable(name, *line)),
            Expr::Negate { expr, line } => {
                let value = self.eval(expr)?;
                Ok(self.eval_negate(value, *line))
            },
            Expr::BinaryOp { op, left, right, line } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Ok(self.eval_binary(*op, left, right, *line))
            },
            Expr::Call { name, arguments, line } => self.eval_call(name, arguments, *line),
        }
    }

    /// Looks up a variable, falling back to zero.
    ///
    /// An unbound name is reported as [`RuntimeError::UnknownVariable`] and
    /// evaluates to `0`; the fallback keeps the surrounding program running.
    fn eval_variable(&mut self, name: &str, line: usize) -> Value {
        self.env.get(name).unwrap_or_else(|| {
                              self.diagnostics
                                  .report(RuntimeError::UnknownVariable { name: name.to_string(),
                                                                          line });
                              Value::ZERO
                          })
    }

    /// Arithmetic negation of an evaluated operand.
    fn eval_negate(&mut self, value: Value, line: usize) -> Value {
        match value {
            Value::Integer(n) => n.checked_neg().map_or_else(|| {
                                                    self.diagnostics
                                                        .report(RuntimeError::Overflow { line });
                                                    Value::ZERO
                                                },
                                                Value::Integer),
            Value::Real(r) => Value::Real(-r),
        }
    }
}
