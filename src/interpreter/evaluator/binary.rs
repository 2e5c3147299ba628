use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::Evaluator, value::Value},
};

impl Evaluator<'_> {
    /// Applies a binary operator to two evaluated operands.
    ///
    /// Both operands have already been evaluated (left before right) by the
    /// caller. Failure cases — division by zero, integer overflow — are
    /// reported and yield `0`; the operation itself never aborts
    /// evaluation.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand value.
    /// - `right`: Right operand value.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The computed value.
    pub(crate) fn eval_binary(&mut self,
                              op: BinaryOperator,
                              left: Value,
                              right: Value,
                              line: usize)
                              -> Value {
        use BinaryOperator::{Add, Div, Mul, Pow, Sub};

        match op {
            Add | Sub | Mul => self.eval_arithmetic(op, left, right, line),
            Div => self.eval_division(left, right, line),
            Pow => self.eval_pow(left, right, line),
            _ => Self::eval_comparison(op, left, right),
        }
    }

    /// Evaluates `+`, `-` and `*`.
    ///
    /// Two integers stay integral, using checked arithmetic; any real
    /// operand promotes the operation to reals.
    fn eval_arithmetic(&mut self,
                       op: BinaryOperator,
                       left: Value,
                       right: Value,
                       line: usize)
                       -> Value {
        use BinaryOperator::{Add, Mul, Sub};

        match (left, right) {
            (Value::Integer(a), Value::Integer(b)) => {
                let result = match op {
                    Add => a.checked_add(b),
                    Sub => a.checked_sub(b),
                    Mul => a.checked_mul(b),
                    _ => unreachable!("eval_arithmetic only sees + - *"),
                };
                result.map_or_else(|| {
                                       self.diagnostics.report(RuntimeError::Overflow { line });
                                       Value::ZERO
                                   },
                                   Value::Integer)
            },
            _ => {
                let (a, b) = (left.as_real(), right.as_real());
                Value::Real(match op {
                                Add => a + b,
                                Sub => a - b,
                                Mul => a * b,
                                _ => unreachable!("eval_arithmetic only sees + - *"),
                            })
            },
        }
    }

    /// Evaluates `/` as true division.
    ///
    /// The result is always real, even for two integer operands. Division
    /// by zero is reported and yields `0`; evaluation of the surrounding
    /// program continues.
    fn eval_division(&mut self, left: Value, right: Value, line: usize) -> Value {
        let denominator = right.as_real();
        if denominator == 0.0 {
            self.diagnostics.report(RuntimeError::DivisionByZero { line });
            return Value::ZERO;
        }
        Value::Real(left.as_real() / denominator)
    }

    /// Evaluates `^`.
    ///
    /// An integer base with a non-negative integer exponent uses checked
    /// integer exponentiation (overflow is reported and yields `0`); a
    /// negative integer exponent and all real operands compute in floating
    /// point.
    fn eval_pow(&mut self, left: Value, right: Value, line: usize) -> Value {
        match (left, right) {
            (Value::Integer(base), Value::Integer(exponent)) if exponent >= 0 => {
                u32::try_from(exponent).ok()
                                       .and_then(|e| base.checked_pow(e))
                                       .map_or_else(|| {
                                                        self.diagnostics
                                                            .report(RuntimeError::Overflow { line });
                                                        Value::ZERO
                                                    },
                                                    Value::Integer)
            },
            _ => Value::Real(left.as_real().powf(right.as_real())),
        }
    }

    /// Evaluates the comparison operators.
    ///
    /// Two integers compare exactly; mixed operands compare as reals. The
    /// result is the boolean-like numeric `1` or `0`, which is what `if`
    /// and `while` conditions consume (non-zero is true).
    fn eval_comparison(op: BinaryOperator, left: Value, right: Value) -> Value {
        use BinaryOperator::{Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual};

        let result = match (left, right) {
            (Value::Integer(a), Value::Integer(b)) => match op {
                Less => a < b,
                Greater => a > b,
                LessEqual => a <= b,
                GreaterEqual => a >= b,
                Equal => a == b,
                NotEqual => a != b,
                _ => unreachable!("eval_comparison only sees comparison operators"),
            },
            _ => {
                let (a, b) = (left.as_real(), right.as_real());
                match op {
                    Less => a < b,
                    Greater => a > b,
                    LessEqual => a <= b,
                    GreaterEqual => a >= b,
                    Equal => a == b,
                    NotEqual => a != b,
                    _ => unreachable!("eval_comparison only sees comparison operators"),
                }
            },
        };

        Value::Integer(i64::from(result))
    }
}
