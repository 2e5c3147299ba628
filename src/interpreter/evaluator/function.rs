use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator, ReturnSignal},
        value::Value,
    },
};

/// Names of the built-in math functions.
///
/// Builtins are checked before the function registry, so a user definition
/// can never shadow one. Each takes exactly one argument.
pub const BUILTIN_FUNCTIONS: &[&str] = &["sin", "cos", "tan", "exp", "log", "sqrt", "abs"];

/// Checks whether a name refers to a built-in math function.
///
/// # Example
/// ```
/// use minicalc::interpreter::evaluator::function::is_builtin_function;
///
/// assert!(is_builtin_function("sqrt"));
/// assert!(!is_builtin_function("my_function"));
/// ```
#[must_use]
pub fn is_builtin_function(name: &str) -> bool {
    BUILTIN_FUNCTIONS.contains(&name)
}

impl Evaluator<'_> {
    /// Evaluates a function call.
    ///
    /// The built-in math functions are checked first; otherwise the function
    /// registry is consulted. An arity mismatch is reported and yields `0`
    /// without evaluating the arguments or invoking the function.
    ///
    /// # Parameters
    /// - `name`: Function name.
    /// - `arguments`: Unevaluated argument expressions.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The call's value, or the in-flight return signal raised by a
    /// `return` evaluated inside an argument expression.
    pub(crate) fn eval_call(&mut self,
                            name: &str,
                            arguments: &[Expr],
                            line: usize)
                            -> EvalResult<Value> {
        if is_builtin_function(name) {
            if arguments.len() != 1 {
                self.diagnostics
                    .report(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                                  expected: 1,
                                                                  found: arguments.len(),
                                                                  line });
                return Ok(Value::ZERO);
            }
            let argument = self.eval(&arguments[0])?;
            return Ok(self.eval_builtin(name, argument, line));
        }

        self.eval_user_function(name, arguments, line)
    }

    /// Applies a built-in math function to its evaluated argument.
    ///
    /// `abs` preserves integerness; the other builtins are real-valued.
    /// Domain violations (`log` of a non-positive number, `sqrt` of a
    /// negative one) are reported and yield `0`.
    fn eval_builtin(&mut self, name: &str, argument: Value, line: usize) -> Value {
        match name {
            "sin" => Value::Real(argument.as_real().sin()),
            "cos" => Value::Real(argument.as_real().cos()),
            "tan" => Value::Real(argument.as_real().tan()),
            "exp" => Value::Real(argument.as_real().exp()),
            "log" => {
                let x = argument.as_real();
                if x <= 0.0 {
                    self.diagnostics.report(RuntimeError::InvalidArgument {
                        details: format!("log is undefined for {argument}"),
                        line,
                    });
                    return Value::ZERO;
                }
                Value::Real(x.ln())
            },
            "sqrt" => {
                let x = argument.as_real();
                if x < 0.0 {
                    self.diagnostics.report(RuntimeError::InvalidArgument {
                        details: format!("sqrt is undefined for {argument}"),
                        line,
                    });
                    return Value::ZERO;
                }
                Value::Real(x.sqrt())
            },
            "abs" => match argument {
                Value::Integer(n) => n.checked_abs().map_or_else(|| {
                                                        self.diagnostics
                                                            .report(RuntimeError::Overflow { line });
                                                        Value::ZERO
                                                    },
                                                    Value::Integer),
                Value::Real(r) => Value::Real(r.abs()),
            },
            _ => unreachable!("eval_call checked BUILTIN_FUNCTIONS"),
        }
    }

    /// Executes a user-defined function.
    ///
    /// The definition is retrieved from the registry by name; an unknown
    /// name or a parameter-count mismatch is reported and yields `0`.
    ///
    /// On a matching call the argument expressions are evaluated in the
    /// **caller's** environment, a fresh local environment is built as a
    /// snapshot copy of the caller's bindings updated with the parameters,
    /// and the body runs in that copy — so assignments inside the callee
    /// never reach the caller. A `ReturnSignal` raised in the body is caught
    /// exactly here; without one, the call's value is the last statement's
    /// value (a valueless body is reported and yields `0`).
    fn eval_user_function(&mut self,
                          name: &str,
                          arguments: &[Expr],
                          line: usize)
                          -> EvalResult<Value> {
        let Some(def) = self.functions.get(name).cloned() else {
            self.diagnostics
                .report(RuntimeError::UnknownFunction { name: name.to_string(),
                                                        line });
            return Ok(Value::ZERO);
        };

        if def.params.len() != arguments.len() {
            self.diagnostics
                .report(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                              expected: def.params.len(),
                                                              found: arguments.len(),
                                                              line });
            return Ok(Value::ZERO);
        }

        let mut argument_values = Vec::with_capacity(arguments.len());
        for argument in arguments {
            argument_values.push(self.eval(argument)?);
        }

        let mut local_env = self.env.snapshot();
        for (param, value) in def.params.iter().zip(argument_values) {
            local_env.assign(param, value);
        }

        let result = Evaluator::new(&mut local_env,
                                    &mut *self.functions,
                                    &mut *self.diagnostics).eval_block(&def.body);

        match result {
            Err(ReturnSignal { value }) => Ok(value),
            Ok(Some(value)) => Ok(value),
            Ok(None) => {
                self.diagnostics.report(RuntimeError::MissingValue { line });
                Ok(Value::ZERO)
            },
        }
    }
}
