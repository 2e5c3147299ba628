use std::collections::HashMap;

use crate::{
    ast::FunctionDef,
    error::RuntimeError,
    interpreter::{evaluator::function::is_builtin_function, value::Value},
};

/// A mutable mapping from variable name to numeric value.
///
/// Exactly one global environment exists for the lifetime of a run; it is
/// owned by the caller that drives the run loop and passed by reference into
/// evaluation. The mapping is deliberately flat: blocks and loops share the
/// enclosing environment, and only function calls get their own — a
/// [`snapshot`](Self::snapshot) copy of the caller's bindings, discarded
/// when the call returns. There is no parent-pointer chain and no lexical
/// scoping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    bindings: HashMap<String, Value>,
}

impl Environment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a variable.
    ///
    /// Returns `None` when the name is unbound; the evaluator reports the
    /// failure and substitutes zero.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        self.bindings.get(name).copied()
    }

    /// Binds `name` to `value`, inserting or overwriting, and returns the
    /// stored value. Assignment never fails; it is itself an expression
    /// whose value is the right-hand side.
    ///
    /// ## Example
    /// ```
    /// use minicalc::interpreter::{env::Environment, value::Value};
    ///
    /// let mut env = Environment::new();
    ///
    /// assert_eq!(env.assign("x", Value::Integer(5)), Value::Integer(5));
    /// assert_eq!(env.get("x"), Some(Value::Integer(5)));
    ///
    /// env.assign("x", Value::Integer(7));
    /// assert_eq!(env.get("x"), Some(Value::Integer(7)));
    /// ```
    pub fn assign(&mut self, name: &str, value: Value) -> Value {
        self.bindings.insert(name.to_string(), value);
        value
    }

    /// Copies the environment for a function call.
    ///
    /// The callee sees the caller's bindings as of the moment of call;
    /// assignments inside the callee never reach the caller (copy-in,
    /// no-copy-out).
    #[must_use]
    pub fn snapshot(&self) -> Self {
        self.clone()
    }
}

/// A mapping from function name to its definition.
///
/// Populated by `def` statements, consulted by call evaluation. A name is
/// registered exactly once: redefinition is an error and leaves the first
/// definition intact. Definitions are never removed.
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, FunctionDef>,
}

impl FunctionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a function definition.
    ///
    /// # Errors
    /// - [`RuntimeError::FunctionAlreadyDefined`] when the name is taken;
    ///   the existing definition is kept.
    /// - [`RuntimeError::BuiltinFunctionRedefinition`] when the name belongs
    ///   to a built-in math function.
    pub fn define(&mut self, def: FunctionDef) -> Result<(), RuntimeError> {
        if is_builtin_function(&def.name) {
            return Err(RuntimeError::BuiltinFunctionRedefinition { name: def.name,
                                                                   line: def.line, });
        }
        if self.functions.contains_key(&def.name) {
            return Err(RuntimeError::FunctionAlreadyDefined { name: def.name,
                                                              line: def.line, });
        }
        self.functions.insert(def.name.clone(), def);
        Ok(())
    }

    /// Looks up a function definition by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(name)
    }
}
