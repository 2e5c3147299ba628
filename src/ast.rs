use std::fmt;

/// Represents a literal value in the language.
///
/// `LiteralValue` covers the raw constant values that can appear directly in
/// source code. The language distinguishes integer literals (no decimal
/// point) from real literals (with a decimal point), and that distinction is
/// kept all the way into evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralValue {
    /// A 64-bit signed integer literal, such as `42`.
    Integer(i64),
    /// A 64-bit floating-point literal, such as `3.14`.
    Real(f64),
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// `Expr` covers everything that produces a value when evaluated: literals,
/// variable references, unary negation, binary operations and function
/// calls. Each variant carries the source line it came from so runtime
/// diagnostics can point back at the input.
///
/// The tree is immutable once built and may be evaluated repeatedly from
/// independent environments; recursive function calls rely on that.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal.
    Number {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A binary operation (addition, comparison, etc.).
    BinaryOp {
        /// The operator.
        op:    BinaryOperator,
        /// Left operand.
        left:  Box<Self>,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// Arithmetic negation (`-x`).
    Negate {
        /// The operand expression.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// Function call expression (`sin(x)`, `f(2, 3)`).
    ///
    /// Whether the name resolves to a builtin or a user-defined function is
    /// decided at evaluation time, not here.
    Call {
        /// Name of the function being called.
        name:      String,
        /// Arguments to the function, in order.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    ///
    /// ## Example
    /// ```
    /// use minicalc::ast::Expr;
    ///
    /// let expr = Expr::Variable { name: "x".to_string(),
    ///                             line: 5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Number { line, .. }
            | Self::Variable { line, .. }
            | Self::BinaryOp { line, .. }
            | Self::Negate { line, .. }
            | Self::Call { line, .. } => *line,
        }
    }
}

/// Represents a user-defined function definition.
///
/// A function binds an ordered list of parameter names to a body block.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The name of the function.
    pub name:   String,
    /// The parameter names, possibly empty.
    pub params: Vec<String>,
    /// The body evaluated when the function is called.
    pub body:   Block,
    /// Line number in the source code.
    pub line:   usize,
}

/// A brace-delimited sequence of statements.
///
/// A block evaluates its statements in order; its value is the value of the
/// last statement, or no result for an empty block.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Statements inside the block.
    pub statements: Vec<Stmt>,
    /// Line number of the opening brace.
    pub line:       usize,
}

/// Represents a single statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// A standalone expression evaluated for its result.
    Expression {
        /// The expression to evaluate.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
    /// A variable assignment binding a name to an expression.
    ///
    /// Assignment yields the assigned value.
    Assign {
        /// The name of the variable.
        name:  String,
        /// The value which is being assigned.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// `if (condition) { ... }` without an `else` branch.
    If {
        /// The condition expression.
        condition:  Expr,
        /// Block evaluated when the condition is truthy.
        then_block: Block,
        /// Line number in the source code.
        line:       usize,
    },
    /// `if (condition) { ... } else { ... }`.
    IfElse {
        /// The condition expression.
        condition:  Expr,
        /// Block evaluated when the condition is truthy.
        then_block: Block,
        /// Block evaluated when the condition is falsy.
        else_block: Block,
        /// Line number in the source code.
        line:       usize,
    },
    /// `while (condition) { ... }`.
    While {
        /// The loop condition, re-evaluated before every iteration.
        condition: Expr,
        /// The loop body.
        body:      Block,
        /// Line number in the source code.
        line:      usize,
    },
    /// A user-defined function declaration.
    FunctionDef(FunctionDef),
    /// `return expression` — unwinds to the nearest enclosing call.
    Return {
        /// The returned expression.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// `print ( expression )` — writes the value to standard output.
    Print {
        /// The printed expression.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
}

/// The root of a parsed source unit: an ordered sequence of statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Top-level statements, in source order.
    pub statements: Vec<Stmt>,
}

/// Represents a binary operator.
///
/// Binary operators include arithmetic and comparisons.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Exponentiation (`^`)
    Pow,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
}

impl BinaryOperator {
    /// Returns `true` for the comparison operators.
    ///
    /// Comparisons form the lowest, non-associative precedence level.
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(self,
                 Self::Less
                 | Self::Greater
                 | Self::LessEqual
                 | Self::GreaterEqual
                 | Self::Equal
                 | Self::NotEqual)
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{r}"),
        }
    }
}

// The Display implementations below are the rendering contract: a
// fully-parenthesized prefix form used by collaborators for diagnostics and
// tracing. A binary operation prints as `(op left right)`, a call as
// `(call name args...)`, and so on. The rendering is structural: two trees
// render identically exactly when they are equal.

impl fmt::Display for Expr {
    /// Renders the expression in prefix notation.
    ///
    /// ## Example
    /// ```
    /// use minicalc::{error::Diagnostics, parse};
    ///
    /// let mut diagnostics = Diagnostics::new();
    /// let program = parse("1 + 2 * 3", &mut diagnostics).unwrap();
    ///
    /// assert_eq!(program.to_string(), "(program (+ 1 (* 2 3)))");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number { value, .. } => write!(f, "{value}"),
            Self::Variable { name, .. } => write!(f, "(var {name})"),
            Self::BinaryOp { op, left, right, .. } => write!(f, "({op} {left} {right})"),
            Self::Negate { expr, .. } => write!(f, "(neg {expr})"),
            Self::Call { name, arguments, .. } => {
                write!(f, "(call {name}")?;
                for argument in arguments {
                    write!(f, " {argument}")?;
                }
                write!(f, ")")
            },
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(block")?;
        for statement in &self.statements {
            write!(f, " {statement}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expression { expr, .. } => write!(f, "{expr}"),
            Self::Assign { name, value, .. } => write!(f, "(assign {name} {value})"),
            Self::If { condition, then_block, .. } => write!(f, "(if {condition} {then_block})"),
            Self::IfElse { condition,
                           then_block,
                           else_block,
                           .. } => {
                write!(f, "(if-else {condition} {then_block} {else_block})")
            },
            Self::While { condition, body, .. } => write!(f, "(while {condition} {body})"),
            Self::FunctionDef(def) => {
                write!(f, "(def {} (", def.name)?;
                for (index, param) in def.params.iter().enumerate() {
                    if index > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{param}")?;
                }
                write!(f, ") {})", def.body)
            },
            Self::Return { value, .. } => write!(f, "(return {value})"),
            Self::Print { value, .. } => write!(f, "(print {value})"),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(program")?;
        for statement in &self.statements {
            write!(f, " {statement}")?;
        }
        write!(f, ")")
    }
}
