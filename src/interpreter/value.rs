use crate::ast::LiteralValue;

/// A runtime value produced by evaluation.
///
/// The language is purely numeric: every expression evaluates to either a
/// 64-bit integer or a double-precision real. Integer literals stay integral
/// through `+`, `-` and `*`; division and the math builtins are real-valued.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A double-precision floating-point number.
    Real(f64),
}

impl Value {
    /// The zero substituted for failed evaluations.
    pub const ZERO: Self = Self::Integer(0);

    /// Conditions treat any non-zero number as true.
    ///
    /// ## Example
    /// ```
    /// use minicalc::interpreter::value::Value;
    ///
    /// assert!(Value::Integer(2).is_truthy());
    /// assert!(!Value::Real(0.0).is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(self) -> bool {
        match self {
            Self::Integer(n) => n != 0,
            Self::Real(r) => r != 0.0,
        }
    }

    /// The value as an `f64`, promoting integers.
    ///
    /// Promotion may round integers above 2^53; the interpreter accepts that
    /// the same way the host's float arithmetic does.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_real(self) -> f64 {
        match self {
            Self::Integer(n) => n as f64,
            Self::Real(r) => r,
        }
    }

    /// Returns `true` when the value is an integer.
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::Integer(_))
    }
}

impl From<LiteralValue> for Value {
    fn from(value: LiteralValue) -> Self {
        match value {
            LiteralValue::Integer(n) => Self::Integer(n),
            LiteralValue::Real(r) => Self::Real(r),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{r}"),
        }
    }
}
