/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code. Parse errors include syntax mistakes, unexpected tokens, unbalanced
/// delimiters, and any other issues detected before evaluation.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation. Runtime
/// errors include things like undefined names, argument count mismatches and
/// division by zero. The evaluator reports them and keeps going; none of
/// them abort a run.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// An ordered sink of plain-text diagnostic lines.
///
/// Lexing and evaluation never abort on bad input; instead they report into
/// a `Diagnostics` value passed in by the caller and continue with a default
/// result. The caller that drives the run loop owns the sink and decides
/// when to display or discard its contents.
///
/// ## Example
/// ```
/// use minicalc::error::{Diagnostics, RuntimeError};
///
/// let mut diagnostics = Diagnostics::new();
/// diagnostics.report(RuntimeError::DivisionByZero { line: 3 });
///
/// assert_eq!(diagnostics.lines()[0], "Error on line 3: Division by zero.");
/// ```
#[derive(Debug, Default)]
pub struct Diagnostics {
    lines: Vec<String>,
}

impl Diagnostics {
    /// Creates an empty sink.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Records one diagnostic, rendered through its `Display`
    /// implementation.
    pub fn report(&mut self, error: impl std::fmt::Display) {
        self.lines.push(error.to_string());
    }

    /// The diagnostic lines recorded so far, in report order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns `true` when nothing has been reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Removes and returns all recorded lines, leaving the sink empty.
    ///
    /// Drivers call this once per evaluated input so stale diagnostics never
    /// leak into the next report.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}
