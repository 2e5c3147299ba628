use std::fs;

use minicalc::{
    Diagnostics, Environment, FunctionRegistry, ParseError, Value, evaluate, interpret, parse,
};
use walkdir::WalkDir;

/// Runs a script against fresh state and returns its result together with
/// the drained diagnostics.
fn run(source: &str) -> (Option<Value>, Vec<String>) {
    let mut diagnostics = Diagnostics::new();
    let mut env = Environment::new();
    let mut functions = FunctionRegistry::new();

    let result = interpret(source, &mut env, &mut functions, &mut diagnostics)
        .unwrap_or_else(|e| panic!("Script failed to parse:\n{source}\nError: {e}"));

    (result, diagnostics.drain())
}

/// Runs a script that must produce a value with no diagnostics.
fn eval_clean(source: &str) -> Value {
    let (result, diagnostics) = run(source);
    assert!(diagnostics.is_empty(),
            "Script reported diagnostics:\n{source}\n{diagnostics:?}");
    result.unwrap_or_else(|| panic!("Script produced no result:\n{source}"))
}

/// Parses a script that must fail, returning the parse error.
fn parse_error(source: &str) -> ParseError {
    let mut diagnostics = Diagnostics::new();
    match parse(source, &mut diagnostics) {
        Ok(program) => panic!("Script parsed but was expected to fail:\n{source}\n{program}"),
        Err(error) => error,
    }
}

#[test]
fn demo_scripts_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("demos").into_iter()
                             .filter_map(Result::ok)
                             .filter(|e| e.path().extension().is_some_and(|ext| ext == "calc"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        let mut diagnostics = Diagnostics::new();
        let mut env = Environment::new();
        let mut functions = FunctionRegistry::new();
        match interpret(&source, &mut env, &mut functions, &mut diagnostics) {
            Ok(_) => assert!(diagnostics.is_empty(),
                             "Demo {path:?} reported diagnostics: {:?}",
                             diagnostics.lines()),
            Err(e) => panic!("Demo {path:?} failed to parse: {e}"),
        }
    }

    assert!(count > 0, "No demo scripts found in demos/");
}

#[test]
fn arithmetic_precedence() {
    assert_eq!(eval_clean("1 + 2 * 3"), Value::Integer(7));
    assert_eq!(eval_clean("(1 + 2) * 3"), Value::Integer(9));
    assert_eq!(eval_clean("10 - 2 - 3"), Value::Integer(5));
    assert_eq!(eval_clean("2 + 3 * 4 - 5"), Value::Integer(9));
    assert_eq!(eval_clean("1.5 + 1"), Value::Real(2.5));
}

#[test]
fn exponentiation_and_unary_minus() {
    // `^` is right-associative and binds tighter than unary minus.
    assert_eq!(eval_clean("2 ^ 3 ^ 2"), Value::Integer(512));
    assert_eq!(eval_clean("-2 ^ 2"), Value::Integer(-4));
    assert_eq!(eval_clean("(-2) ^ 2"), Value::Integer(4));
    assert_eq!(eval_clean("2 ^ -1"), Value::Real(0.5));
    assert_eq!(eval_clean("--5"), Value::Integer(5));
    assert_eq!(eval_clean("2 * -3"), Value::Integer(-6));
}

#[test]
fn division_is_real_valued() {
    assert_eq!(eval_clean("7 / 2"), Value::Real(3.5));
    assert_eq!(eval_clean("6 / 3"), Value::Real(2.0));
}

#[test]
fn comparisons_yield_numeric_booleans() {
    assert_eq!(eval_clean("2 < 3"), Value::Integer(1));
    assert_eq!(eval_clean("2 > 3"), Value::Integer(0));
    assert_eq!(eval_clean("2 <= 2"), Value::Integer(1));
    assert_eq!(eval_clean("3 >= 4"), Value::Integer(0));
    assert_eq!(eval_clean("2 == 2"), Value::Integer(1));
    assert_eq!(eval_clean("2 != 3"), Value::Integer(1));
    assert_eq!(eval_clean("1.0 == 1"), Value::Integer(1));
}

#[test]
fn rendering_is_structural() {
    let mut diagnostics = Diagnostics::new();

    let program = parse("1 + 2 * 3", &mut diagnostics).unwrap();
    assert_eq!(program.to_string(), "(program (+ 1 (* 2 3)))");

    // Textually different, structurally equal inputs render identically.
    let grouped = parse("1 + (2 * 3)", &mut diagnostics).unwrap();
    assert_eq!(program.to_string(), grouped.to_string());

    let def = parse("def f(a, b) { return a + b }", &mut diagnostics).unwrap();
    assert_eq!(def.to_string(),
               "(program (def f (a b) (block (return (+ (var a) (var b))))))");

    let conditional = parse("if (x < 1) { print(x) } else { x = 0 }", &mut diagnostics).unwrap();
    assert_eq!(conditional.to_string(),
               "(program (if-else (< (var x) 1) (block (print (var x))) (block (assign x 0))))");
}

#[test]
fn assignment_binds_and_yields_its_value() {
    let mut diagnostics = Diagnostics::new();
    let mut env = Environment::new();
    let mut functions = FunctionRegistry::new();

    let program = parse("x = 5 x + 1", &mut diagnostics).unwrap();
    let result = evaluate(&program, &mut env, &mut functions, &mut diagnostics);

    assert_eq!(result, Some(Value::Integer(6)));
    assert_eq!(env.get("x"), Some(Value::Integer(5)));
    assert!(diagnostics.is_empty());

    assert_eq!(eval_clean("x = 5"), Value::Integer(5));
}

#[test]
fn environment_persists_across_evaluations() {
    let mut diagnostics = Diagnostics::new();
    let mut env = Environment::new();
    let mut functions = FunctionRegistry::new();

    interpret("counter = 1", &mut env, &mut functions, &mut diagnostics).unwrap();
    let result =
        interpret("counter = counter + 1", &mut env, &mut functions, &mut diagnostics).unwrap();

    assert_eq!(result, Some(Value::Integer(2)));
    assert!(diagnostics.is_empty());
}

#[test]
fn user_defined_functions() {
    assert_eq!(eval_clean("def f(a, b) { return a + b } f(2, 3)"),
               Value::Integer(5));
    assert_eq!(eval_clean("def square(n) { return n * n } square(square(2))"),
               Value::Integer(16));
    // Fall-through: without a return, the last statement's value is the
    // call's result.
    assert_eq!(eval_clean("def g(n) { n * 2 } g(4)"), Value::Integer(8));
}

#[test]
fn arity_mismatch_reports_and_yields_zero() {
    let (result, diagnostics) = run("def f(a, b) { return a + b } f(1)");

    assert_eq!(result, Some(Value::Integer(0)));
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].contains("expects 2 arguments, but 1 were provided"),
            "unexpected diagnostic: {}",
            diagnostics[0]);
}

#[test]
fn division_by_zero_recovers() {
    let (result, diagnostics) = run("1 / 0 5");

    assert_eq!(result, Some(Value::Integer(5)));
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].contains("Division by zero"));
}

#[test]
fn while_loop_yields_x() {
    // `x` starts undefined: the condition and the first right-hand side
    // both fall back to 0 with a report each, then the loop runs to 3.
    let (result, diagnostics) = run("while (x < 3) { x = x + 1 }");

    assert_eq!(result, Some(Value::Integer(3)));
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics.iter().all(|d| d.contains("Unknown variable 'x'")));

    // The convention reads exactly `x`, not the loop variable.
    let (result, diagnostics) = run("y = 0 while (y < 2) { y = y + 1 }");
    assert_eq!(result, Some(Value::Integer(0)));
    assert!(diagnostics.is_empty());

    // A loop whose body never runs still yields `x`.
    assert_eq!(eval_clean("x = 9 while (0) { x = 1 }"), Value::Integer(9));
}

#[test]
fn function_redefinition_keeps_first_definition() {
    let (result, diagnostics) = run("def f() { return 1 } def f() { return 2 } f()");

    assert_eq!(result, Some(Value::Integer(1)));
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].contains("Function 'f' is already defined"));
}

#[test]
fn builtin_redefinition_is_rejected() {
    let (result, diagnostics) = run("def sqrt(n) { return n } sqrt(9)");

    assert_eq!(result, Some(Value::Real(3.0)));
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].contains("Cannot redefine built-in function 'sqrt'"));
}

#[test]
fn calls_copy_the_callers_environment() {
    let mut diagnostics = Diagnostics::new();
    let mut env = Environment::new();
    let mut functions = FunctionRegistry::new();

    let source = "x = 1 def f() { x = 2 } f() x";
    let result = interpret(source, &mut env, &mut functions, &mut diagnostics).unwrap();

    assert_eq!(result, Some(Value::Integer(1)));
    assert_eq!(env.get("x"), Some(Value::Integer(1)));
    assert!(diagnostics.is_empty());

    // The callee sees the caller's bindings as of the moment of call.
    assert_eq!(eval_clean("x = 3 def f(y) { return y + x } f(2)"),
               Value::Integer(5));
}

#[test]
fn return_unwinds_to_the_nearest_call() {
    let source = "def f() {
                      n = 0
                      while (n < 10) {
                          n = n + 1
                          if (n == 3) {
                              return n
                          }
                      }
                      return 0
                  }
                  f()";
    assert_eq!(eval_clean(source), Value::Integer(3));
}

#[test]
fn top_level_return_stops_the_program() {
    let (result, diagnostics) = run("return 42 1 / 0");

    assert_eq!(result, Some(Value::Integer(42)));
    assert!(diagnostics.is_empty(), "statements after return must not run");
}

#[test]
fn recursion() {
    let source = "def fact(n) {
                      if (n <= 1) {
                          return 1
                      }
                      return n * fact(n - 1)
                  }
                  fact(5)";
    assert_eq!(eval_clean(source), Value::Integer(120));
}

#[test]
fn builtin_math_functions() {
    assert_eq!(eval_clean("sqrt(9)"), Value::Real(3.0));
    assert_eq!(eval_clean("abs(-5)"), Value::Integer(5));
    assert_eq!(eval_clean("abs(-5.5)"), Value::Real(5.5));
    assert_eq!(eval_clean("sin(0)"), Value::Real(0.0));
    assert_eq!(eval_clean("cos(0)"), Value::Real(1.0));
    assert_eq!(eval_clean("exp(0)"), Value::Real(1.0));
    assert_eq!(eval_clean("log(1)"), Value::Real(0.0));
}

#[test]
fn builtin_domain_and_arity_errors_recover() {
    let (result, diagnostics) = run("sqrt(-1)");
    assert_eq!(result, Some(Value::Integer(0)));
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].contains("sqrt is undefined"));

    let (result, diagnostics) = run("log(0)");
    assert_eq!(result, Some(Value::Integer(0)));
    assert_eq!(diagnostics.len(), 1);

    let (result, diagnostics) = run("sin(1, 2)");
    assert_eq!(result, Some(Value::Integer(0)));
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].contains("expects 1 arguments"));
}

#[test]
fn integer_overflow_recovers() {
    let (result, diagnostics) = run("9223372036854775807 + 1");
    assert_eq!(result, Some(Value::Integer(0)));
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].contains("overflow"));

    let (result, diagnostics) = run("2 ^ 100");
    assert_eq!(result, Some(Value::Integer(0)));
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].contains("overflow"));
}

#[test]
fn unknown_names_fall_back_to_zero() {
    let (result, diagnostics) = run("y + 1");
    assert_eq!(result, Some(Value::Integer(1)));
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].contains("Unknown variable 'y'"));

    let (result, diagnostics) = run("nope(1) + 2");
    assert_eq!(result, Some(Value::Integer(2)));
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].contains("Unknown function 'nope'"));
}

#[test]
fn conditionals() {
    assert_eq!(eval_clean("if (1) { 42 }"), Value::Integer(42));
    assert_eq!(eval_clean("if (0) { 1 } else { 2 }"), Value::Integer(2));
    // An untaken bare `if` yields no result at all.
    let (result, diagnostics) = run("if (0) { 42 }");
    assert_eq!(result, None);
    assert!(diagnostics.is_empty());

    // `else` binds to the nearest `if`.
    assert_eq!(eval_clean("if (1) { if (0) { 1 } else { 2 } }"),
               Value::Integer(2));

    assert_eq!(eval_clean("x = 10 if (x > 5) { x = x * 2 } x"),
               Value::Integer(20));
}

#[test]
fn print_yields_no_result() {
    let (result, diagnostics) = run("print(3 + 4)");
    assert_eq!(result, None);
    assert!(diagnostics.is_empty());
}

#[test]
fn comments_and_illegal_characters() {
    assert_eq!(eval_clean("1 + 2 // trailing comment"), Value::Integer(3));
    assert_eq!(eval_clean("/* spanning\n   two lines */ 7"), Value::Integer(7));

    let (result, diagnostics) = run("1 + $ 2");
    assert_eq!(result, Some(Value::Integer(3)));
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].contains("Illegal character '$'"));
}

#[test]
fn diagnostics_carry_line_numbers() {
    let (_, diagnostics) = run("\n\n1 / 0");
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].contains("line 3"), "got: {}", diagnostics[0]);
}

#[test]
fn keywords_use_longest_match() {
    assert_eq!(eval_clean("iffy = 1 iffy"), Value::Integer(1));
    assert_eq!(eval_clean("defer = 2 defer"), Value::Integer(2));
}

#[test]
fn parse_failures() {
    assert!(matches!(parse_error("1 +"),
                     ParseError::UnexpectedEndOfInput { .. }));
    assert!(matches!(parse_error("(1 + 2"),
                     ParseError::ExpectedClosingParen { .. }));
    assert!(matches!(parse_error(") + 1"),
                     ParseError::UnexpectedClosingParen { .. }));
    assert!(matches!(parse_error("* 3"), ParseError::DanglingOperator { .. }));
    assert!(matches!(parse_error("1 + * 3"),
                     ParseError::DanglingOperator { .. }));
    assert!(matches!(parse_error("1 < 2 < 3"),
                     ParseError::ChainedComparison { .. }));
    assert!(matches!(parse_error("if (1) 2"),
                     ParseError::IncompleteCondition { keyword: "if", .. }));
    assert!(matches!(parse_error("while x { }"),
                     ParseError::IncompleteCondition { keyword: "while", .. }));
    assert!(matches!(parse_error("if (1) { 2 "),
                     ParseError::ExpectedClosingBrace { .. }));
    assert!(matches!(parse_error("def 3() { }"),
                     ParseError::InvalidFunctionDefinition { .. }));
    assert!(matches!(parse_error("x = "),
                     ParseError::UnexpectedEndOfInput { .. }));
}

#[test]
fn parse_failures_evaluate_nothing() {
    let mut diagnostics = Diagnostics::new();
    let mut env = Environment::new();
    let mut functions = FunctionRegistry::new();

    let result = interpret("x = 1 (", &mut env, &mut functions, &mut diagnostics);

    assert!(result.is_err());
    // No partial tree, nothing evaluated: the assignment never ran.
    assert_eq!(env.get("x"), None);
}
