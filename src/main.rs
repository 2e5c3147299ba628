use std::{
    fs,
    io::{self, BufRead, Write},
};

use clap::Parser;
use minicalc::{Diagnostics, Environment, FunctionRegistry, evaluate, parse};

/// minicalc is a small imperative expression language: arithmetic,
/// comparisons, variables, conditionals, loops and functions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells minicalc to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Pipe mode automatically prints out the final value of a script.
    #[arg(short, long)]
    pipe_mode: bool,

    /// Prints the prefix rendering of each parsed program.
    #[arg(long)]
    ast: bool,

    /// The script to run, or a file path with --file. Omit to start the
    /// interactive prompt.
    contents: Option<String>,
}

fn main() {
    let args = Args::parse();

    let Some(contents) = args.contents else {
        repl(args.ast);
        return;
    };

    let script = if args.file {
        fs::read_to_string(&contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{contents}'. Perhaps this file does not exist?");
            std::process::exit(1);
        })
    } else {
        contents
    };

    run_script(&script, args.ast, args.pipe_mode);
}

/// Parses and evaluates one whole script against fresh state.
fn run_script(script: &str, show_ast: bool, pipe_mode: bool) {
    let mut diagnostics = Diagnostics::new();
    let mut env = Environment::new();
    let mut functions = FunctionRegistry::new();

    match parse(script, &mut diagnostics) {
        Ok(program) => {
            if show_ast {
                eprintln!("AST: {program}");
            }
            let result = evaluate(&program, &mut env, &mut functions, &mut diagnostics);
            for line in diagnostics.drain() {
                eprintln!("{line}");
            }
            if pipe_mode && let Some(value) = result {
                println!("{value}");
            }
        },
        Err(error) => {
            for line in diagnostics.drain() {
                eprintln!("{line}");
            }
            eprintln!("{error}");
        },
    }
}

/// The interactive read-eval-print loop.
///
/// Reads one line at a time into a persistent environment and function
/// registry, printing each line's result. `exit` or `quit` leaves the loop.
fn repl(show_ast: bool) {
    let mut diagnostics = Diagnostics::new();
    let mut env = Environment::new();
    let mut functions = FunctionRegistry::new();

    println!("Type expressions. Use 'exit' to leave.");

    let stdin = io::stdin();
    loop {
        print!("calc > ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {},
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed == "exit" || trimmed == "quit" {
            break;
        }

        match parse(trimmed, &mut diagnostics) {
            Ok(program) => {
                if show_ast {
                    println!("AST: {program}");
                }
                let result = evaluate(&program, &mut env, &mut functions, &mut diagnostics);
                for diagnostic in diagnostics.drain() {
                    eprintln!("{diagnostic}");
                }
                if let Some(value) = result {
                    println!("{value}");
                }
            },
            Err(error) => {
                for diagnostic in diagnostics.drain() {
                    eprintln!("{diagnostic}");
                }
                eprintln!("{error}");
            },
        }
    }
}
