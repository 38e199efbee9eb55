//! CLI that parses arithmetic expressions and prints their syntax tree.

use std::fs;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use basic_lang::ParseOptions;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy)]
enum Output {
    Tree,
    Source,
}

fn print_usage() {
    eprintln!("Usage: basic [options] [files...]");
    eprintln!();
    eprintln!("Parses each file as one expression and prints its syntax tree.");
    eprintln!("With no files, reads expressions line by line from stdin.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --grouping   Accept parentheses and leading + / -");
    eprintln!("  --trailing   Reject tokens after the expression");
    eprintln!("  --strict     Same as --grouping --trailing");
    eprintln!("  --format     Print canonical source instead of the tree");
    eprintln!("  -v, -vv      More log output (overridden by RUST_LOG)");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  basic calc.bas");
    eprintln!("  echo '1 + 2 * 3' | basic");
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut options = ParseOptions::default();
    let mut output = Output::Tree;
    let mut verbose = 0u8;
    let mut files = Vec::new();

    for arg in &args {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage();
                return ExitCode::from(2);
            }
            "-v" | "--verbose" => verbose = verbose.saturating_add(1),
            "-vv" => verbose = verbose.saturating_add(2),
            "--grouping" => options = options.with_grouping(true),
            "--trailing" => options = options.with_reject_trailing(true),
            "--strict" => options = ParseOptions::strict(),
            "--format" => output = Output::Source,
            flag if flag.starts_with('-') => {
                eprintln!("Unknown option: {flag}");
                return ExitCode::from(2);
            }
            path => files.push(path),
        }
    }

    init_logging(verbose);

    if files.is_empty() {
        return prompt(options, output);
    }

    let mut had_error = false;

    for path in files {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        if !report(path, source_text(&content), options, output) {
            had_error = true;
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn init_logging(verbose: u8) {
    let default_directive = match verbose {
        0 => "basic_lang=warn",
        1 => "basic_lang=debug",
        _ => "basic_lang=trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_ansi(false)
        .with_writer(io::stderr)
        .init();
}

/// File contents without the line terminator editors leave at the end.
fn source_text(content: &str) -> &str {
    content.trim_end_matches(['\n', '\r'])
}

/// Run one source through the pipeline. `Ok` holds the rendered tree
/// or source, `Err` the diagnostic followed by its excerpt.
fn render(
    name: &str,
    text: &str,
    options: ParseOptions,
    output: Output,
) -> Result<String, String> {
    match basic_lang::run_with(name, text, options) {
        Ok(ast) => Ok(match output {
            Output::Tree => ast.to_string(),
            Output::Source => basic_lang::format(&ast),
        }),
        Err(e) => Err(format!("{e}\n{}", e.excerpt())),
    }
}

/// Print the outcome of [`render`]. Returns false on a diagnostic.
fn report(name: &str, text: &str, options: ParseOptions, output: Output) -> bool {
    match render(name, text, options, output) {
        Ok(rendered) => {
            println!("{rendered}");
            true
        }
        Err(diagnostic) => {
            eprintln!("{diagnostic}");
            false
        }
    }
}

fn prompt(options: ParseOptions, output: Output) -> ExitCode {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("basic > ");
        if io::stdout().flush().is_err() {
            return ExitCode::FAILURE;
        }

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                eprintln!("<stdin>: {e}");
                return ExitCode::FAILURE;
            }
            None => {
                println!();
                return ExitCode::SUCCESS;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        report("<stdin>", &line, options, output);
    }
}
