//! Tern CLI
//!
//! Evaluate expressions and inspect their compiled token maps.

mod commands;
mod options;

use std::sync::Once;

use options::EvalOptions;

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber when `RUST_LOG` is set.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "eval" => {
            let options = match EvalOptions::parse(&args[2..]) {
                Ok(options) => options,
                Err(msg) => {
                    eprintln!("error: {msg}");
                    eprintln!();
                    print_eval_usage();
                    std::process::exit(1);
                }
            };
            if !commands::eval_expression(&options) {
                std::process::exit(1);
            }
        }
        "tokens" => {
            let Some(expr) = args.get(2) else {
                eprintln!("Usage: tern tokens <expression>");
                std::process::exit(1);
            };
            if !commands::print_tokens(expr) {
                std::process::exit(1);
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("tern {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Tern expression engine");
    println!();
    println!("Usage: tern <command> [args]");
    println!();
    println!("Commands:");
    println!("  eval <expr> [options]   Evaluate an expression and print its value");
    println!("  tokens <expr>           Print the compiled token map of an expression");
    println!("  help                    Show this message");
    println!("  version                 Show version information");
    println!();
    println!("Set RUST_LOG=tern_eval=debug to trace reduction.");
}

fn print_eval_usage() {
    eprintln!("Usage: tern eval <expression> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --bool                Coerce the result to a boolean");
    eprintln!("  --decimal             Keep decimal results unnarrowed");
    eprintln!("  --rounding=<mode>     Division rounding: up, down, ceiling, floor,");
    eprintln!("                        half-up, half-down (default), half-even");
    eprintln!("  --set <name>=<expr>   Bind a variable to the value of an expression");
    eprintln!("  --compile             Compile to a token map before evaluating");
}
