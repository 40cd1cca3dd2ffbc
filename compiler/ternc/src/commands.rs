//! `tern` subcommands.

use tern_eval::{compile, Accessor, Engine, EvalError, MapResolver, TokenNode, Value};

use crate::options::EvalOptions;

/// Evaluate `options.expr` and print the value. Returns `false` on error.
pub fn eval_expression(options: &EvalOptions) -> bool {
    let mut vars = MapResolver::new();
    let binder = Engine::default();
    for (name, expr) in &options.bindings {
        match binder.eval(expr, &Value::Null, &mut vars) {
            Ok(value) => vars.insert(name.as_str(), value),
            Err(err) => {
                report(&format!("in binding `{name}`"), &err);
                return false;
            }
        }
    }

    let engine = Engine::new(options.config());
    tracing::debug!(
        bindings = vars.len(),
        compile = options.compile,
        "evaluating from the command line"
    );
    let result = if options.compile {
        engine
            .compile(&options.expr)
            .and_then(|compiled| engine.execute(&compiled, &Value::Null, &mut vars))
    } else {
        engine.eval(&options.expr, &Value::Null, &mut vars)
    };

    match result {
        Ok(value) => {
            println!("{value}");
            true
        }
        Err(err) => {
            report("", &err);
            false
        }
    }
}

/// Print the compiled token map of `expr`, one token per line.
pub fn print_tokens(expr: &str) -> bool {
    match compile(expr) {
        Ok(compiled) => {
            print_nodes(compiled.nodes(), 0);
            true
        }
        Err(err) => {
            report("", &err);
            false
        }
    }
}

fn print_nodes(nodes: &[TokenNode], depth: usize) {
    let indent = "  ".repeat(depth);
    for node in nodes {
        let span = node.token.span.to_string();
        println!("{indent}{span:<10} {}", node.token);
        match &node.accessor {
            Some(Accessor::Expr(compiled)) => print_nodes(compiled.nodes(), depth + 1),
            Some(Accessor::List(elements)) => {
                for (i, element) in elements.iter().enumerate() {
                    println!("{indent}  [{i}]");
                    print_nodes(element.nodes(), depth + 2);
                }
            }
            None => {}
        }
    }
}

fn report(context: &str, err: &EvalError) {
    if context.is_empty() {
        eprintln!("error: {err}");
    } else {
        eprintln!("error {context}: {err}");
    }
    if let (Some(expr), Some(cursor)) = (err.expr.as_deref(), err.cursor) {
        let column = expr.get(..cursor).map_or(0, |before| before.chars().count());
        eprintln!("  {expr}");
        eprintln!("  {}^", " ".repeat(column));
    }
}
