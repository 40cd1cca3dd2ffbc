//! Argument parsing for `tern eval`.

use tern_eval::{rounding_from_name, EvalConfig};

/// Parsed `tern eval` arguments.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EvalOptions {
    pub expr: String,
    pub boolean_mode: bool,
    pub return_decimal: bool,
    pub rounding: Option<String>,
    /// `name = expression` bindings, applied in order.
    pub bindings: Vec<(String, String)>,
    pub compile: bool,
}

impl EvalOptions {
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let mut options = EvalOptions::default();
        let mut expr = None;
        let mut i = 0;
        while i < args.len() {
            let arg = &args[i];
            if arg == "--bool" {
                options.boolean_mode = true;
            } else if arg == "--decimal" {
                options.return_decimal = true;
            } else if arg == "--compile" || arg == "-c" {
                options.compile = true;
            } else if let Some(mode) = arg.strip_prefix("--rounding=") {
                if rounding_from_name(mode).is_none() {
                    return Err(format!("unknown rounding mode `{mode}`"));
                }
                options.rounding = Some(mode.to_owned());
            } else if arg == "--set" {
                // `--set` takes the next argument
                let Some(binding) = args.get(i + 1) else {
                    return Err("`--set` needs a `name=expr` argument".to_owned());
                };
                options.bindings.push(parse_binding(binding)?);
                i += 1;
            } else if let Some(binding) = arg.strip_prefix("--set=") {
                options.bindings.push(parse_binding(binding)?);
            } else if arg.starts_with("--") {
                return Err(format!("unknown option `{arg}`"));
            } else if expr.is_none() {
                expr = Some(arg.clone());
            } else {
                return Err(format!("unexpected argument `{arg}`"));
            }
            i += 1;
        }

        let Some(expr) = expr else {
            return Err("missing expression".to_owned());
        };
        options.expr = expr;
        Ok(options)
    }

    pub fn config(&self) -> EvalConfig {
        let mut config = EvalConfig::new()
            .boolean_mode(self.boolean_mode)
            .return_decimal(self.return_decimal);
        if let Some(mode) = self.rounding.as_deref().and_then(rounding_from_name) {
            config = config.rounding(mode);
        }
        config
    }
}

fn parse_binding(text: &str) -> Result<(String, String), String> {
    let Some((name, expr)) = text.split_once('=') else {
        return Err(format!("binding `{text}` is not `name=expr`"));
    };
    let name = name.trim();
    if name.is_empty() || expr.trim().is_empty() {
        return Err(format!("binding `{text}` is not `name=expr`"));
    }
    Ok((name.to_owned(), expr.to_owned()))
}
