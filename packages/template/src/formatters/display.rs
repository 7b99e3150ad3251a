use super::{arg_str, stringify, FormatEnv, Formatter, FormatterCategory};
use crate::locale::Locale;
use serde_json::Value;

pub(super) const FORMATTERS: &[Formatter] = &[
    display("badge", badge),
    display("boolean", boolean),
    display("count", count),
    display("join", join),
    display("json", json),
];

const fn display(name: &'static str, apply: super::FormatFn) -> Formatter {
    Formatter {
        name,
        category: FormatterCategory::Display,
        apply,
    }
}

/// Identity. Renderers read the pipe back through `get_display_hint`.
fn badge(value: &Value, _args: &[String], _env: &FormatEnv) -> Value {
    value.clone()
}

/// `boolean[:yes,no]`
fn boolean(value: &Value, args: &[String], env: &FormatEnv) -> Value {
    let truthy = match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "sim" => true,
            "false" | "0" | "no" | "não" | "" => false,
            _ => return value.clone(),
        },
        _ => return Value::String(stringify(value)),
    };

    let (yes, no) = match env.locale {
        Locale::PtBr => ("Sim", "Não"),
        Locale::EnUs => ("Yes", "No"),
    };

    let label = if truthy {
        arg_str(args, 0).unwrap_or(yes)
    } else {
        arg_str(args, 1).unwrap_or(no)
    };
    Value::String(label.to_string())
}

/// Element count for arrays and objects, character count for strings
fn count(value: &Value, _args: &[String], _env: &FormatEnv) -> Value {
    match value {
        Value::Null => Value::from(0),
        Value::Array(items) => Value::from(items.len()),
        Value::Object(map) => Value::from(map.len()),
        Value::String(s) => Value::from(s.chars().count()),
        other => other.clone(),
    }
}

/// `join[:separator]`, default ", "
fn join(value: &Value, args: &[String], _env: &FormatEnv) -> Value {
    match value {
        Value::Array(items) => {
            let separator = arg_str(args, 0).unwrap_or(", ");
            let parts: Vec<String> = items.iter().map(stringify).collect();
            Value::String(parts.join(separator))
        }
        other => other.clone(),
    }
}

fn json(value: &Value, _args: &[String], _env: &FormatEnv) -> Value {
    Value::String(value.to_string())
}
