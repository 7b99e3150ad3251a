use super::{arg_str, arg_usize, stringify, FormatEnv, Formatter, FormatterCategory};
use serde_json::Value;

const DEFAULT_ELLIPSIS: &str = "…";

pub(super) const FORMATTERS: &[Formatter] = &[
    text("uppercase", uppercase),
    text("lowercase", lowercase),
    text("capitalize", capitalize),
    text("titlecase", titlecase),
    text("trim", trim),
    text("truncate", truncate),
    text("default", default),
    text("replace", replace),
    text("prefix", prefix),
    text("suffix", suffix),
];

const fn text(name: &'static str, apply: super::FormatFn) -> Formatter {
    Formatter {
        name,
        category: FormatterCategory::Text,
        apply,
    }
}

fn uppercase(value: &Value, _args: &[String], _env: &FormatEnv) -> Value {
    Value::String(stringify(value).to_uppercase())
}

fn lowercase(value: &Value, _args: &[String], _env: &FormatEnv) -> Value {
    Value::String(stringify(value).to_lowercase())
}

fn capitalize(value: &Value, _args: &[String], _env: &FormatEnv) -> Value {
    Value::String(capitalize_word(&stringify(value), false))
}

fn titlecase(value: &Value, _args: &[String], _env: &FormatEnv) -> Value {
    let text = stringify(value);
    let words: Vec<String> = text.split(' ').map(|word| capitalize_word(word, true)).collect();
    Value::String(words.join(" "))
}

fn capitalize_word(word: &str, lower_rest: bool) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let rest: String = chars.collect();
            let rest = if lower_rest { rest.to_lowercase() } else { rest };
            first.to_uppercase().chain(rest.chars()).collect()
        }
        None => String::new(),
    }
}

fn trim(value: &Value, _args: &[String], _env: &FormatEnv) -> Value {
    Value::String(stringify(value).trim().to_string())
}

/// `truncate:max[,suffix]`
fn truncate(value: &Value, args: &[String], _env: &FormatEnv) -> Value {
    let text = stringify(value);
    let Some(max) = arg_usize(args, 0) else {
        return Value::String(text);
    };

    if text.chars().count() <= max {
        return Value::String(text);
    }

    let suffix = arg_str(args, 1).unwrap_or(DEFAULT_ELLIPSIS);
    let mut out: String = text.chars().take(max).collect();
    out.push_str(suffix);
    Value::String(out)
}

/// `default:fallback` replaces missing and empty values
fn default(value: &Value, args: &[String], _env: &FormatEnv) -> Value {
    let is_empty = match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    };

    if is_empty {
        Value::String(arg_str(args, 0).unwrap_or_default().to_string())
    } else {
        value.clone()
    }
}

/// `replace:from,to`
fn replace(value: &Value, args: &[String], _env: &FormatEnv) -> Value {
    let text = stringify(value);
    match arg_str(args, 0) {
        Some(from) if !from.is_empty() => {
            Value::String(text.replace(from, arg_str(args, 1).unwrap_or_default()))
        }
        _ => Value::String(text),
    }
}

fn prefix(value: &Value, args: &[String], _env: &FormatEnv) -> Value {
    let text = stringify(value);
    if text.is_empty() {
        return Value::String(text);
    }
    Value::String(format!("{}{}", arg_str(args, 0).unwrap_or_default(), text))
}

fn suffix(value: &Value, args: &[String], _env: &FormatEnv) -> Value {
    let text = stringify(value);
    if text.is_empty() {
        return Value::String(text);
    }
    Value::String(format!("{}{}", text, arg_str(args, 0).unwrap_or_default()))
}
