use super::{arg_str, arg_usize, as_number, stringify, FormatEnv, Formatter, FormatterCategory};
use crate::locale::Locale;
use serde_json::Value;

pub(super) const FORMATTERS: &[Formatter] = &[
    number("number", format_number),
    number("currency", currency),
    number("percent", percent),
    number("compact", compact),
];

const fn number(name: &'static str, apply: super::FormatFn) -> Formatter {
    Formatter {
        name,
        category: FormatterCategory::Number,
        apply,
    }
}

/// `number[:decimals]`; without decimals up to two are kept
fn format_number(value: &Value, args: &[String], env: &FormatEnv) -> Value {
    let Some(n) = as_number(value) else {
        return Value::String(stringify(value));
    };

    let text = match arg_usize(args, 0) {
        Some(decimals) => env.locale.format_decimal(n, decimals),
        None => env.locale.format_number(n, 2),
    };
    Value::String(text)
}

/// `currency[:code]`
fn currency(value: &Value, args: &[String], env: &FormatEnv) -> Value {
    let Some(n) = as_number(value) else {
        return Value::String(stringify(value));
    };

    let code = arg_str(args, 0)
        .map(|code| code.trim().to_ascii_uppercase())
        .filter(|code| !code.is_empty())
        .unwrap_or_else(|| env.locale.default_currency().to_string());

    let amount = env.locale.format_decimal(n.abs(), 2);
    let sign = if n < 0.0 && amount.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };

    let text = match (env.locale, currency_symbol(&code)) {
        (Locale::PtBr, Some(symbol)) => format!("{sign}{symbol} {amount}"),
        (Locale::EnUs, Some(symbol)) => format!("{sign}{symbol}{amount}"),
        (_, None) => format!("{sign}{code} {amount}"),
    };
    Value::String(text)
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "BRL" => Some("R$"),
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

/// `percent[:decimals]` for ratios (0.25 → 25%)
fn percent(value: &Value, args: &[String], env: &FormatEnv) -> Value {
    let Some(n) = as_number(value) else {
        return Value::String(stringify(value));
    };

    let decimals = arg_usize(args, 0).unwrap_or(0);
    Value::String(format!("{}%", env.locale.format_number(n * 100.0, decimals)))
}

/// Short scale (1.2K / 1,2 mil)
fn compact(value: &Value, _args: &[String], env: &FormatEnv) -> Value {
    let Some(n) = as_number(value) else {
        return Value::String(stringify(value));
    };

    let units: [(f64, &str); 3] = match env.locale {
        Locale::PtBr => [(1e9, " bi"), (1e6, " mi"), (1e3, " mil")],
        Locale::EnUs => [(1e9, "B"), (1e6, "M"), (1e3, "K")],
    };

    for (scale, unit) in units {
        if n.abs() >= scale {
            return Value::String(format!("{}{}", env.locale.format_number(n / scale, 1), unit));
        }
    }
    Value::String(env.locale.format_number(n, 1))
}
