//! Date formatters. All instants are handled in UTC.

use super::{arg_str, stringify, FormatEnv, Formatter, FormatterCategory};
use crate::locale::Locale;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use serde_json::Value;

pub(super) const FORMATTERS: &[Formatter] = &[
    date("date", format_date),
    date("time", format_time),
    date("datetime", format_datetime),
    date("relative", relative),
];

const fn date(name: &'static str, apply: super::FormatFn) -> Formatter {
    Formatter {
        name,
        category: FormatterCategory::Date,
        apply,
    }
}

/// Accepts RFC 3339, `YYYY-MM-DD[ HH:MM:SS]` and epoch milliseconds
fn parse_instant(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => Utc.timestamp_millis_opt(n.as_f64()? as i64).single(),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            for pattern in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
                if let Ok(naive) = NaiveDateTime::parse_from_str(s, pattern) {
                    return Some(Utc.from_utc_datetime(&naive));
                }
            }
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|naive| Utc.from_utc_datetime(&naive))
        }
        _ => None,
    }
}

/// `date[:short|long|<pattern>]`, pattern tokens: yyyy yy MM dd HH mm ss
fn format_date(value: &Value, args: &[String], env: &FormatEnv) -> Value {
    let Some(instant) = parse_instant(value) else {
        return Value::String(stringify(value));
    };

    let text = match arg_str(args, 0).map(str::trim) {
        None | Some("") | Some("short") => short_date(&instant, env.locale),
        Some("long") => long_date(&instant, env.locale),
        Some(pattern) => apply_pattern(&instant, pattern),
    };
    Value::String(text)
}

fn format_time(value: &Value, _args: &[String], env: &FormatEnv) -> Value {
    match parse_instant(value) {
        Some(instant) => Value::String(short_time(&instant, env.locale)),
        None => Value::String(stringify(value)),
    }
}

fn format_datetime(value: &Value, _args: &[String], env: &FormatEnv) -> Value {
    match parse_instant(value) {
        Some(instant) => Value::String(format!(
            "{} {}",
            short_date(&instant, env.locale),
            short_time(&instant, env.locale)
        )),
        None => Value::String(stringify(value)),
    }
}

fn relative(value: &Value, _args: &[String], env: &FormatEnv) -> Value {
    match parse_instant(value) {
        Some(instant) => Value::String(relative_description(instant, env.now, env.locale)),
        None => Value::String(stringify(value)),
    }
}

fn short_date(instant: &DateTime<Utc>, locale: Locale) -> String {
    match locale {
        Locale::PtBr => apply_pattern(instant, "dd/MM/yyyy"),
        Locale::EnUs => apply_pattern(instant, "MM/dd/yyyy"),
    }
}

fn long_date(instant: &DateTime<Utc>, locale: Locale) -> String {
    let month = locale.month_name(instant.month());
    match locale {
        Locale::PtBr => format!("{} de {} de {}", instant.day(), month, instant.year()),
        Locale::EnUs => format!("{} {}, {}", month, instant.day(), instant.year()),
    }
}

fn short_time(instant: &DateTime<Utc>, locale: Locale) -> String {
    match locale {
        Locale::PtBr => apply_pattern(instant, "HH:mm"),
        Locale::EnUs => {
            let (pm, hour) = instant.hour12();
            format!("{}:{:02} {}", hour, instant.minute(), if pm { "PM" } else { "AM" })
        }
    }
}

fn apply_pattern(instant: &DateTime<Utc>, pattern: &str) -> String {
    const TOKENS: [&str; 7] = ["yyyy", "yy", "MM", "dd", "HH", "mm", "ss"];

    let mut out = String::with_capacity(pattern.len() + 4);
    let mut rest = pattern;

    'scan: while !rest.is_empty() {
        for token in TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                let piece = match token {
                    "yyyy" => format!("{:04}", instant.year()),
                    "yy" => format!("{:02}", instant.year().rem_euclid(100)),
                    "MM" => format!("{:02}", instant.month()),
                    "dd" => format!("{:02}", instant.day()),
                    "HH" => format!("{:02}", instant.hour()),
                    "mm" => format!("{:02}", instant.minute()),
                    _ => format!("{:02}", instant.second()),
                };
                out.push_str(&piece);
                rest = tail;
                continue 'scan;
            }
        }

        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }

    out
}

/// Coarse description of `instant` relative to `now` (minutes, hours, days)
pub fn relative_description(instant: DateTime<Utc>, now: DateTime<Utc>, locale: Locale) -> String {
    let seconds = (now - instant).num_seconds();
    let future = seconds < 0;
    let seconds = seconds.abs();

    if seconds < 60 {
        return match locale {
            Locale::PtBr => "agora".to_string(),
            Locale::EnUs => "just now".to_string(),
        };
    }

    let (amount, unit) = if seconds < 3_600 {
        (seconds / 60, Unit::Minute)
    } else if seconds < 86_400 {
        (seconds / 3_600, Unit::Hour)
    } else {
        (seconds / 86_400, Unit::Day)
    };

    let label = unit.label(locale, amount == 1);
    match (locale, future) {
        (Locale::PtBr, false) => format!("há {amount} {label}"),
        (Locale::PtBr, true) => format!("em {amount} {label}"),
        (Locale::EnUs, false) => format!("{amount} {label} ago"),
        (Locale::EnUs, true) => format!("in {amount} {label}"),
    }
}

#[derive(Clone, Copy)]
enum Unit {
    Minute,
    Hour,
    Day,
}

impl Unit {
    fn label(self, locale: Locale, singular: bool) -> &'static str {
        match (locale, self, singular) {
            (Locale::PtBr, Unit::Minute, true) => "minuto",
            (Locale::PtBr, Unit::Minute, false) => "minutos",
            (Locale::PtBr, Unit::Hour, true) => "hora",
            (Locale::PtBr, Unit::Hour, false) => "horas",
            (Locale::PtBr, Unit::Day, true) => "dia",
            (Locale::PtBr, Unit::Day, false) => "dias",
            (Locale::EnUs, Unit::Minute, true) => "minute",
            (Locale::EnUs, Unit::Minute, false) => "minutes",
            (Locale::EnUs, Unit::Hour, true) => "hour",
            (Locale::EnUs, Unit::Hour, false) => "hours",
            (Locale::EnUs, Unit::Day, true) => "day",
            (Locale::EnUs, Unit::Day, false) => "days",
        }
    }
}
