//! # Formatter Registry
//!
//! Named pure functions applied through `|` pipes. Every formatter is total:
//! a value it cannot interpret comes back unchanged (or as its string form)
//! instead of producing an error.

mod date;
mod display;
mod number;
mod text;

use crate::error::TemplateError;
use crate::locale::Locale;
use crate::parser::Pipe;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;
use tracing::trace;

pub use date::relative_description;

/// Signature shared by all formatters
pub type FormatFn = fn(&Value, &[String], &FormatEnv) -> Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatterCategory {
    Text,
    Number,
    Date,
    Display,
}

/// Locale and clock handed to every formatter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormatEnv {
    pub locale: Locale,
    pub now: DateTime<Utc>,
}

impl FormatEnv {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            now: Utc::now(),
        }
    }

    /// Pin "now" (for `relative`)
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }
}

impl Default for FormatEnv {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

#[derive(Clone, Copy)]
pub struct Formatter {
    pub name: &'static str,
    pub category: FormatterCategory,
    pub apply: FormatFn,
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formatter")
            .field("name", &self.name)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormatterRegistry {
    formatters: BTreeMap<&'static str, Formatter>,
}

impl FormatterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the whole built-in catalog
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for formatter in text::FORMATTERS
            .iter()
            .chain(number::FORMATTERS)
            .chain(date::FORMATTERS)
            .chain(display::FORMATTERS)
        {
            registry.formatters.insert(formatter.name, *formatter);
        }
        registry
    }

    /// Shared read-only instance of [`FormatterRegistry::with_builtins`]
    pub fn builtin() -> &'static FormatterRegistry {
        static BUILTIN: OnceLock<FormatterRegistry> = OnceLock::new();
        BUILTIN.get_or_init(Self::with_builtins)
    }

    pub fn register(&mut self, formatter: Formatter) -> Result<(), TemplateError> {
        if self.formatters.contains_key(formatter.name) {
            return Err(TemplateError::DuplicateFormatter(formatter.name.to_string()));
        }
        self.formatters.insert(formatter.name, formatter);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Formatter> {
        self.formatters.get(name)
    }

    /// Apply one pipe. Unknown formatter names pass the value through.
    pub fn apply(&self, pipe: &Pipe, value: Value, env: &FormatEnv) -> Value {
        match self.get(&pipe.name) {
            Some(formatter) => (formatter.apply)(&value, &pipe.args, env),
            None => {
                trace!(formatter = %pipe.name, "Unknown formatter, passing value through");
                value
            }
        }
    }

    /// Name and category of every formatter, sorted by name
    pub fn list(&self) -> Vec<(&'static str, FormatterCategory)> {
        self.formatters
            .values()
            .map(|formatter| (formatter.name, formatter.category))
            .collect()
    }
}

/// Convenience over the built-in registry
pub fn list_formatters() -> Vec<(&'static str, FormatterCategory)> {
    FormatterRegistry::builtin().list()
}

/// String form used for output and for formatters working on text
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                let f = n.as_f64().unwrap_or_default();
                if f.fract() == 0.0 && f.abs() < 1e15 {
                    format!("{}", f as i64)
                } else {
                    f.to_string()
                }
            }
        }
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// Numeric view of a value: numbers and numeric strings
pub(crate) fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

pub(crate) fn arg_usize(args: &[String], index: usize) -> Option<usize> {
    args.get(index).and_then(|arg| arg.trim().parse().ok())
}

pub(crate) fn arg_str(args: &[String], index: usize) -> Option<&str> {
    args.get(index).map(String::as_str)
}
