//! # Template Parser
//!
//! Splits a string into literal text and `{{ ... }}` expressions.
//!
//! ```text
//! expression := path ( "|" name ( ":" arg ( "," arg )* )? )*
//! ```
//!
//! Parsing never fails. An unterminated `{{` or an empty `{{ }}` stays as
//! literal text, so half-typed templates still render.

use serde::{Deserialize, Serialize};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// One formatter application inside an expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipe {
    pub name: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TemplateToken {
    Text {
        raw: String,
    },
    Expression {
        raw: String,
        path: String,
        pipes: Vec<Pipe>,
    },
}

impl TemplateToken {
    pub fn raw(&self) -> &str {
        match self {
            TemplateToken::Text { raw } | TemplateToken::Expression { raw, .. } => raw,
        }
    }

    pub fn is_expression(&self) -> bool {
        matches!(self, TemplateToken::Expression { .. })
    }
}

pub fn parse_template(input: &str) -> Vec<TemplateToken> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut rest = input;

    while let Some(open) = rest.find(OPEN) {
        let body_start = open + OPEN.len();
        let Some(close) = rest[body_start..].find(CLOSE) else {
            break;
        };
        let body_end = body_start + close;

        // A stray `{{` before the closing braces is text; rescan from the inner one
        if let Some(inner) = rest[body_start..body_end].rfind(OPEN) {
            let restart = body_start + inner;
            text.push_str(&rest[..restart]);
            rest = &rest[restart..];
            continue;
        }

        let raw = &rest[open..body_end + CLOSE.len()];

        text.push_str(&rest[..open]);
        match parse_expression(&rest[body_start..body_end]) {
            Some((path, pipes)) => {
                flush_text(&mut text, &mut tokens);
                tokens.push(TemplateToken::Expression {
                    raw: raw.to_string(),
                    path,
                    pipes,
                });
            }
            None => text.push_str(raw),
        }

        rest = &rest[body_end + CLOSE.len()..];
    }

    text.push_str(rest);
    flush_text(&mut text, &mut tokens);
    tokens
}

/// Fast check for whether `input` holds at least one expression
pub fn has_template_expr(input: &str) -> bool {
    input.contains(OPEN) && parse_template(input).iter().any(TemplateToken::is_expression)
}

fn flush_text(text: &mut String, tokens: &mut Vec<TemplateToken>) {
    if !text.is_empty() {
        tokens.push(TemplateToken::Text {
            raw: std::mem::take(text),
        });
    }
}

fn parse_expression(body: &str) -> Option<(String, Vec<Pipe>)> {
    let mut segments = split_unquoted(body, '|').into_iter();
    let path = segments.next()?.trim();
    if path.is_empty() {
        return None;
    }

    let pipes = segments.filter_map(parse_pipe).collect();
    Some((path.to_string(), pipes))
}

fn parse_pipe(segment: &str) -> Option<Pipe> {
    let segment = segment.trim();
    let (name, args) = match segment.split_once(':') {
        Some((name, args)) => (name.trim(), split_unquoted(args, ',').into_iter().map(unquote).collect()),
        None => (segment, Vec::new()),
    };

    if name.is_empty() {
        return None;
    }

    Some(Pipe {
        name: name.to_string(),
        args,
    })
}

/// Split on `sep` outside quoted arguments. A quote only opens at the start
/// of a part or right after `:` or `,`, so apostrophes in bare words are
/// plain text.
fn split_unquoted(input: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quote = None;
    let mut start = 0;

    for (i, c) in input.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if (c == '"' || c == '\'') && opens_quote(&input[start..i]) => quote = Some(c),
            None if c == sep => {
                parts.push(&input[start..i]);
                start = i + c.len_utf8();
            }
            None => {}
        }
    }

    parts.push(&input[start..]);
    parts
}

fn opens_quote(before: &str) -> bool {
    let before = before.trim_end();
    before.is_empty() || before.ends_with([':', ','])
}

fn unquote(arg: &str) -> String {
    let arg = arg.trim();
    for quote in ['"', '\''] {
        if arg.len() >= 2 && arg.starts_with(quote) && arg.ends_with(quote) {
            return arg[1..arg.len() - 1].to_string();
        }
    }
    arg.to_string()
}
