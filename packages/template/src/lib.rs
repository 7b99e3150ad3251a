//! # Pagecraft Template
//!
//! Data binding for text props: `{{path | formatter:arg1,arg2}}`.
//!
//! ```text
//! "Olá {{user.name | uppercase}}!"
//!        │            │
//!        │            └─ formatter pipeline (left to right)
//!        └─ dotted path into the data context ($app. / $page. / $enum. are reserved)
//! ```
//!
//! Templates are user-edited free text, so nothing here fails: malformed
//! braces stay literal, missing data renders empty and formatters fall back
//! to the original value when it is not of the kind they expect.
//!
//! ```rust
//! use pagecraft_template::resolve_template;
//! use serde_json::json;
//!
//! let out = resolve_template("Olá {{user.name | uppercase}}!", &json!({"user": {"name": "ana"}}));
//! assert_eq!(out, "Olá ANA!");
//! ```

pub mod error;
pub mod formatters;
pub mod locale;
pub mod parser;
pub mod resolve;

pub use error::TemplateError;
pub use formatters::{
    list_formatters, relative_description, stringify, FormatEnv, FormatFn, Formatter,
    FormatterCategory, FormatterRegistry,
};
pub use locale::Locale;
pub use parser::{has_template_expr, parse_template, Pipe, TemplateToken};
pub use resolve::{
    get_display_hint, resolve_path, resolve_template, resolve_template_with, DisplayHint,
    TemplateResolver,
};
