use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    #[error("Formatter already registered: {0}")]
    DuplicateFormatter(String),
}
