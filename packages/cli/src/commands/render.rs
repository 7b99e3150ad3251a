use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_editor::EditorConfig;
use pagecraft_template::{get_display_hint, resolve_template_with, DisplayHint, FormatEnv, Locale};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Template text, e.g. "Olá {{user.name | uppercase}}"
    pub template: String,

    /// JSON file with the data context
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Locale for numbers and dates (defaults to the project config)
    #[arg(short, long)]
    pub locale: Option<Locale>,
}

pub fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let data = match &args.data {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Cannot read {}", path.display()))?;
            serde_json::from_str(&content).with_context(|| format!("{} is not valid JSON", path.display()))?
        }
        None => Value::Null,
    };

    let locale = match args.locale {
        Some(locale) => locale,
        None => EditorConfig::load_from_dir(cwd)?.locale,
    };

    println!("{}", resolve_template_with(&args.template, &data, &FormatEnv::new(locale)));

    if let Some(DisplayHint::Badge { variant }) = get_display_hint(&args.template) {
        eprintln!(
            "{} badge{}",
            "hint:".cyan(),
            variant.map(|v| format!(" ({v})")).unwrap_or_default()
        );
    }

    Ok(())
}
