use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_template::{list_formatters, FormatterCategory};

#[derive(Args, Debug)]
pub struct FormattersArgs {
    /// Only list one category (text, number, date, display)
    #[arg(short, long)]
    pub category: Option<String>,
}

pub fn formatters(args: FormattersArgs, _cwd: &str) -> Result<()> {
    let wanted = args.category.as_deref().map(str::to_ascii_lowercase);

    for category in [
        FormatterCategory::Text,
        FormatterCategory::Number,
        FormatterCategory::Date,
        FormatterCategory::Display,
    ] {
        let name = serde_json::to_value(category)?;
        let name = name.as_str().unwrap_or_default();
        if wanted.as_deref().is_some_and(|wanted| wanted != name) {
            continue;
        }

        let names: Vec<&str> = list_formatters()
            .into_iter()
            .filter(|(_, c)| *c == category)
            .map(|(name, _)| name)
            .collect();
        println!("{} {}", format!("{name}:").bold(), names.join(", "));
    }

    Ok(())
}
