use super::load_pages;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_document::NodeCatalog;
use pagecraft_editor::{Action, DispatchOutcome, Editor, EditorConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Page file to start from
    pub pages: PathBuf,

    /// JSON array of actions; `{"type": "UNDO"}` and `{"type": "REDO"}` are also accepted
    pub actions: PathBuf,

    /// Config file (defaults to pagecraft.config.json in the working directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the resulting pages here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
enum HistoryStep {
    Undo,
    Redo,
}

/// One entry of an action script
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum ReplayStep {
    History(HistoryStep),
    Action(Action),
}

pub fn replay(args: ReplayArgs, cwd: &str) -> Result<()> {
    let config = match &args.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::load_from_dir(cwd)?,
    };

    let pages = load_pages(&args.pages)?;
    let steps = load_steps(&args.actions)?;
    let mut editor = Editor::new(pages, None, NodeCatalog::builtin(), config)?;

    info!(steps = steps.len(), "Replaying action script");
    eprintln!("▶️  {} {} steps", "Replaying".green().bold(), steps.len());

    for (index, step) in steps.into_iter().enumerate() {
        let (name, status) = match step {
            ReplayStep::History(HistoryStep::Undo) => ("UNDO", history_status(editor.undo())),
            ReplayStep::History(HistoryStep::Redo) => ("REDO", history_status(editor.redo())),
            ReplayStep::Action(action) => {
                let name = action.name();
                let outcome = editor
                    .dispatch(action)
                    .with_context(|| format!("Step {} ({}) failed", index + 1, name))?;
                (name, outcome_status(outcome))
            }
        };
        eprintln!("   {:>3}. {:<20} {}", index + 1, name, status);
    }

    let pages: Vec<_> = editor.pages().values().collect();
    let json = serde_json::to_string_pretty(&pages)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("Cannot write {}", path.display()))?;
            eprintln!("✨ {} {}", "Wrote".green().bold(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn load_steps(path: &Path) -> Result<Vec<ReplayStep>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("{} is not an action script", path.display()))
}

fn outcome_status(outcome: DispatchOutcome) -> colored::ColoredString {
    match outcome {
        DispatchOutcome::Applied => "applied".green(),
        DispatchOutcome::Batched => "batched".cyan(),
        DispatchOutcome::Transient => "transient".normal(),
        DispatchOutcome::Noop => "no-op".yellow(),
    }
}

fn history_status(moved: bool) -> colored::ColoredString {
    if moved {
        "applied".green()
    } else {
        "no-op".yellow()
    }
}
