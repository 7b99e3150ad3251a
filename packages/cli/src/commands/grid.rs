use super::load_pages;
use anyhow::{anyhow, Result};
use clap::Args;
use pagecraft_document::{tree, tree_to_grid_with, GridOptions};
use pagecraft_editor::EditorConfig;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct GridArgs {
    /// Page file (the first page is used)
    pub input: PathBuf,

    /// Container to project (defaults to the page root)
    #[arg(short, long)]
    pub node: Option<String>,

    /// Column count (defaults to the project config)
    #[arg(short, long)]
    pub columns: Option<u32>,
}

pub fn grid(args: GridArgs, cwd: &str) -> Result<()> {
    let pages = load_pages(&args.input)?;
    let page = pages
        .first()
        .ok_or_else(|| anyhow!("{} contains no pages", args.input.display()))?;

    let node = match &args.node {
        Some(id) => tree::find_node(&page.content, id)
            .ok_or_else(|| anyhow!("Node not found in page {}: {}", page.id, id))?,
        None => &page.content,
    };

    let columns = match args.columns {
        Some(columns) => columns,
        None => EditorConfig::load_from_dir(cwd)?.default_grid_columns,
    };

    let grid = tree_to_grid_with(
        node,
        &GridOptions {
            columns,
            ..GridOptions::default()
        },
    );
    println!("{}", serde_json::to_string_pretty(&grid)?);

    Ok(())
}
