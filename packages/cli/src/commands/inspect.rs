use super::load_pages;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_document::{tree, validate_pages, NodeCatalog, Page};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Page file (a page object or an array of pages)
    pub input: PathBuf,

    /// Print the summaries as JSON instead of an outline
    #[arg(long)]
    pub json: bool,
}

pub fn inspect(args: InspectArgs, _cwd: &str) -> Result<()> {
    let pages = load_pages(&args.input)?;
    let catalog = NodeCatalog::builtin();
    validate_pages(&pages, |kind| catalog.is_container(kind))?;

    if args.json {
        let summaries: Vec<_> = pages
            .iter()
            .map(|page| {
                serde_json::json!({
                    "id": page.id,
                    "route": page.route,
                    "summary": tree::summarize(&page.content),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    for page in &pages {
        print_page(page, &catalog);
    }

    Ok(())
}

fn print_page(page: &Page, catalog: &NodeCatalog) {
    println!("📄 {} {} {}", page.label.bold(), page.route.cyan(), format!("({})", page.id).dimmed());
    if let Some(title) = &page.browser_title {
        println!("   Title: {}", title);
    }

    for flat in tree::flatten_tree(&page.content) {
        let indent = "  ".repeat(flat.depth + 1);
        let kind = match catalog.get(&flat.node.kind) {
            Some(kind) => kind.label.normal(),
            None => flat.node.kind.as_str().yellow(),
        };
        println!("{}{} {}", indent, kind, format!("#{}", flat.node.id).dimmed());
    }

    let summary = tree::summarize(&page.content);
    println!(
        "   {} nodes ({} containers, {} leaves), depth {}",
        summary.total, summary.containers, summary.leaves, summary.max_depth
    );
    println!();
}
