mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    formatters, grid, inspect, render, replay, FormattersArgs, GridArgs, InspectArgs, RenderArgs, ReplayArgs,
};
use tracing_subscriber::EnvFilter;

/// Pagecraft CLI - inspect, render and replay page builder documents
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the outline and node counts of a page file
    Inspect(InspectArgs),

    /// Resolve a template string against a JSON data file
    Render(RenderArgs),

    /// List the template formatters
    Formatters(FormattersArgs),

    /// Project a container onto a grid and print the layout
    Grid(GridArgs),

    /// Apply an action script to a page file
    Replay(ReplayArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Inspect(args) => inspect(args, &cwd),
        Command::Render(args) => render(args, &cwd),
        Command::Formatters(args) => formatters(args, &cwd),
        Command::Grid(args) => grid(args, &cwd),
        Command::Replay(args) => replay(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
