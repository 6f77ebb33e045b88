mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{apply, locate, siblings, ApplyArgs, LocateArgs, SiblingsArgs};
use tracing::Level;

/// Scalpel CLI - surgical edits on HTML and JSX markup
#[derive(Parser, Debug)]
#[command(name = "scalpel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show where an element sits in a file
    Locate(LocateArgs),

    /// Show the previous and next sibling of an element
    Siblings(SiblingsArgs),

    /// Apply mutations to a file
    Apply(ApplyArgs),
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?.display().to_string();

    match cli.command {
        Command::Locate(args) => locate(args, &cwd),
        Command::Siblings(args) => siblings(args, &cwd),
        Command::Apply(args) => apply(args, &cwd),
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
