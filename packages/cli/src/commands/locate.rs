use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use scalpel_engine::ElementLocation;
use std::path::PathBuf;

use super::OutputFormat;

#[derive(Args, Debug)]
pub struct LocateArgs {
    /// Markup file to search
    pub file: PathBuf,

    /// Element id (value of its data-eid attribute)
    pub id: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub fn locate(args: LocateArgs, _cwd: &str) -> Result<()> {
    let source = std::fs::read_to_string(&args.file)?;
    let location = scalpel_engine::locate(&source, &args.id)
        .ok_or_else(|| anyhow!("Element {} not found in {}", args.id, args.file.display()))?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&location)?),
        OutputFormat::Text => print_location(&args.id, &location),
    }

    Ok(())
}

fn print_location(id: &str, location: &ElementLocation<'_>) {
    println!("{} {}", "Element".green().bold(), id.bold());
    println!("   Tag:     <{}>", location.tag);
    println!("   Span:    {}..{}", location.start, location.end);
    println!("   Classes: {}", location.classes.unwrap_or("-"));
    if location.self_closing {
        println!("   {}", "self-closing".dimmed());
    }
    if !location.closed {
        println!(
            "   {} no matching closing tag, span covers the opening tag only",
            "⚠".yellow()
        );
    }
    println!();
    println!("{}", location.outer_text);
}
