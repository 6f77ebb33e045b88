use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::OutputFormat;

#[derive(Args, Debug)]
pub struct SiblingsArgs {
    /// Markup file to search
    pub file: PathBuf,

    /// Element id (value of its data-eid attribute)
    pub id: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub fn siblings(args: SiblingsArgs, _cwd: &str) -> Result<()> {
    let source = std::fs::read_to_string(&args.file)?;
    let siblings = scalpel_engine::try_find_siblings(&source, &args.id)
        .map_err(|err| anyhow!("{err} in {}", args.file.display()))?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&siblings)?),
        OutputFormat::Text => {
            println!("{} {}", "Siblings of".green().bold(), args.id.bold());
            println!("   Previous: {}", siblings.previous_id.unwrap_or("-"));
            println!("   Next:     {}", siblings.next_id.unwrap_or("-"));
        }
    }

    Ok(())
}
