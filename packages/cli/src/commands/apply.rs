use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use scalpel_editor::{Document, Mutation, MutationResult};
use std::fs;
use std::path::PathBuf;
use tracing::info;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Markup file to edit
    pub file: PathBuf,

    /// A single mutation as JSON, e.g. '{"RemoveElement": {"element_id": "a"}}'
    #[arg(short, long, conflicts_with = "script", required_unless_present = "script")]
    pub mutation: Option<String>,

    /// JSON file holding one mutation or an array of them
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Print the edited document instead of writing it back
    #[arg(long)]
    pub stdout: bool,
}

pub fn apply(args: ApplyArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;

    let (mutations, description) = read_mutations(&args)?;
    let mut doc = Document::load(&args.file)?.with_history_capacity(config.history_capacity);

    let results = doc.apply_all(&mutations, description.as_deref());

    // Keep stdout clean for the document itself
    let report = |line: String| {
        if args.stdout {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    };

    let mut applied = 0;
    for (mutation, result) in mutations.iter().zip(&results) {
        match result {
            MutationResult::Applied { version } => {
                applied += 1;
                report(format!(
                    "{} {} {}",
                    "✓".green(),
                    mutation.description(),
                    format!("(v{version})").dimmed()
                ));
            }
            MutationResult::Noop { reason } => {
                report(format!(
                    "{} {} {}",
                    "○".yellow(),
                    mutation.description(),
                    format!("skipped: {reason}").dimmed()
                ));
            }
        }
    }

    if args.stdout {
        print!("{}", doc.source());
        return Ok(());
    }

    if !doc.is_dirty() {
        report(format!("{} Nothing to write", "Done".yellow().bold()));
        return Ok(());
    }

    if config.backup {
        let backup = Config::backup_path(&args.file);
        fs::copy(&args.file, &backup)?;
        info!(backup = %backup.display(), "wrote backup");
    }
    doc.save()?;

    report(format!(
        "{} {} of {} mutations applied to {}",
        "Done".green().bold(),
        applied,
        mutations.len(),
        args.file.display()
    ));

    Ok(())
}

/// Mutations to apply and the undo description for the batch
fn read_mutations(args: &ApplyArgs) -> Result<(Vec<Mutation>, Option<String>)> {
    match (&args.mutation, &args.script) {
        (Some(json), _) => Ok((Mutation::parse_script(json)?, None)),
        (None, Some(path)) => {
            let json = fs::read_to_string(path)?;
            let description = path
                .file_name()
                .map(|name| format!("Script {}", name.to_string_lossy()));
            Ok((Mutation::parse_script(&json)?, description))
        }
        (None, None) => Err(anyhow!("Pass a mutation with --mutation or a file with --script")),
    }
}
