pub mod apply;
pub mod locate;
pub mod siblings;

pub use apply::{apply, ApplyArgs};
pub use locate::{locate, LocateArgs};
pub use siblings::{siblings, SiblingsArgs};

use clap::ValueEnum;

/// Output format shared by the inspection commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
