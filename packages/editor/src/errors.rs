//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid mutation script: {0}")]
    Script(#[from] serde_json::Error),

    #[error("Document is not file-backed")]
    NotFileBacked,
}
