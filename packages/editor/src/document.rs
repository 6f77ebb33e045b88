//! # Document Handle
//!
//! A Document owns the current text of one markup file and its editing
//! state. Documents can be:
//! - **Memory-backed**: Temporary, for testing or in-memory operations
//! - **File-backed**: Loaded from disk and saved back
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Mutate → (Undo/Redo) → Save
//!   ↓       ↓          ↓          ↓
//! File    text     snapshots    File
//! ```
//!
//! Locations are never cached. Every mutation locates its element in the
//! current text, so a stale offset cannot leak into an edit.

use std::path::{Path, PathBuf};

use scalpel_engine::{locate, ElementLocation, Siblings};
use tracing::{debug, info};

use crate::{EditorError, Mutation, MutationResult, UndoStack};

/// Editable markup document
#[derive(Debug)]
pub struct Document {
    /// Current version number (increments on each change)
    pub version: u64,

    /// Current text
    source: String,

    /// Backing storage strategy
    storage: DocumentStorage,

    /// Undo/redo history
    history: UndoStack,
}

/// Storage backend for document
#[derive(Debug)]
pub enum DocumentStorage {
    /// In-memory only (for testing, temp docs)
    Memory,

    /// File-backed
    File { path: PathBuf, dirty: bool },
}

impl Document {
    /// Create document from source text (memory-backed)
    pub fn from_source(source: impl Into<String>) -> Self {
        Self {
            version: 0,
            source: source.into(),
            storage: DocumentStorage::Memory,
            history: UndoStack::new(),
        }
    }

    /// Load document from file (file-backed)
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, EditorError> {
        let path = path.into();
        let source = std::fs::read_to_string(&path)?;
        debug!(path = %path.display(), bytes = source.len(), "loaded document");

        Ok(Self {
            version: 0,
            source,
            storage: DocumentStorage::File { path, dirty: false },
            history: UndoStack::new(),
        })
    }

    /// Replace the history with one keeping at most `levels` steps (0 = unlimited)
    pub fn with_history_capacity(mut self, levels: usize) -> Self {
        self.history = UndoStack::with_max_levels(levels);
        self
    }

    /// Get source text
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.storage {
            DocumentStorage::File { path, .. } => Some(path),
            DocumentStorage::Memory => None,
        }
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    /// Apply a mutation.
    ///
    /// Refusals and edits that leave the text unchanged are reported as
    /// [`MutationResult::Noop`] and leave version and history untouched.
    pub fn apply(&mut self, mutation: &Mutation) -> MutationResult {
        let updated = match mutation.apply(&self.source) {
            Ok(updated) => updated,
            Err(err) => {
                debug!(element_id = mutation.element_id(), %err, "mutation refused");
                return MutationResult::Noop {
                    reason: err.to_string(),
                };
            }
        };

        if updated == self.source {
            debug!(element_id = mutation.element_id(), "mutation produced no change");
            return MutationResult::Noop {
                reason: "document unchanged".to_string(),
            };
        }

        let before = std::mem::replace(&mut self.source, updated);
        self.history.record(before, mutation);
        self.touch();

        info!(
            element_id = mutation.element_id(),
            version = self.version,
            "{}",
            mutation.description()
        );

        MutationResult::Applied {
            version: self.version,
        }
    }

    /// Apply mutations in order, each against the result of the previous
    /// one, recording the applied ones as a single undo step.
    pub fn apply_all(&mut self, mutations: &[Mutation], description: Option<&str>) -> Vec<MutationResult> {
        self.history.begin_batch();
        if let Some(description) = description {
            self.history.set_batch_description(description);
        }

        let results = mutations.iter().map(|mutation| self.apply(mutation)).collect();

        self.history.end_batch();
        results
    }

    /// Restore the text from before the last undo step. Returns false if
    /// there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(&self.source) {
            Some(previous) => {
                self.source = previous;
                self.touch();
                debug!(version = self.version, "undo");
                true
            }
            None => false,
        }
    }

    /// Reapply the last undone step. Returns false if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.history.redo(&self.source) {
            Some(next) => {
                self.source = next;
                self.touch();
                debug!(version = self.version, "redo");
                true
            }
            None => false,
        }
    }

    /// Locate an element in the current text
    pub fn locate(&self, id: &str) -> Option<ElementLocation<'_>> {
        locate(&self.source, id)
    }

    pub fn find_siblings(&self, id: &str) -> Siblings<'_> {
        scalpel_engine::find_siblings(&self.source, id)
    }

    /// Check if document has unsaved changes
    pub fn is_dirty(&self) -> bool {
        match &self.storage {
            DocumentStorage::File { dirty, .. } => *dirty,
            DocumentStorage::Memory => false,
        }
    }

    /// Save document to disk (if file-backed)
    pub fn save(&mut self) -> Result<(), EditorError> {
        match &mut self.storage {
            DocumentStorage::File { path, dirty } => {
                std::fs::write(&*path, &self.source)?;
                *dirty = false;
                info!(path = %path.display(), version = self.version, "saved document");
                Ok(())
            }
            DocumentStorage::Memory => Err(EditorError::NotFileBacked),
        }
    }

    fn touch(&mut self) {
        self.version += 1;
        if let DocumentStorage::File { dirty, .. } = &mut self.storage {
            *dirty = true;
        }
    }
}
