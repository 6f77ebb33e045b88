//! # Undo/Redo Stack
//!
//! Tracks mutation history as text snapshots.
//!
//! ## Design
//!
//! - Each history entry stores the document text from before its mutations
//! - Undo swaps the current text for that snapshot and moves the entry to redo
//! - Redo swaps back the same way
//! - New mutations clear the redo stack
//! - Supports batched operations (group multiple mutations as one undo step)
//!
//! Edits are not invertible in general (a removed element's exact whitespace,
//! a refused move), so snapshots are kept instead of inverse mutations.
//!
//! ## Example
//!
//! ```rust
//! use scalpel_editor::{Mutation, UndoStack};
//!
//! let mut stack = UndoStack::new();
//! let before = r#"<p data-eid="p">Old</p>"#;
//! let mutation = Mutation::UpdateText {
//!     element_id: "p".to_string(),
//!     text: "New".to_string(),
//!     old_text: None,
//! };
//! let after = mutation.apply(before).unwrap();
//! stack.record(before.to_string(), &mutation);
//!
//! assert_eq!(stack.undo(&after).as_deref(), Some(before));
//! assert_eq!(stack.redo(before), Some(after));
//! ```

use std::collections::VecDeque;

use crate::Mutation;

/// A group of mutations that should be undone/redone together
#[derive(Debug, Clone, Default)]
pub struct MutationBatch {
    /// The mutations in this batch (in application order)
    pub mutations: Vec<Mutation>,

    /// Optional description of this batch
    pub description: Option<String>,
}

impl MutationBatch {
    /// Create a single-mutation batch
    pub fn single(mutation: Mutation) -> Self {
        Self {
            description: Some(mutation.description()),
            mutations: vec![mutation],
        }
    }

    /// Add a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A batch and the text it replaced (or, on the redo side, the text it produced)
#[derive(Debug, Clone)]
struct HistoryEntry {
    snapshot: String,
    batch: MutationBatch,
}

/// Undo/redo stack for document editing
#[derive(Debug)]
pub struct UndoStack {
    /// Applied batches (most recent last)
    undo_stack: VecDeque<HistoryEntry>,

    /// Undone batches (most recent last)
    redo_stack: Vec<HistoryEntry>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Currently building a batch
    current_batch: Option<MutationBatch>,

    /// Text before the first mutation of the current batch
    batch_snapshot: Option<String>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    /// Create an undo stack with custom max levels
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
            batch_snapshot: None,
        }
    }

    /// Record a mutation that was applied to `before`
    pub fn record(&mut self, before: String, mutation: &Mutation) {
        if let Some(batch) = &mut self.current_batch {
            batch.mutations.push(mutation.clone());
            self.batch_snapshot.get_or_insert(before);
        } else {
            self.push_entry(HistoryEntry {
                snapshot: before,
                batch: MutationBatch::single(mutation.clone()),
            });
        }
    }

    /// Start a batch of mutations (will be undone/redone together)
    pub fn begin_batch(&mut self) {
        self.end_batch();
        self.current_batch = Some(MutationBatch::default());
    }

    /// End the current batch and push to undo stack
    pub fn end_batch(&mut self) {
        let batch = self.current_batch.take();
        let snapshot = self.batch_snapshot.take();

        if let (Some(mut batch), Some(snapshot)) = (batch, snapshot) {
            if batch.description.is_none() && batch.mutations.len() == 1 {
                batch.description = Some(batch.mutations[0].description());
            }
            self.push_entry(HistoryEntry { snapshot, batch });
        }
    }

    /// Set description for current batch (if batching)
    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(batch) = &mut self.current_batch {
            batch.description = Some(description.into());
        }
    }

    pub fn is_batching(&self) -> bool {
        self.current_batch.is_some()
    }

    /// Push an entry to the undo stack
    fn push_entry(&mut self, entry: HistoryEntry) {
        self.undo_stack.push_back(entry);

        // Trim if exceeded max levels
        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.pop_front();
        }

        // Clear redo stack (new action invalidates future)
        self.redo_stack.clear();
    }

    /// Undo the most recent batch, given the document's `current` text.
    ///
    /// Returns the text to restore, or `None` if there is nothing to undo.
    /// An open batch is closed first.
    pub fn undo(&mut self, current: &str) -> Option<String> {
        self.end_batch();

        let entry = self.undo_stack.pop_back()?;
        self.redo_stack.push(HistoryEntry {
            snapshot: current.to_string(),
            batch: entry.batch,
        });
        Some(entry.snapshot)
    }

    /// Redo the most recently undone batch, given the document's `current` text.
    pub fn redo(&mut self, current: &str) -> Option<String> {
        let entry = self.redo_stack.pop()?;
        self.undo_stack.push_back(HistoryEntry {
            snapshot: current.to_string(),
            batch: entry.batch,
        });
        Some(entry.snapshot)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty() || self.batch_snapshot.is_some()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the number of undo levels available
    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of redo levels available
    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
        self.batch_snapshot = None;
    }

    /// Get description of the next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .back()
            .and_then(|entry| entry.batch.description.as_deref())
    }

    /// Get description of the next redo operation
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|entry| entry.batch.description.as_deref())
    }

    /// Mutations of the next undo operation
    pub fn undo_mutations(&self) -> &[Mutation] {
        self.undo_stack
            .back()
            .map(|entry| entry.batch.mutations.as_slice())
            .unwrap_or_default()
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_text(text: &str) -> Mutation {
        Mutation::UpdateText {
            element_id: "p".to_string(),
            text: text.to_string(),
            old_text: None,
        }
    }

    /// Apply through the stack the way `Document` does
    fn apply(stack: &mut UndoStack, source: &mut String, mutation: &Mutation) {
        let updated = mutation.apply(source).unwrap();
        let before = std::mem::replace(source, updated);
        stack.record(before, mutation);
    }

    const SOURCE: &str = r#"<p data-eid="p">Hello</p>"#;

    #[test]
    fn test_undo_stack_creation() {
        let stack = UndoStack::new();
        assert_eq!(stack.undo_levels(), 0);
        assert_eq!(stack.redo_levels(), 0);
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_apply_and_undo_text_mutation() {
        let mut source = SOURCE.to_string();
        let mut stack = UndoStack::new();

        apply(&mut stack, &mut source, &set_text("World"));
        assert_eq!(source, r#"<p data-eid="p">World</p>"#);
        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.undo_description(), Some("Edit text of p"));

        // Undo
        let restored = stack.undo(&source).unwrap();
        assert_eq!(restored, SOURCE);
        assert_eq!(stack.undo_levels(), 0);
        assert_eq!(stack.redo_levels(), 1);

        // Redo
        let redone = stack.redo(&restored).unwrap();
        assert_eq!(redone, source);
        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_batched_mutations() {
        let mut source = SOURCE.to_string();
        let mut stack = UndoStack::new();

        stack.begin_batch();
        stack.set_batch_description("Update greeting");
        apply(&mut stack, &mut source, &set_text("World"));
        apply(&mut stack, &mut source, &set_text("Everyone!"));
        stack.end_batch();

        // One step holding both mutations
        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.undo_description(), Some("Update greeting"));
        assert_eq!(stack.undo_mutations().len(), 2);

        // Undo reverts both
        assert_eq!(stack.undo(&source).as_deref(), Some(SOURCE));
        assert_eq!(stack.undo_levels(), 0);
    }

    #[test]
    fn test_empty_batch_is_not_recorded() {
        let mut stack = UndoStack::new();
        stack.begin_batch();
        stack.end_batch();
        assert!(!stack.can_undo());
    }

    #[test]
    fn test_undo_closes_open_batch() {
        let mut source = SOURCE.to_string();
        let mut stack = UndoStack::new();

        stack.begin_batch();
        apply(&mut stack, &mut source, &set_text("World"));
        assert!(stack.can_undo());

        assert_eq!(stack.undo(&source).as_deref(), Some(SOURCE));
        assert!(!stack.is_batching());
    }

    #[test]
    fn test_new_mutation_clears_redo() {
        let mut source = SOURCE.to_string();
        let mut stack = UndoStack::new();

        apply(&mut stack, &mut source, &set_text("World"));
        source = stack.undo(&source).unwrap();
        assert_eq!(stack.redo_levels(), 1);

        apply(&mut stack, &mut source, &set_text("Everyone"));
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_max_levels_enforced() {
        let mut source = SOURCE.to_string();
        let mut stack = UndoStack::with_max_levels(2);

        for i in 0..3 {
            apply(&mut stack, &mut source, &set_text(&format!("Text {i}")));
        }

        // Oldest level dropped
        assert_eq!(stack.undo_levels(), 2);
        source = stack.undo(&source).unwrap();
        source = stack.undo(&source).unwrap();
        assert_eq!(source, r#"<p data-eid="p">Text 0</p>"#);
        assert_eq!(stack.undo(&source), None);
    }

    #[test]
    fn test_unlimited_levels() {
        let mut source = SOURCE.to_string();
        let mut stack = UndoStack::with_max_levels(0);

        for i in 0..150 {
            apply(&mut stack, &mut source, &set_text(&format!("Text {i}")));
        }

        assert_eq!(stack.undo_levels(), 150);
    }

    #[test]
    fn test_clear() {
        let mut source = SOURCE.to_string();
        let mut stack = UndoStack::new();

        apply(&mut stack, &mut source, &set_text("World"));
        stack.clear();

        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
    }
}
