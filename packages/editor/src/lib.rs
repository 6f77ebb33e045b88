//! # Scalpel Editor
//!
//! Document editing on top of the surgical markup engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ engine: pure (text, params) → text edits    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + mutations      │
//! │  - Load/save documents                      │
//! │  - Serializable mutations and scripts       │
//! │  - Snapshot undo/redo with batches          │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use scalpel_editor::{Document, Mutation, MutationResult};
//!
//! let mut doc = Document::from_source(r#"<p data-eid="p">Old</p>"#);
//!
//! let result = doc.apply(&Mutation::AddClass {
//!     element_id: "p".to_string(),
//!     class_name: "lead".to_string(),
//! });
//! assert_eq!(result, MutationResult::Applied { version: 1 });
//! assert_eq!(doc.source(), r#"<p data-eid="p" class="lead">Old</p>"#);
//!
//! doc.undo();
//! assert_eq!(doc.source(), r#"<p data-eid="p">Old</p>"#);
//! ```

mod document;
mod errors;
mod mutations;
mod undo_stack;

pub use document::{Document, DocumentStorage};
pub use errors::EditorError;
pub use mutations::{Mutation, MutationResult};
pub use undo_stack::{MutationBatch, UndoStack};

// Re-export engine types for convenience
pub use scalpel_engine::{EditError, ElementLocation, Position, Siblings};
