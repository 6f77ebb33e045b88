//! # Markup Mutations
//!
//! One serializable value per engine edit, so edits can be queued, logged,
//! replayed and shipped as JSON scripts.
//!
//! ## Mutation Semantics
//!
//! ### Apply
//! - Runs against the text it is given, never against cached offsets
//! - Either returns the complete new text or refuses with an [`EditError`](scalpel_engine::EditError)
//! - A refusal never leaves a partially edited document behind
//!
//! ### MoveElement
//! - Remove, then insert next to the re-located target
//! - Refused if the target is missing, is the element itself, or lies inside it
//!
//! ### UpdateText
//! - Replaces direct text only
//! - Mixed text and child elements need `old_text` naming the run to replace

use scalpel_engine::{EditResult, Position};
use serde::{Deserialize, Serialize};

use crate::EditorError;

/// Semantic edits on one marked element
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Substitute the element's whole span
    ReplaceElement { element_id: String, markup: String },

    /// Insert markup as the next sibling
    InsertAfter { element_id: String, markup: String },

    /// Insert markup as the previous sibling
    InsertBefore { element_id: String, markup: String },

    /// Remove the element and its line if it stands alone
    RemoveElement { element_id: String },

    /// Move the element next to another one
    MoveElement {
        element_id: String,
        target_id: String,
        position: Position,
    },

    /// Replace the whole class list
    UpdateClasses { element_id: String, classes: String },

    AddClass { element_id: String, class_name: String },

    RemoveClass { element_id: String, class_name: String },

    /// Replace direct text content
    UpdateText {
        element_id: String,
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        old_text: Option<String>,
    },

    /// Set a literal attribute value
    SetAttribute {
        element_id: String,
        name: String,
        value: String,
    },

    RemoveAttribute { element_id: String, name: String },

    /// Set one inline style declaration
    SetInlineStyle {
        element_id: String,
        property: String,
        value: String,
    },

    RemoveInlineStyle { element_id: String, property: String },
}

impl Mutation {
    /// Apply to `source`, returning the new text or the reason it was refused
    pub fn apply(&self, source: &str) -> EditResult<String> {
        use scalpel_engine as engine;

        match self {
            Mutation::ReplaceElement { element_id, markup } => {
                engine::try_replace_element(source, element_id, markup)
            }
            Mutation::InsertAfter { element_id, markup } => {
                engine::try_insert_after_element(source, element_id, markup)
            }
            Mutation::InsertBefore { element_id, markup } => {
                engine::try_insert_before_element(source, element_id, markup)
            }
            Mutation::RemoveElement { element_id } => engine::try_remove_element(source, element_id),
            Mutation::MoveElement { element_id, target_id, position } => {
                engine::try_move_element(source, element_id, target_id, *position)
            }
            Mutation::UpdateClasses { element_id, classes } => {
                engine::try_update_element_classes(source, element_id, classes)
            }
            Mutation::AddClass { element_id, class_name } => {
                engine::try_add_class(source, element_id, class_name)
            }
            Mutation::RemoveClass { element_id, class_name } => {
                engine::try_remove_class(source, element_id, class_name)
            }
            Mutation::UpdateText { element_id, text, old_text } => {
                engine::try_update_element_text(source, element_id, text, old_text.as_deref())
            }
            Mutation::SetAttribute { element_id, name, value } => {
                engine::try_update_element_attribute(source, element_id, name, value)
            }
            Mutation::RemoveAttribute { element_id, name } => {
                engine::try_remove_element_attribute(source, element_id, name)
            }
            Mutation::SetInlineStyle { element_id, property, value } => {
                engine::try_set_inline_style_property(source, element_id, property, value)
            }
            Mutation::RemoveInlineStyle { element_id, property } => {
                engine::try_remove_inline_style_property(source, element_id, property)
            }
        }
    }

    /// Id of the element this mutation addresses
    pub fn element_id(&self) -> &str {
        match self {
            Mutation::ReplaceElement { element_id, .. }
            | Mutation::InsertAfter { element_id, .. }
            | Mutation::InsertBefore { element_id, .. }
            | Mutation::RemoveElement { element_id }
            | Mutation::MoveElement { element_id, .. }
            | Mutation::UpdateClasses { element_id, .. }
            | Mutation::AddClass { element_id, .. }
            | Mutation::RemoveClass { element_id, .. }
            | Mutation::UpdateText { element_id, .. }
            | Mutation::SetAttribute { element_id, .. }
            | Mutation::RemoveAttribute { element_id, .. }
            | Mutation::SetInlineStyle { element_id, .. }
            | Mutation::RemoveInlineStyle { element_id, .. } => element_id,
        }
    }

    /// Short human-readable label, used for undo history
    pub fn description(&self) -> String {
        match self {
            Mutation::ReplaceElement { element_id, .. } => format!("Replace {element_id}"),
            Mutation::InsertAfter { element_id, .. } => format!("Insert after {element_id}"),
            Mutation::InsertBefore { element_id, .. } => format!("Insert before {element_id}"),
            Mutation::RemoveElement { element_id } => format!("Remove {element_id}"),
            Mutation::MoveElement { element_id, target_id, position } => {
                let position = match position {
                    Position::Before => "before",
                    Position::After => "after",
                };
                format!("Move {element_id} {position} {target_id}")
            }
            Mutation::UpdateClasses { element_id, .. } => format!("Set classes of {element_id}"),
            Mutation::AddClass { element_id, class_name } => {
                format!("Add class {class_name} to {element_id}")
            }
            Mutation::RemoveClass { element_id, class_name } => {
                format!("Remove class {class_name} from {element_id}")
            }
            Mutation::UpdateText { element_id, .. } => format!("Edit text of {element_id}"),
            Mutation::SetAttribute { element_id, name, .. } => format!("Set {name} on {element_id}"),
            Mutation::RemoveAttribute { element_id, name } => {
                format!("Remove {name} from {element_id}")
            }
            Mutation::SetInlineStyle { element_id, property, .. } => {
                format!("Set style {property} on {element_id}")
            }
            Mutation::RemoveInlineStyle { element_id, property } => {
                format!("Remove style {property} from {element_id}")
            }
        }
    }

    /// Parse a JSON script: a single mutation or an array of them
    pub fn parse_script(json: &str) -> Result<Vec<Mutation>, EditorError> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Script {
            One(Mutation),
            Many(Vec<Mutation>),
        }

        Ok(match serde_json::from_str(json)? {
            Script::One(mutation) => vec![mutation],
            Script::Many(mutations) => mutations,
        })
    }
}

/// Result of applying a mutation to a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationResult {
    /// Text changed; the document is now at `version`
    Applied { version: u64 },

    /// Nothing changed, and nothing was recorded in history
    Noop { reason: String },
}

impl MutationResult {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationResult::Applied { .. })
    }
}
