//! Reasons an edit was refused

use std::borrow::Cow;

use thiserror::Error;
use tracing::debug;

/// Why an operation left the document unchanged.
///
/// None of these are fatal: the total form of every operation turns them into
/// "return the input as-is".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Element not found: {0}")]
    NotFound(String),

    #[error("Element {0} has no balanced closing tag")]
    Unbalanced(String),

    #[error("Attribute `{attribute}` on element {element_id} is bound to an expression")]
    DynamicBinding {
        element_id: String,
        attribute: String,
    },

    #[error("Text replacement in element {0} is ambiguous")]
    AmbiguousText(String),

    #[error("Element {0} is self-closing and has no content")]
    SelfClosing(String),

    #[error("Cannot move element {element_id} relative to {target_id}")]
    InvalidMove {
        element_id: String,
        target_id: String,
    },

    #[error("Attribute `{0}` is reserved for element identifiers")]
    ReservedAttribute(String),

    #[error("Invalid attribute name: {0:?}")]
    InvalidAttributeName(String),

    #[error("Invalid style property: {0:?}")]
    InvalidStyleProperty(String),
}

impl EditError {
    pub fn dynamic_binding(element_id: &str, attribute: &str) -> Self {
        Self::DynamicBinding {
            element_id: element_id.to_string(),
            attribute: attribute.to_string(),
        }
    }
}

pub type EditResult<T> = Result<T, EditError>;

/// Collapse a refused edit into the unchanged input.
pub(crate) fn or_unchanged(source: &str, result: EditResult<String>) -> Cow<'_, str> {
    match result {
        Ok(text) => Cow::Owned(text),
        Err(err) => {
            debug!(%err, "edit refused, document unchanged");
            Cow::Borrowed(source)
        }
    }
}
