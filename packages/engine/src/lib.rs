//! # Scalpel Engine
//!
//! Surgical, in-place edits on serialized markup (HTML or JSX-style) without
//! parsing it into a tree.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ lexer: skip strings, templates, {blocks}    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ tag + balancer: opening tags, attributes,   │
//! │ matching closing tag at the same depth      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ locator: data-eid="<id>" → ElementLocation  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ attributes / text / structure / siblings    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Contract
//!
//! Every edit is a pure function of `(text, parameters)`. Each comes in two
//! forms:
//!
//! - `try_*` returns the new text or an [`EditError`] saying why nothing
//!   could be applied safely
//! - the plain form is total: on any refusal it hands back the input,
//!   borrowed and unchanged
//!
//! Nothing is cached between calls. An [`ElementLocation`] borrows the exact
//! snapshot it indexes into and must be recomputed after every edit.
//!
//! ## Usage
//!
//! ```rust
//! use scalpel_engine::{add_class, remove_element, update_element_text};
//!
//! let doc = r#"<section><h1 data-eid="h">Title</h1><p data-eid="p">Old</p></section>"#;
//!
//! let doc = update_element_text(doc, "p", "New", None);
//! let doc = remove_element(&doc, "h");
//! let doc = add_class(&doc, "p", "lead");
//!
//! assert_eq!(doc, r#"<section><p data-eid="p" class="lead">New</p></section>"#);
//! ```

mod attributes;
mod balancer;
mod encoding;
mod errors;
mod lexer;
mod locator;
mod marker;
mod siblings;
mod splice;
mod structure;
mod tag;
mod text;

pub use attributes::{
    add_class, read_classes, read_element_attribute, remove_class, remove_element_attribute,
    remove_inline_style_property, set_inline_style_property, try_add_class, try_remove_class,
    try_remove_element_attribute, try_remove_inline_style_property, try_set_inline_style_property,
    try_update_element_attribute, try_update_element_classes, update_element_attribute,
    update_element_classes,
};
pub use balancer::find_closing;
pub use encoding::{AttributeValue, ValueEncoding};
pub use errors::{EditError, EditResult};
pub use lexer::{skip_block, skip_delimited, skip_string, skip_template};
pub use locator::{locate, ElementLocation};
pub use marker::MARKER_ATTRIBUTE;
pub use siblings::{find_siblings, try_find_siblings, Siblings};
pub use structure::{
    insert_after_element, insert_before_element, move_element, remove_element, replace_element,
    try_insert_after_element, try_insert_before_element, try_move_element, try_remove_element,
    try_replace_element, Position,
};
pub use text::{try_update_element_text, update_element_text};
