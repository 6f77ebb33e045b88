//! # Structural Mutator
//!
//! Replace, insert, remove and move whole elements.
//!
//! Every operation locates its element(s) in the text it was given. Move
//! re-locates its target after the removal step, since the original offsets
//! no longer describe the intermediate text.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::errors::{or_unchanged, EditError, EditResult};
use crate::locator::{locate, ElementLocation};
use crate::splice::{line_indent, line_start, splice};

/// Where a moved element lands relative to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Before,
    After,
}

/// Locate an element whose full span is known.
fn locate_closed<'a>(source: &'a str, id: &str) -> EditResult<ElementLocation<'a>> {
    let loc = locate(source, id).ok_or_else(|| EditError::NotFound(id.to_string()))?;
    if !loc.closed {
        return Err(EditError::Unbalanced(id.to_string()));
    }
    Ok(loc)
}

fn insert_relative(source: &str, target: &ElementLocation<'_>, markup: &str, position: Position) -> String {
    let indent = line_indent(source, target.start);
    match position {
        Position::After => splice(source, target.end..target.end, &format!("\n{indent}{markup}")),
        Position::Before => splice(source, target.start..target.start, &format!("{markup}\n{indent}")),
    }
}

pub fn try_replace_element(source: &str, id: &str, markup: &str) -> EditResult<String> {
    let loc = locate_closed(source, id)?;
    Ok(splice(source, loc.start..loc.end, markup))
}

/// Substitute the element's whole span with `markup`, verbatim.
pub fn replace_element<'a>(source: &'a str, id: &str, markup: &str) -> Cow<'a, str> {
    or_unchanged(source, try_replace_element(source, id, markup))
}

pub fn try_insert_after_element(source: &str, id: &str, markup: &str) -> EditResult<String> {
    let loc = locate_closed(source, id)?;
    Ok(insert_relative(source, &loc, markup, Position::After))
}

/// Insert `markup` as the next sibling, on a new line with the element's indentation.
pub fn insert_after_element<'a>(source: &'a str, id: &str, markup: &str) -> Cow<'a, str> {
    or_unchanged(source, try_insert_after_element(source, id, markup))
}

pub fn try_insert_before_element(source: &str, id: &str, markup: &str) -> EditResult<String> {
    let loc = locate_closed(source, id)?;
    Ok(insert_relative(source, &loc, markup, Position::Before))
}

/// Insert `markup` as the previous sibling, followed by a new line.
pub fn insert_before_element<'a>(source: &'a str, id: &str, markup: &str) -> Cow<'a, str> {
    or_unchanged(source, try_insert_before_element(source, id, markup))
}

pub fn try_remove_element(source: &str, id: &str) -> EditResult<String> {
    let loc = locate_closed(source, id)?;

    let mut start = loc.start;
    let mut end = loc.end;

    // Take the whole line only when the element is alone on it
    let line = line_start(source, loc.start);
    let rest = &source[end..];
    let trailing = rest.len() - rest.trim_start_matches([' ', '\t']).len();
    let after = &rest[trailing..];
    let alone_before = source[line..loc.start].bytes().all(|b| b == b' ' || b == b'\t');
    let alone_after = after.is_empty() || after.starts_with('\n') || after.starts_with("\r\n");

    if alone_before && alone_after {
        start = line;
        end += trailing;
        if after.starts_with("\r\n") {
            end += 2;
        } else if after.starts_with('\n') {
            end += 1;
        }
    }

    Ok(splice(source, start..end, ""))
}

/// Delete the element. When it sits alone on its line the indentation and
/// the line break go with it, so no blank line is left behind.
pub fn remove_element<'a>(source: &'a str, id: &str) -> Cow<'a, str> {
    or_unchanged(source, try_remove_element(source, id))
}

pub fn try_move_element(
    source: &str,
    id: &str,
    target_id: &str,
    position: Position,
) -> EditResult<String> {
    let element = locate_closed(source, id)?;
    let target = locate(source, target_id).ok_or_else(|| EditError::NotFound(target_id.to_string()))?;

    // Moving next to itself or into its own subtree has no meaning
    if target.start >= element.start && target.start < element.end {
        return Err(EditError::InvalidMove {
            element_id: id.to_string(),
            target_id: target_id.to_string(),
        });
    }

    let moved = element.outer_text.to_string();
    let removed = try_remove_element(source, id)?;

    let target = locate_closed(&removed, target_id)?;
    Ok(insert_relative(&removed, &target, &moved, position))
}

/// Move an element before or after another one.
///
/// All or nothing: if the target cannot be found again once the element has
/// been removed, the original document is returned.
pub fn move_element<'a>(source: &'a str, id: &str, target_id: &str, position: Position) -> Cow<'a, str> {
    or_unchanged(source, try_move_element(source, id, target_id, position))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST: &str = "<ul data-eid=\"list\">\n  <li data-eid=\"a\">A</li>\n  <li data-eid=\"b\">B</li>\n  <li data-eid=\"c\">C</li>\n</ul>";

    #[test]
    fn test_replace_round_trip() {
        let loc = locate(LIST, "b").unwrap();
        assert_eq!(replace_element(LIST, "b", loc.outer_text), LIST);
    }

    #[test]
    fn test_replace() {
        let source = r#"<div><span data-eid="s">x</span></div>"#;
        assert_eq!(
            replace_element(source, "s", "<em>y</em>"),
            "<div><em>y</em></div>"
        );
    }

    #[test]
    fn test_insert_after_uses_indentation() {
        let result = insert_after_element(LIST, "a", r#"<li data-eid="n">N</li>"#);
        assert_eq!(
            result,
            "<ul data-eid=\"list\">\n  <li data-eid=\"a\">A</li>\n  <li data-eid=\"n\">N</li>\n  <li data-eid=\"b\">B</li>\n  <li data-eid=\"c\">C</li>\n</ul>"
        );
    }

    #[test]
    fn test_insert_before() {
        let result = insert_before_element(LIST, "c", r#"<li data-eid="n">N</li>"#);
        assert!(result.contains("<li data-eid=\"n\">N</li>\n  <li data-eid=\"c\">"));
    }

    #[test]
    fn test_remove_whole_line() {
        assert_eq!(
            remove_element(LIST, "b"),
            "<ul data-eid=\"list\">\n  <li data-eid=\"a\">A</li>\n  <li data-eid=\"c\">C</li>\n</ul>"
        );
    }

    #[test]
    fn test_remove_inline() {
        let source = r#"<section><h1 data-eid="h">Title</h1><p data-eid="p">New</p></section>"#;
        assert_eq!(
            remove_element(source, "h"),
            r#"<section><p data-eid="p">New</p></section>"#
        );
    }

    #[test]
    fn test_remove_keeps_indent_of_trailing_text() {
        let source = "<div>\n  <b data-eid=\"x\">a</b> tail\n</div>";
        assert_eq!(remove_element(source, "x"), "<div>\n   tail\n</div>");
    }

    #[test]
    fn test_remove_absorbs_trailing_spaces() {
        let source = "<div>\n  <b data-eid=\"x\">a</b>  \r\n  <i>b</i>\n</div>";
        assert_eq!(remove_element(source, "x"), "<div>\n  <i>b</i>\n</div>");
    }

    #[test]
    fn test_move_after() {
        let result = move_element(LIST, "a", "c", Position::After);
        assert_eq!(
            result,
            "<ul data-eid=\"list\">\n  <li data-eid=\"b\">B</li>\n  <li data-eid=\"c\">C</li>\n  <li data-eid=\"a\">A</li>\n</ul>"
        );
    }

    #[test]
    fn test_move_before() {
        let result = move_element(LIST, "c", "a", Position::Before);
        assert_eq!(
            result,
            "<ul data-eid=\"list\">\n  <li data-eid=\"c\">C</li>\n  <li data-eid=\"a\">A</li>\n  <li data-eid=\"b\">B</li>\n</ul>"
        );
    }

    #[test]
    fn test_move_is_atomic() {
        assert_eq!(move_element(LIST, "a", "nonexistent", Position::After), LIST);
        assert_eq!(move_element(LIST, "missing", "a", Position::After), LIST);
    }

    #[test]
    fn test_move_into_own_subtree_refused() {
        assert!(matches!(
            try_move_element(LIST, "list", "b", Position::After),
            Err(EditError::InvalidMove { .. })
        ));
        assert!(matches!(
            try_move_element(LIST, "a", "a", Position::Before),
            Err(EditError::InvalidMove { .. })
        ));
    }

    #[test]
    fn test_unbalanced_element_is_not_removed() {
        let source = r#"<div data-eid="d"><p>open"#;
        assert_eq!(
            try_remove_element(source, "d"),
            Err(EditError::Unbalanced("d".to_string()))
        );
    }
}
