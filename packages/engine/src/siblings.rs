//! # Sibling Resolver
//!
//! Finds the previous and next same-level siblings of an element without a
//! tree. Candidates are the marked elements directly inside the parent's
//! content (descendants are jumped over with the balancer); of those, only
//! the ones whose line starts with exactly the same indentation count.
//!
//! This holds for machine-generated, consistently indented markup. On
//! hand re-indented input the answer is unspecified.

use std::ops::Range;

use serde::Serialize;

use crate::balancer::find_closing;
use crate::errors::{EditError, EditResult};
use crate::lexer::skip_block;
use crate::locator::locate;
use crate::marker::{markers_in, MARKER_ATTRIBUTE};
use crate::splice::line_indent;
use crate::tag::{attributes, scan_close_tag, scan_open_tag, skip_declaration, OpenTag};

/// Immediate neighbours of an element among its siblings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Siblings<'a> {
    pub previous_id: Option<&'a str>,
    pub next_id: Option<&'a str>,
}

/// Offset of the `{` matching the `}` at `close`, scanning backward.
fn matching_open_brace(src: &[u8], close: usize) -> Option<usize> {
    let mut depth = 0usize;
    for i in (0..=close).rev() {
        match src[i] {
            b'}' => depth += 1,
            b'{' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Offset just past the `>` of the nearest unclosed opening tag before `before`.
///
/// Comments and expression blocks that end before `before` are stepped over
/// whole; a block that is still open at `before` is transparent.
fn parent_content_start(src: &[u8], before: usize) -> usize {
    let mut depth = 0usize;
    let mut cursor = before;

    while cursor > 0 {
        cursor -= 1;
        match src[cursor] {
            b'>' if src[..cursor].ends_with(b"--") => {
                if let Some(open) = src[..cursor].windows(4).rposition(|w| w == b"<!--") {
                    cursor = open;
                }
            }
            b'}' => match matching_open_brace(src, cursor) {
                Some(open) => cursor = open,
                None => return 0,
            },
            b'<' => match src.get(cursor + 1) {
                Some(b'/') => {
                    if scan_close_tag(src, cursor).is_some_and(|close| close.end <= before) {
                        depth += 1;
                    }
                }
                Some(b'!') => {}
                Some(b'>') => {
                    if depth == 0 {
                        return cursor + 2;
                    }
                    depth -= 1;
                }
                _ => {
                    if let Some(open) = scan_open_tag(src, cursor) {
                        if open.end <= before && !open.closes_itself(src) {
                            if depth == 0 {
                                return open.end;
                            }
                            depth -= 1;
                        }
                    }
                }
            },
            _ => {}
        }
    }

    0
}

/// Offset of the first closing tag after `after` that closes the parent.
fn parent_content_end(src: &[u8], after: usize) -> usize {
    let mut depth = 0usize;
    let mut i = after;

    while i < src.len() {
        match src[i] {
            b'{' => i = skip_block(src, i).unwrap_or(src.len()),
            b'<' => match src.get(i + 1) {
                Some(b'/') => match scan_close_tag(src, i) {
                    Some(close) => {
                        if depth == 0 {
                            return i;
                        }
                        depth -= 1;
                        i = close.end;
                    }
                    None => i += 1,
                },
                Some(b'!') => i = skip_declaration(src, i).unwrap_or(src.len()),
                Some(b'>') => {
                    depth += 1;
                    i += 2;
                }
                _ => match scan_open_tag(src, i) {
                    Some(open) => {
                        if !open.closes_itself(src) {
                            depth += 1;
                        }
                        i = open.end;
                    }
                    None => i += 1,
                },
            },
            _ => i += 1,
        }
    }

    src.len()
}

/// Id carried by the marker attribute of `open`, if any.
fn marker_id<'a>(source: &'a str, open: &OpenTag) -> Option<&'a str> {
    let attr = attributes(source.as_bytes(), open)
        .into_iter()
        .find(|attr| attr.name(source) == MARKER_ATTRIBUTE)?;
    markers_in(source, attr.start..attr.end).first().map(|marker| marker.id)
}

/// Marked elements directly inside `region`, as `(tag start, id)` in order.
///
/// Each element found is jumped over whole, so its descendants never count.
/// An expression block is entered only when it holds `target`.
fn direct_children<'a>(source: &'a str, region: Range<usize>, target: usize) -> Vec<(usize, &'a str)> {
    let src = source.as_bytes();
    let mut children = Vec::new();
    let mut i = region.start;

    while i < region.end {
        match src[i] {
            b'{' => match skip_block(src, i) {
                Some(end) if !(i < target && target < end) => i = end,
                Some(_) => i += 1,
                None => break,
            },
            b'<' => match src.get(i + 1) {
                Some(b'!') => i = skip_declaration(src, i).unwrap_or(region.end),
                Some(b'/') => i = scan_close_tag(src, i).map_or(i + 1, |close| close.end),
                _ => match scan_open_tag(src, i) {
                    Some(open) => {
                        if let Some(id) = marker_id(source, &open) {
                            children.push((open.start, id));
                        }
                        i = if open.closes_itself(src) {
                            open.end
                        } else {
                            find_closing(src, open.end, open.name(source)).unwrap_or(open.end)
                        };
                    }
                    None => i += 1,
                },
            },
            _ => i += 1,
        }
    }

    children
}

pub fn try_find_siblings<'a>(source: &'a str, id: &str) -> EditResult<Siblings<'a>> {
    let src = source.as_bytes();
    let loc = locate(source, id).ok_or_else(|| EditError::NotFound(id.to_string()))?;
    let indent = line_indent(source, loc.start);

    let start = parent_content_start(src, loc.start);
    let end = parent_content_end(src, loc.end).max(loc.end);

    let siblings: Vec<(usize, &'a str)> = direct_children(source, start..end, loc.start)
        .into_iter()
        .filter(|&(tag_start, _)| line_indent(source, tag_start) == indent)
        .collect();

    let Some(index) = siblings.iter().position(|&(tag_start, _)| tag_start == loc.start) else {
        return Ok(Siblings::default());
    };

    Ok(Siblings {
        previous_id: index.checked_sub(1).map(|prev| siblings[prev].1),
        next_id: siblings.get(index + 1).map(|&(_, sibling)| sibling),
    })
}

/// Previous and next sibling ids; both `None` when the element is not found.
pub fn find_siblings<'a>(source: &'a str, id: &str) -> Siblings<'a> {
    try_find_siblings(source, id).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<main data-eid="main">
  <header data-eid="header">
    <h1 data-eid="title">Title</h1>
  </header>
  <section data-eid="body">
    <p data-eid="p1">One</p>
    <p data-eid="p2">Two</p>
    <p data-eid="p3">Three</p>
  </section>
  <footer data-eid="footer">
    <small data-eid="fine">fine print</small>
  </footer>
</main>"#;

    #[test]
    fn test_middle_sibling() {
        let siblings = find_siblings(PAGE, "p2");
        assert_eq!(siblings.previous_id, Some("p1"));
        assert_eq!(siblings.next_id, Some("p3"));
    }

    #[test]
    fn test_ends_of_sibling_list() {
        assert_eq!(find_siblings(PAGE, "p1").previous_id, None);
        assert_eq!(find_siblings(PAGE, "p3").next_id, None);
    }

    #[test]
    fn test_siblings_skip_nested_levels() {
        let siblings = find_siblings(PAGE, "body");
        assert_eq!(siblings.previous_id, Some("header"));
        assert_eq!(siblings.next_id, Some("footer"));
    }

    #[test]
    fn test_only_child_has_no_siblings() {
        assert_eq!(find_siblings(PAGE, "title"), Siblings::default());
        assert_eq!(find_siblings(PAGE, "fine"), Siblings::default());
    }

    #[test]
    fn test_single_line_siblings() {
        let source = r#"<section><h1 data-eid="h">Title</h1><p data-eid="p">Old</p></section>"#;
        assert_eq!(find_siblings(source, "h").next_id, Some("p"));
        assert_eq!(find_siblings(source, "p").previous_id, Some("h"));
    }

    #[test]
    fn test_inline_child_is_not_a_sibling() {
        let source = r#"<ul data-eid="list">
  <li data-eid="a"><b data-eid="x">A</b></li>
  <li data-eid="b">B</li>
</ul>"#;
        assert_eq!(find_siblings(source, "a").next_id, Some("b"));
        assert_eq!(find_siblings(source, "b").previous_id, Some("a"));
        assert_eq!(find_siblings(source, "x"), Siblings::default());
    }

    #[test]
    fn test_minified_siblings_skip_descendants() {
        let source = r#"<section><div data-eid="a"><span data-eid="x">1</span></div><div data-eid="b">2</div></section>"#;
        assert_eq!(find_siblings(source, "a").next_id, Some("b"));
        assert_eq!(find_siblings(source, "b").previous_id, Some("a"));
        assert_eq!(find_siblings(source, "x"), Siblings::default());
    }

    #[test]
    fn test_markup_in_comment_is_ignored() {
        let source = r#"<ul data-eid="list">
  <li data-eid="a">A</li>
  <!-- <li> -->
  <li data-eid="b">B</li>
</ul>"#;
        assert_eq!(find_siblings(source, "b").previous_id, Some("a"));
        assert_eq!(find_siblings(source, "a").next_id, Some("b"));
    }

    #[test]
    fn test_markup_in_expression_block_is_ignored() {
        let source = r#"<ul data-eid="list">
  <li data-eid="a">A</li>
  {render("<li>")}
  <li data-eid="b">B</li>
</ul>"#;
        assert_eq!(find_siblings(source, "b").previous_id, Some("a"));
        assert_eq!(find_siblings(source, "a").next_id, Some("b"));
    }

    #[test]
    fn test_siblings_inside_expression_block() {
        let source = r#"<ul data-eid="list">
  <li data-eid="first">First</li>
  {open && (
    <li data-eid="a">A</li>
  )}
</ul>"#;
        assert_eq!(find_siblings(source, "a"), Siblings::default());
        assert_eq!(find_siblings(source, "first"), Siblings::default());
    }

    #[test]
    fn test_unknown_id() {
        assert_eq!(find_siblings(PAGE, "nope"), Siblings::default());
    }
}
