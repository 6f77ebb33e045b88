//! # Element Locator
//!
//! Resolves a marker id to the byte span of its element within one text
//! snapshot.
//!
//! ## Algorithm
//!
//! 1. Find `data-eid="<id>"` (exact match, attribute boundary only)
//! 2. Walk backward over `<` candidates to the opening tag that owns the marker
//! 3. Scan the opening tag with the lexical skippers
//! 4. Self-closing: the span is the opening tag. Otherwise balance to the
//!    matching closing tag, degrading to the opening tag alone if none exists

use serde::Serialize;
use tracing::debug;

use crate::attributes::read_class_value;
use crate::balancer::find_closing;
use crate::marker::find_marker;
use crate::tag::{attributes, scan_open_tag, OpenTag};

/// Where one element sits in a specific snapshot of the document.
///
/// Borrows the text it was computed from, so it cannot outlive that snapshot.
/// Any edit produces a new text; locate again instead of adjusting offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementLocation<'a> {
    /// Offset of the opening `<`
    pub start: usize,
    /// Offset just past the element (closing tag, or opening tag if none)
    pub end: usize,
    /// Offset just past the opening tag's `>`
    pub open_end: usize,
    pub outer_text: &'a str,
    pub tag: &'a str,
    /// Raw class attribute value, if written as a literal
    pub classes: Option<&'a str>,
    pub self_closing: bool,
    /// `false` when no matching closing tag was found and the span fell back
    /// to the opening tag only
    pub closed: bool,
}

impl<'a> ElementLocation<'a> {
    pub fn opening_tag(&self) -> &'a str {
        &self.outer_text[..self.open_end - self.start]
    }

    /// Byte range of the content between the opening and closing tags.
    ///
    /// `None` for self-closing elements and for unbalanced ones.
    pub fn inner_range(&self) -> Option<std::ops::Range<usize>> {
        if self.self_closing || !self.closed {
            return None;
        }
        let close = self.outer_text.rfind("</")?;
        Some(self.open_end..self.start + close)
    }
}

/// The opening tag that contains the marker attribute at `marker`.
///
/// The nearest `<` is not always the owner: it may belong to a comparison or
/// to markup nested inside an attribute expression, so candidates are tried
/// until one whose attribute list starts exactly at the marker.
pub(crate) fn owning_tag(src: &[u8], marker: usize) -> Option<OpenTag> {
    let mut cursor = marker;

    while let Some(lt) = src[..cursor].iter().rposition(|&b| b == b'<') {
        cursor = lt;
        let Some(tag) = scan_open_tag(src, lt) else {
            continue;
        };
        if tag.end > marker && attributes(src, &tag).iter().any(|a| a.start == marker) {
            return Some(tag);
        }
    }

    None
}

/// Opening tag of the element carrying `id`, without balancing its content.
pub(crate) fn locate_open_tag(source: &str, id: &str) -> Option<OpenTag> {
    let src = source.as_bytes();
    find_marker(source, id)
        .into_iter()
        .find_map(|marker| owning_tag(src, marker))
}

pub(crate) fn location_from_tag(source: &str, open: OpenTag) -> ElementLocation<'_> {
    let src = source.as_bytes();
    let tag = open.name(source);
    let self_closing = open.closes_itself(src);

    let (end, closed) = if self_closing {
        (open.end, true)
    } else {
        match find_closing(src, open.end, tag) {
            Some(end) => (end, true),
            None => {
                debug!(tag, start = open.start, "no balanced closing tag, using opening tag only");
                (open.end, false)
            }
        }
    };

    ElementLocation {
        start: open.start,
        end,
        open_end: open.end,
        outer_text: &source[open.start..end],
        tag,
        classes: read_class_value(source, &open),
        self_closing,
        closed,
    }
}

/// Locate the element carrying `data-eid="<id>"`.
pub fn locate<'a>(source: &'a str, id: &str) -> Option<ElementLocation<'a>> {
    let open = locate_open_tag(source, id)?;
    Some(location_from_tag(source, open))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_simple_element() {
        let source = r#"<main><p data-eid="p" class="lead">Hi</p></main>"#;
        let loc = locate(source, "p").unwrap();
        assert_eq!(loc.outer_text, r#"<p data-eid="p" class="lead">Hi</p>"#);
        assert_eq!(loc.tag, "p");
        assert_eq!(loc.classes, Some("lead"));
        assert!(!loc.self_closing);
        assert!(loc.closed);
        assert_eq!(loc.opening_tag(), r#"<p data-eid="p" class="lead">"#);
        assert_eq!(&source[loc.inner_range().unwrap()], "Hi");
    }

    #[test]
    fn test_locate_self_closing() {
        let source = r#"<div><Avatar data-eid="av" size={32} /></div>"#;
        let loc = locate(source, "av").unwrap();
        assert_eq!(loc.outer_text, r#"<Avatar data-eid="av" size={32} />"#);
        assert!(loc.self_closing);
        assert_eq!(loc.inner_range(), None);
    }

    #[test]
    fn test_locate_void_element_without_slash() {
        let source = r#"<p><img data-eid="i" src="a.png"> caption</p>"#;
        let loc = locate(source, "i").unwrap();
        assert_eq!(loc.outer_text, r#"<img data-eid="i" src="a.png">"#);
        assert!(loc.self_closing);
    }

    #[test]
    fn test_locate_dotted_component_name() {
        let source = r#"<Card.Body data-eid="b">x</Card.Body>"#;
        let loc = locate(source, "b").unwrap();
        assert_eq!(loc.tag, "Card.Body");
        assert_eq!(loc.end, source.len());
    }

    #[test]
    fn test_marker_after_comparison_expression() {
        let source = r#"<div hidden={a < b} data-eid="x">y</div>"#;
        let loc = locate(source, "x").unwrap();
        assert_eq!(loc.start, 0);
        assert_eq!(loc.end, source.len());
    }

    #[test]
    fn test_marker_after_nested_markup_in_attribute() {
        let source = r#"<Slot icon={<Icon />} data-eid="s">z</Slot>"#;
        let loc = locate(source, "s").unwrap();
        assert_eq!(loc.tag, "Slot");
        assert_eq!(loc.end, source.len());
    }

    #[test]
    fn test_marker_text_inside_attribute_value_is_ignored() {
        let source = r#"<code title=' data-eid="x"'>a</code><b data-eid="x">b</b>"#;
        let loc = locate(source, "x").unwrap();
        assert_eq!(loc.tag, "b");
    }

    #[test]
    fn test_unbalanced_degrades_to_opening_tag() {
        let source = r#"<section><div data-eid="d"><span>never closed</section>"#;
        let loc = locate(source, "d").unwrap();
        assert_eq!(loc.outer_text, r#"<div data-eid="d">"#);
        assert!(!loc.closed);
        assert_eq!(loc.inner_range(), None);
    }

    #[test]
    fn test_not_found() {
        assert!(locate(r#"<div data-eid="a"></div>"#, "b").is_none());
        assert!(locate("plain text data-eid=\"a\"", "a").is_none());
    }
}
