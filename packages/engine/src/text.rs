//! Text content replacement.
//!
//! Only direct text of the element is ever touched. When the element mixes
//! text with child elements or expression blocks, the caller must name the
//! exact text to replace; otherwise the edit is ambiguous and refused.

use std::borrow::Cow;
use std::ops::Range;

use crate::errors::{or_unchanged, EditError, EditResult};
use crate::lexer::{skip_block, skip_element};
use crate::locator::locate;
use crate::splice::splice;
use crate::tag::{scan_close_tag, skip_declaration};

/// Direct text runs of an element's content.
struct Children {
    text_runs: Vec<Range<usize>>,
    /// Content contains child elements, comments or expression blocks
    nested: bool,
}

fn scan_children(src: &[u8], content: Range<usize>) -> Option<Children> {
    let mut text_runs = Vec::new();
    let mut nested = false;
    let mut run_start = content.start;
    let mut i = content.start;

    while i < content.end {
        let skipped = match src[i] {
            b'{' => Some(skip_block(src, i)?),
            b'<' if src.get(i + 1) == Some(&b'!') => Some(skip_declaration(src, i)?),
            b'<' if scan_close_tag(src, i).is_none() => skip_element(src, i),
            _ => None,
        };

        match skipped {
            Some(next) => {
                if run_start < i {
                    text_runs.push(run_start..i);
                }
                nested = true;
                i = next;
                run_start = next;
            }
            None => i += 1,
        }
    }

    if run_start < content.end {
        text_runs.push(run_start..content.end);
    }

    Some(Children { text_runs, nested })
}

/// Escape text so it can never open a tag or an expression block.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn try_update_element_text(
    source: &str,
    id: &str,
    new_text: &str,
    old_text: Option<&str>,
) -> EditResult<String> {
    let loc = locate(source, id).ok_or_else(|| EditError::NotFound(id.to_string()))?;
    if loc.self_closing {
        return Err(EditError::SelfClosing(id.to_string()));
    }
    let content = loc
        .inner_range()
        .ok_or_else(|| EditError::Unbalanced(id.to_string()))?;
    let children = scan_children(source.as_bytes(), content.clone())
        .ok_or_else(|| EditError::Unbalanced(id.to_string()))?;
    let replacement = escape_text(new_text);

    if let Some(anchor) = old_text.filter(|anchor| !anchor.is_empty()) {
        return children
            .text_runs
            .iter()
            .find_map(|run| {
                source[run.clone()]
                    .find(anchor)
                    .map(|offset| run.start + offset..run.start + offset + anchor.len())
            })
            .map(|range| splice(source, range, &replacement))
            .ok_or_else(|| EditError::AmbiguousText(id.to_string()));
    }

    if children.nested {
        return Err(EditError::AmbiguousText(id.to_string()));
    }

    // Keep the whitespace around the text so indentation survives
    let inner = &source[content.clone()];
    let trimmed = inner.trim();
    if trimmed.is_empty() {
        return Ok(splice(source, content, &replacement));
    }
    let leading = inner.len() - inner.trim_start().len();
    let start = content.start + leading;
    Ok(splice(source, start..start + trimmed.len(), &replacement))
}

/// Replace an element's text content.
///
/// With `old_text`, only that exact run of direct text is replaced. Without
/// it, the element must contain nothing but text.
pub fn update_element_text<'a>(
    source: &'a str,
    id: &str,
    new_text: &str,
    old_text: Option<&str>,
) -> Cow<'a, str> {
    or_unchanged(source, try_update_element_text(source, id, new_text, old_text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_plain_text() {
        let source = r#"<section><h1 data-eid="h">Title</h1><p data-eid="p">Old</p></section>"#;
        assert_eq!(
            update_element_text(source, "p", "New", None),
            r#"<section><h1 data-eid="h">Title</h1><p data-eid="p">New</p></section>"#
        );
    }

    #[test]
    fn test_replace_keeps_surrounding_whitespace() {
        let source = "<p data-eid=\"p\">\n    Old text\n</p>";
        assert_eq!(
            update_element_text(source, "p", "New", None),
            "<p data-eid=\"p\">\n    New\n</p>"
        );
    }

    #[test]
    fn test_fill_empty_element() {
        let source = r#"<button data-eid="b"></button>"#;
        assert_eq!(
            update_element_text(source, "b", "Go", None),
            r#"<button data-eid="b">Go</button>"#
        );
    }

    #[test]
    fn test_mixed_content_requires_anchor() {
        let source = r#"<p data-eid="p">Hello <b>bold</b> world</p>"#;
        assert!(matches!(
            try_update_element_text(source, "p", "x", None),
            Err(EditError::AmbiguousText(_))
        ));
        assert_eq!(
            update_element_text(source, "p", "there", Some("world")),
            r#"<p data-eid="p">Hello <b>bold</b> there</p>"#
        );
    }

    #[test]
    fn test_anchor_inside_child_is_not_replaced() {
        let source = r#"<p data-eid="p">Hello <b>bold</b></p>"#;
        assert_eq!(update_element_text(source, "p", "x", Some("bold")), source);
    }

    #[test]
    fn test_expression_counts_as_nested() {
        let source = r#"<p data-eid="p">{count} items</p>"#;
        assert_eq!(update_element_text(source, "p", "none", None), source);
        assert_eq!(
            update_element_text(source, "p", "things", Some("items")),
            r#"<p data-eid="p">{count} things</p>"#
        );
    }

    #[test]
    fn test_new_text_is_escaped() {
        let source = r#"<p data-eid="p">a</p>"#;
        assert_eq!(
            update_element_text(source, "p", "<b>{x}</b> & y", None),
            r#"<p data-eid="p">&lt;b&gt;&#123;x&#125;&lt;/b&gt; &amp; y</p>"#
        );
    }

    #[test]
    fn test_self_closing_and_missing() {
        let source = r#"<img data-eid="i" />"#;
        assert_eq!(
            try_update_element_text(source, "i", "x", None),
            Err(EditError::SelfClosing("i".to_string()))
        );
        assert_eq!(
            try_update_element_text(source, "nope", "x", None),
            Err(EditError::NotFound("nope".to_string()))
        );
    }
}
