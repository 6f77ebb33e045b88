//! # Nested-Content Balancer
//!
//! Finds the closing tag that matches an opening tag, counting same-named
//! descendants so `<div><div></div></div>` closes at the outer `</div>`.
//!
//! Expression blocks in content are skipped whole, so markup written inside
//! `{cond ? <div> : null}` never moves the depth counter. HTML comments are
//! skipped the same way.

use crate::lexer::skip_block;
use crate::tag::{scan_close_tag, scan_open_tag, skip_declaration};

/// Return the offset just past the `</tag>` matching an opening tag whose `>`
/// ends at `from`. An empty `tag` balances a fragment (`<>` ... `</>`).
///
/// Returns `None` when the text runs out before the depth returns to zero or
/// when an expression block in the content is never closed.
pub fn find_closing(src: &[u8], from: usize, tag: &str) -> Option<usize> {
    let name = tag.as_bytes();
    let mut depth = 1usize;
    let mut i = from;

    while i < src.len() {
        match src[i] {
            b'{' => i = skip_block(src, i)?,
            b'<' => match src.get(i + 1) {
                Some(b'/') => match scan_close_tag(src, i) {
                    Some(close) => {
                        if close.name_bytes(src) == name {
                            if depth == 1 {
                                return Some(close.end);
                            }
                            depth -= 1;
                        }
                        i = close.end;
                    }
                    None => i += 1,
                },
                Some(b'!') => i = skip_declaration(src, i)?,
                Some(b'>') => {
                    if name.is_empty() {
                        depth += 1;
                    }
                    i += 2;
                }
                _ => match scan_open_tag(src, i) {
                    Some(open) => {
                        if open.name_bytes(src) == name && !open.closes_itself(src) {
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

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close_after_first_tag(src: &str, tag: &str) -> Option<usize> {
        let open_end = src.find('>')? + 1;
        find_closing(src.as_bytes(), open_end, tag)
    }

    #[test]
    fn test_simple_close() {
        let src = "<p>hello</p> tail";
        assert_eq!(close_after_first_tag(src, "p"), Some(12));
    }

    #[test]
    fn test_nested_same_tag() {
        let src = "<div><div>x</div><div>y</div></div>!";
        assert_eq!(close_after_first_tag(src, "div"), Some(src.len() - 1));
    }

    #[test]
    fn test_self_closing_same_tag_does_not_nest() {
        let src = "<div><div /><br><div/></div>";
        assert_eq!(close_after_first_tag(src, "div"), Some(src.len()));
    }

    #[test]
    fn test_expression_content_is_skipped() {
        let src = "<div>{cond ? <div>X</div> : `</div>`}</div>.";
        assert_eq!(close_after_first_tag(src, "div"), Some(src.len() - 1));
    }

    #[test]
    fn test_comment_content_is_skipped() {
        let src = "<div><!-- </div> --></div>";
        assert_eq!(close_after_first_tag(src, "div"), Some(src.len()));
    }

    #[test]
    fn test_apostrophe_in_text_is_plain_text() {
        let src = "<p>Don't panic</p>";
        assert_eq!(close_after_first_tag(src, "p"), Some(src.len()));
    }

    #[test]
    fn test_fragment_balancing() {
        let src = "<><>a</>b</>c";
        assert_eq!(find_closing(src.as_bytes(), 2, ""), Some(src.len() - 1));
    }

    #[test]
    fn test_unclosed_returns_none() {
        assert_eq!(close_after_first_tag("<div><div></div>", "div"), None);
        assert_eq!(close_after_first_tag("<div>{open</div>", "div"), None);
    }
}
