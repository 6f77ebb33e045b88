//! # Lexical Skippers
//!
//! Primitive scanners that step over a string literal, a template literal or a
//! brace-delimited expression block as a single unit.
//!
//! Every skipper starts on the opening delimiter and returns the index just
//! past the matching close. `None` means the delimiter is never closed before
//! the end of the text; callers treat that as "boundary not found" and abort.
//!
//! All delimiters are ASCII, so scanning bytes never splits a UTF-8 sequence
//! and every returned index is a valid `str` boundary.

use crate::balancer::find_closing;
use crate::tag::scan_open_tag;

/// Skip a `'...'` or `"..."` literal. A backslash escapes exactly one byte.
pub fn skip_string(src: &[u8], start: usize) -> Option<usize> {
    let quote = *src.get(start)?;
    let mut i = start + 1;

    while i < src.len() {
        match src[i] {
            b'\\' => i += 2,
            c if c == quote => return Some(i + 1),
            _ => i += 1,
        }
    }

    None
}

/// Skip a `` `...` `` literal, including any `${...}` blocks it embeds.
pub fn skip_template(src: &[u8], start: usize) -> Option<usize> {
    if src.get(start) != Some(&b'`') {
        return None;
    }

    let mut i = start + 1;
    while i < src.len() {
        match src[i] {
            b'\\' => i += 2,
            b'`' => return Some(i + 1),
            b'$' if src.get(i + 1) == Some(&b'{') => i = skip_block(src, i + 1)?,
            _ => i += 1,
        }
    }

    None
}

/// Skip a `{...}` block with arbitrary nesting.
///
/// Strings, templates and nested blocks inside are skipped recursively, so a
/// `}` inside a literal never closes the block. Markup elements written inside
/// the block (`{cond && <p>Don't</p>}`) are stepped over as whole elements, so
/// apostrophes in their text are not mistaken for string quotes.
pub fn skip_block(src: &[u8], start: usize) -> Option<usize> {
    if src.get(start) != Some(&b'{') {
        return None;
    }

    let mut depth = 0usize;
    let mut i = start;

    while i < src.len() {
        match src[i] {
            b'{' => {
                depth += 1;
                i += 1;
            }
            b'}' => {
                depth -= 1;
                i += 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            b'"' | b'\'' => i = skip_string(src, i)?,
            b'`' => i = skip_template(src, i)?,
            b'<' => i = skip_element(src, i).unwrap_or(i + 1),
            _ => i += 1,
        }
    }

    None
}

/// Skip whichever delimited unit starts at `start`.
pub fn skip_delimited(src: &[u8], start: usize) -> Option<usize> {
    match src.get(start)? {
        b'"' | b'\'' => skip_string(src, start),
        b'`' => skip_template(src, start),
        b'{' => skip_block(src, start),
        _ => None,
    }
}

/// Skip a whole element (opening tag, content and closing tag) or a fragment.
///
/// Returns `None` when `start` is not an element start or the element is never
/// closed; the caller then falls back to scanning byte by byte.
pub(crate) fn skip_element(src: &[u8], start: usize) -> Option<usize> {
    if src.get(start + 1) == Some(&b'>') {
        return find_closing(src, start + 2, "");
    }

    let open = scan_open_tag(src, start)?;
    if open.closes_itself(src) {
        return Some(open.end);
    }

    let name = std::str::from_utf8(open.name_bytes(src)).ok()?;
    find_closing(src, open.end, name)
}
