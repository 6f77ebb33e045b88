//! Tag scanning shared by the locator, the balancer and the attribute editor.

use crate::lexer::{skip_block, skip_string, skip_template};

/// HTML elements that never have content or a closing tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

pub fn is_void_element(name: &[u8]) -> bool {
    VOID_ELEMENTS.iter().any(|void| void.as_bytes() == name)
}

/// Identifier-and-dot characters allowed in a tag name (`div`, `Card.Header`, `my-tag`).
fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.' | b':' | b'$')
}

fn read_name(src: &[u8], start: usize) -> usize {
    let mut i = start;
    while i < src.len() && is_name_byte(src[i]) {
        i += 1;
    }
    i
}

/// Byte offsets of one opening tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenTag {
    /// Offset of `<`
    pub start: usize,
    /// Offset just past the tag name
    pub name_end: usize,
    /// Offset just past `>` or `/>`
    pub end: usize,
    /// Written as `<name ... />`
    pub self_closing: bool,
}

impl OpenTag {
    pub fn name_bytes<'a>(&self, src: &'a [u8]) -> &'a [u8] {
        &src[self.start + 1..self.name_end]
    }

    pub fn name<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start + 1..self.name_end]
    }

    /// Self-closing syntax or an HTML void element.
    pub fn closes_itself(&self, src: &[u8]) -> bool {
        self.self_closing || is_void_element(self.name_bytes(src))
    }

    /// Offset of the `>` or `/>` that ends the tag, with preceding whitespace excluded.
    pub fn attributes_end(&self, src: &[u8]) -> usize {
        let mut at = self.end - if self.self_closing { 2 } else { 1 };
        while at > self.name_end && src[at - 1].is_ascii_whitespace() {
            at -= 1;
        }
        at
    }
}

/// Scan the opening tag starting at the `<` at `start`.
///
/// Quoted, template and braced attribute values are skipped as units, so a `>`
/// inside `onClick={() => go()}` does not end the tag. Returns `None` if
/// `start` is not a tag start or the tag never ends.
pub fn scan_open_tag(src: &[u8], start: usize) -> Option<OpenTag> {
    if src.get(start) != Some(&b'<') || !src.get(start + 1)?.is_ascii_alphabetic() {
        return None;
    }

    let name_end = read_name(src, start + 1);
    let mut i = name_end;

    while i < src.len() {
        match src[i] {
            b'"' | b'\'' => i = skip_string(src, i)?,
            b'`' => i = skip_template(src, i)?,
            b'{' => i = skip_block(src, i)?,
            b'/' if src.get(i + 1) == Some(&b'>') => {
                return Some(OpenTag {
                    start,
                    name_end,
                    end: i + 2,
                    self_closing: true,
                });
            }
            b'>' => {
                return Some(OpenTag {
                    start,
                    name_end,
                    end: i + 1,
                    self_closing: false,
                });
            }
            // A bare `<` cannot appear inside a tag: this was a comparison, not markup
            b'<' => return None,
            _ => i += 1,
        }
    }

    None
}

/// Byte offsets of one closing tag `</name>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseTag {
    pub name_start: usize,
    pub name_end: usize,
    /// Offset just past `>`
    pub end: usize,
}

impl CloseTag {
    pub fn name_bytes<'a>(&self, src: &'a [u8]) -> &'a [u8] {
        &src[self.name_start..self.name_end]
    }
}

/// Scan `</name>` (or the fragment close `</>`) starting at `start`.
pub fn scan_close_tag(src: &[u8], start: usize) -> Option<CloseTag> {
    if src.get(start) != Some(&b'<') || src.get(start + 1) != Some(&b'/') {
        return None;
    }

    let name_start = start + 2;
    let name_end = read_name(src, name_start);
    let mut i = name_end;
    while i < src.len() && src[i].is_ascii_whitespace() {
        i += 1;
    }

    (src.get(i) == Some(&b'>')).then_some(CloseTag {
        name_start,
        name_end,
        end: i + 1,
    })
}

/// Skip `<!-- ... -->` or a `<!...>` declaration starting at `start`.
pub fn skip_declaration(src: &[u8], start: usize) -> Option<usize> {
    if src.get(start) != Some(&b'<') || src.get(start + 1) != Some(&b'!') {
        return None;
    }

    if src[start..].starts_with(b"<!--") {
        let body = start + 4;
        return src[body..]
            .windows(3)
            .position(|w| w == b"-->")
            .map(|offset| body + offset + 3);
    }

    src[start..]
        .iter()
        .position(|&b| b == b'>')
        .map(|offset| start + offset + 1)
}

/// One attribute inside an opening tag. All offsets are absolute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawAttribute {
    pub start: usize,
    pub name_end: usize,
    /// Range of the raw value, delimiters included (`"x"`, `{expr}`)
    pub value: Option<(usize, usize)>,
    pub end: usize,
}

impl RawAttribute {
    pub fn name<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.name_end]
    }

    pub fn raw_value<'a>(&self, source: &'a str) -> Option<&'a str> {
        self.value.map(|(start, end)| &source[start..end])
    }
}

/// Split an opening tag into its attributes, in source order.
///
/// Spread attributes (`{...props}`) are skipped and not reported.
pub fn attributes(src: &[u8], tag: &OpenTag) -> Vec<RawAttribute> {
    let limit = tag.end - if tag.self_closing { 2 } else { 1 };
    let mut out = Vec::new();
    let mut i = tag.name_end;

    while i < limit {
        let b = src[i];
        if b.is_ascii_whitespace() || b == b'/' {
            i += 1;
            continue;
        }
        if b == b'{' {
            match skip_block(src, i) {
                Some(next) => {
                    i = next;
                    continue;
                }
                None => break,
            }
        }

        let start = i;
        while i < limit
            && !src[i].is_ascii_whitespace()
            && !matches!(src[i], b'=' | b'/' | b'{' | b'"' | b'\'' | b'`')
        {
            i += 1;
        }
        if i == start {
            // stray `=` or quote
            i += 1;
            continue;
        }
        let name_end = i;

        let mut j = name_end;
        while j < limit && src[j].is_ascii_whitespace() {
            j += 1;
        }

        if j < limit && src[j] == b'=' {
            j += 1;
            while j < limit && src[j].is_ascii_whitespace() {
                j += 1;
            }

            let value_end = match src[j] {
                b'"' | b'\'' => skip_string(src, j),
                b'`' => skip_template(src, j),
                b'{' => skip_block(src, j),
                _ => {
                    let mut k = j;
                    while k < limit && !src[k].is_ascii_whitespace() {
                        k += 1;
                    }
                    Some(k)
                }
            };
            let Some(value_end) = value_end else { break };
            let value_end = value_end.min(limit);

            out.push(RawAttribute {
                start,
                name_end,
                value: Some((j, value_end)),
                end: value_end,
            });
            i = value_end;
        } else {
            out.push(RawAttribute {
                start,
                name_end,
                value: None,
                end: name_end,
            });
        }
    }

    out
}
