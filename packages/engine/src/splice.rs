//! Small text helpers shared by the editing operations.

use std::ops::Range;

/// Copy of `source` with `range` replaced by `text`.
pub fn splice(source: &str, range: Range<usize>, text: &str) -> String {
    let mut out = String::with_capacity(source.len() - range.len() + text.len());
    out.push_str(&source[..range.start]);
    out.push_str(text);
    out.push_str(&source[range.end..]);
    out
}

/// Offset of the first byte of the line containing `pos`.
pub fn line_start(source: &str, pos: usize) -> usize {
    source[..pos].rfind('\n').map_or(0, |nl| nl + 1)
}

/// Leading spaces and tabs of the line containing `pos`.
pub fn line_indent(source: &str, pos: usize) -> &str {
    let start = line_start(source, pos);
    let width = source[start..]
        .bytes()
        .take_while(|&b| b == b' ' || b == b'\t')
        .count();
    &source[start..start + width]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splice() {
        assert_eq!(splice("hello world", 6..11, "there"), "hello there");
        assert_eq!(splice("ab", 1..1, "-"), "a-b");
    }

    #[test]
    fn test_line_indent() {
        let source = "<ul>\n    <li>a</li>\n\t<li>b</li>";
        let li = source.find("<li>a").unwrap();
        assert_eq!(line_indent(source, li), "    ");
        let tab = source.find("<li>b").unwrap();
        assert_eq!(line_indent(source, tab), "\t");
        assert_eq!(line_indent(source, 2), "");
    }
}
