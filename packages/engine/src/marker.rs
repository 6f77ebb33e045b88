//! The element marker attribute (`data-eid="<id>"`).
//!
//! Markers are injected and stripped outside the engine; here they are only
//! searched for.

/// Attribute carrying the stable element identifier
pub const MARKER_ATTRIBUTE: &str = "data-eid";

const MARKER_PREFIX: &str = "data-eid=\"";

/// One `data-eid="..."` occurrence in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker<'a> {
    /// Offset of the `d` in `data-eid`
    pub offset: usize,
    pub id: &'a str,
}

/// An occurrence only counts when it starts a fresh attribute.
fn at_attribute_boundary(source: &str, offset: usize) -> bool {
    offset > 0 && source.as_bytes()[offset - 1].is_ascii_whitespace()
}

/// Offsets of every exact `data-eid="<id>"` occurrence.
pub fn find_marker(source: &str, id: &str) -> Vec<usize> {
    let needle = format!("{MARKER_PREFIX}{id}\"");
    source
        .match_indices(&needle)
        .map(|(offset, _)| offset)
        .filter(|&offset| at_attribute_boundary(source, offset))
        .collect()
}

/// Every marker occurrence in `range`, in document order.
pub fn markers_in(source: &str, range: std::ops::Range<usize>) -> Vec<Marker<'_>> {
    let window = &source[range.clone()];
    let mut out = Vec::new();

    for (relative, _) in window.match_indices(MARKER_PREFIX) {
        let offset = range.start + relative;
        if !at_attribute_boundary(source, offset) {
            continue;
        }

        let id_start = offset + MARKER_PREFIX.len();
        if let Some(len) = source[id_start..].find('"') {
            out.push(Marker {
                offset,
                id: &source[id_start..id_start + len],
            });
        }
    }

    out
}
