//! # Attribute & Class Editor
//!
//! Reads and rewrites the class attribute, arbitrary named attributes and
//! inline style declarations on one opening tag.
//!
//! Only literal values are ever rewritten. A value bound to an expression is
//! refused with [`EditError::DynamicBinding`]: dropping runtime data is worse
//! than a missed edit.

use std::borrow::Cow;

use crate::encoding::{AttributeValue, ValueEncoding};
use crate::errors::{or_unchanged, EditError, EditResult};
use crate::locator::locate_open_tag;
use crate::marker::MARKER_ATTRIBUTE;
use crate::splice::splice;
use crate::tag::{attributes, OpenTag, RawAttribute};

/// Class forms in the order they are read.
const CLASS_READ_ORDER: [(&str, ValueEncoding); 8] = [
    ("class", ValueEncoding::DoubleQuoted),
    ("class", ValueEncoding::SingleQuoted),
    ("class", ValueEncoding::Unquoted),
    ("className", ValueEncoding::DoubleQuoted),
    ("className", ValueEncoding::SingleQuoted),
    ("className", ValueEncoding::BracedDouble),
    ("className", ValueEncoding::BracedSingle),
    ("className", ValueEncoding::BracedTemplate),
];

/// Class forms in the order they are rewritten.
const CLASS_WRITE_ORDER: [(&str, ValueEncoding); 8] = [
    ("className", ValueEncoding::DoubleQuoted),
    ("className", ValueEncoding::BracedSingle),
    ("className", ValueEncoding::BracedTemplate),
    ("className", ValueEncoding::BracedDouble),
    ("class", ValueEncoding::DoubleQuoted),
    ("class", ValueEncoding::SingleQuoted),
    ("className", ValueEncoding::SingleQuoted),
    ("class", ValueEncoding::Unquoted),
];

const CLASS_NAMES: [&str; 2] = ["class", "className"];

/// Opening tag of one element together with its attributes.
struct TagEditor<'a> {
    source: &'a str,
    id: &'a str,
    tag: OpenTag,
    attrs: Vec<RawAttribute>,
}

impl<'a> TagEditor<'a> {
    fn open(source: &'a str, id: &'a str) -> EditResult<Self> {
        let tag = locate_open_tag(source, id).ok_or_else(|| EditError::NotFound(id.to_string()))?;
        let attrs = attributes(source.as_bytes(), &tag);
        Ok(Self {
            source,
            id,
            tag,
            attrs,
        })
    }

    fn find(&self, name: &str) -> Option<&RawAttribute> {
        self.attrs.iter().find(|a| a.name(self.source) == name)
    }

    fn value(&self, attr: &RawAttribute) -> AttributeValue<'a> {
        AttributeValue::classify(attr.raw_value(self.source))
    }

    fn class_attrs(&self) -> impl Iterator<Item = &RawAttribute> + '_ {
        self.attrs
            .iter()
            .filter(|a| CLASS_NAMES.contains(&a.name(self.source)))
    }

    fn literal_in(&self, order: &[(&str, ValueEncoding)]) -> Option<(RawAttribute, &'a str)> {
        order.iter().find_map(|(name, wanted)| {
            self.attrs
                .iter()
                .filter(|a| a.name(self.source) == *name)
                .find_map(|a| match self.value(a) {
                    AttributeValue::Literal { encoding, text } if encoding == *wanted => {
                        Some((*a, text))
                    }
                    _ => None,
                })
        })
    }

    /// Current class value; `Err` when the only class attributes are dynamic.
    fn classes(&self) -> EditResult<Option<&'a str>> {
        match self.literal_in(&CLASS_READ_ORDER) {
            Some((_, text)) => Ok(Some(text)),
            None => match self.class_attrs().next() {
                Some(attr) => Err(EditError::dynamic_binding(self.id, attr.name(self.source))),
                None => Ok(None),
            },
        }
    }

    /// Insert ` text` right after the marker attribute, or before `>`/`/>`
    /// when the marker cannot be found among the attributes.
    fn insert(&self, text: &str) -> String {
        let at = self
            .find(MARKER_ATTRIBUTE)
            .map(|marker| marker.end)
            .unwrap_or_else(|| self.tag.attributes_end(self.source.as_bytes()));
        splice(self.source, at..at, &format!(" {text}"))
    }

    /// Remove an attribute along with the whitespace in front of it.
    fn remove(&self, attr: &RawAttribute) -> String {
        let bytes = self.source.as_bytes();
        let mut start = attr.start;
        while start > self.tag.name_end && bytes[start - 1].is_ascii_whitespace() {
            start -= 1;
        }
        splice(self.source, start..attr.end, "")
    }

    fn replace_value(&self, attr: &RawAttribute, formatted: &str) -> String {
        match attr.value {
            Some((start, end)) => splice(self.source, start..end, formatted),
            None => splice(self.source, attr.name_end..attr.name_end, &format!("={formatted}")),
        }
    }
}

/// Class attribute name to use when a tag has none yet.
fn class_attribute_name(source: &str, tag: &str) -> &'static str {
    let component = tag.as_bytes().first().is_some_and(u8::is_ascii_uppercase);
    if component || source.contains("className=") {
        "className"
    } else {
        "class"
    }
}

fn valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            !b.is_ascii_whitespace()
                && !matches!(b, b'"' | b'\'' | b'`' | b'=' | b'<' | b'>' | b'/' | b'{' | b'}')
        })
}

/// Literal class value of an opening tag, in read priority order.
pub(crate) fn read_class_value<'a>(source: &'a str, tag: &OpenTag) -> Option<&'a str> {
    let attrs = attributes(source.as_bytes(), tag);
    let editor = TagEditor {
        source,
        id: "",
        tag: *tag,
        attrs,
    };
    editor.literal_in(&CLASS_READ_ORDER).map(|(_, text)| text)
}

/// Current literal class value of an element.
pub fn read_classes<'a>(source: &'a str, id: &str) -> Option<&'a str> {
    let tag = locate_open_tag(source, id)?;
    read_class_value(source, &tag)
}

pub fn try_update_element_classes(source: &str, id: &str, classes: &str) -> EditResult<String> {
    let editor = TagEditor::open(source, id)?;

    if let Some((attr, _)) = editor.literal_in(&CLASS_WRITE_ORDER) {
        return Ok(editor.replace_value(&attr, &ValueEncoding::DoubleQuoted.format(classes)));
    }
    if let Some(attr) = editor.class_attrs().next() {
        return Err(EditError::dynamic_binding(id, attr.name(source)));
    }

    let name = class_attribute_name(source, editor.tag.name(source));
    Ok(editor.insert(&format!("{name}={}", ValueEncoding::DoubleQuoted.format(classes))))
}

/// Replace the whole class value, normalizing it to a double-quoted literal.
pub fn update_element_classes<'a>(source: &'a str, id: &str, classes: &str) -> Cow<'a, str> {
    or_unchanged(source, try_update_element_classes(source, id, classes))
}

pub fn try_add_class(source: &str, id: &str, class_name: &str) -> EditResult<String> {
    let editor = TagEditor::open(source, id)?;
    let current = editor.classes()?.unwrap_or_default();

    let present = |class: &str| current.split_whitespace().any(|c| c == class);
    if class_name.split_whitespace().all(present) {
        return Ok(source.to_string());
    }

    let mut classes: Vec<&str> = Vec::new();
    for class in current.split_whitespace().chain(class_name.split_whitespace()) {
        if !classes.contains(&class) {
            classes.push(class);
        }
    }
    try_update_element_classes(source, id, &classes.join(" "))
}

/// Add one class (or several, whitespace separated); already present is a no-op.
pub fn add_class<'a>(source: &'a str, id: &str, class_name: &str) -> Cow<'a, str> {
    or_unchanged(source, try_add_class(source, id, class_name))
}

pub fn try_remove_class(source: &str, id: &str, class_name: &str) -> EditResult<String> {
    let editor = TagEditor::open(source, id)?;
    let Some(current) = editor.classes()? else {
        return Ok(source.to_string());
    };

    let removed: Vec<&str> = class_name.split_whitespace().collect();
    if !current.split_whitespace().any(|c| removed.contains(&c)) {
        return Ok(source.to_string());
    }

    let mut classes: Vec<&str> = Vec::new();
    for class in current.split_whitespace() {
        if !removed.contains(&class) && !classes.contains(&class) {
            classes.push(class);
        }
    }
    try_update_element_classes(source, id, &classes.join(" "))
}

pub fn remove_class<'a>(source: &'a str, id: &str, class_name: &str) -> Cow<'a, str> {
    or_unchanged(source, try_remove_class(source, id, class_name))
}

/// Classified value of a named attribute, `None` if the attribute is absent.
pub fn read_element_attribute<'a>(
    source: &'a str,
    id: &str,
    name: &str,
) -> Option<AttributeValue<'a>> {
    let tag = locate_open_tag(source, id)?;
    attributes(source.as_bytes(), &tag)
        .iter()
        .find(|a| a.name(source) == name)
        .map(|a| AttributeValue::classify(a.raw_value(source)))
}

pub fn try_update_element_attribute(
    source: &str,
    id: &str,
    name: &str,
    value: &str,
) -> EditResult<String> {
    if name == MARKER_ATTRIBUTE {
        return Err(EditError::ReservedAttribute(name.to_string()));
    }
    if !valid_attribute_name(name) {
        return Err(EditError::InvalidAttributeName(name.to_string()));
    }

    let editor = TagEditor::open(source, id)?;
    let Some(attr) = editor.find(name) else {
        return Ok(editor.insert(&format!("{name}={}", ValueEncoding::DoubleQuoted.format(value))));
    };

    match editor.value(attr) {
        AttributeValue::Literal { encoding, .. } => {
            Ok(editor.replace_value(attr, &encoding.format(value)))
        }
        AttributeValue::Boolean => {
            Ok(editor.replace_value(attr, &ValueEncoding::DoubleQuoted.format(value)))
        }
        AttributeValue::Dynamic(_) => Err(EditError::dynamic_binding(id, name)),
    }
}

/// Set a literal attribute value, keeping its existing encoding.
///
/// Leaves the document unchanged when the attribute is bound to an expression.
pub fn update_element_attribute<'a>(
    source: &'a str,
    id: &str,
    name: &str,
    value: &str,
) -> Cow<'a, str> {
    or_unchanged(source, try_update_element_attribute(source, id, name, value))
}

pub fn try_remove_element_attribute(source: &str, id: &str, name: &str) -> EditResult<String> {
    if name == MARKER_ATTRIBUTE {
        return Err(EditError::ReservedAttribute(name.to_string()));
    }

    let editor = TagEditor::open(source, id)?;
    let Some(attr) = editor.find(name) else {
        return Ok(source.to_string());
    };

    match editor.value(attr) {
        AttributeValue::Dynamic(_) => Err(EditError::dynamic_binding(id, name)),
        _ => Ok(editor.remove(attr)),
    }
}

pub fn remove_element_attribute<'a>(source: &'a str, id: &str, name: &str) -> Cow<'a, str> {
    or_unchanged(source, try_remove_element_attribute(source, id, name))
}

/// One `property: value` entry of an inline style.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Declaration<'a> {
    Property { name: &'a str, value: &'a str },
    /// A piece without a colon, kept verbatim
    Raw(&'a str),
}

impl Declaration<'_> {
    fn is(&self, property: &str) -> bool {
        matches!(self, Declaration::Property { name, .. } if name.eq_ignore_ascii_case(property))
    }
}

fn parse_declarations(style: &str) -> Vec<Declaration<'_>> {
    style
        .split(';')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(|piece| match piece.split_once(':') {
            Some((name, value)) => Declaration::Property {
                name: name.trim(),
                value: value.trim(),
            },
            None => Declaration::Raw(piece),
        })
        .collect()
}

fn format_declarations(declarations: &[Declaration<'_>], trailing_semicolon: bool) -> String {
    let mut out = declarations
        .iter()
        .map(|declaration| match declaration {
            Declaration::Property { name, value } => format!("{name}: {value}"),
            Declaration::Raw(raw) => raw.to_string(),
        })
        .collect::<Vec<_>>()
        .join("; ");
    if trailing_semicolon && !out.is_empty() {
        out.push(';');
    }
    out
}

fn valid_style_property(property: &str) -> bool {
    !property.is_empty()
        && property
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

pub fn try_set_inline_style_property(
    source: &str,
    id: &str,
    property: &str,
    value: &str,
) -> EditResult<String> {
    let property = property.trim();
    if !valid_style_property(property) {
        return Err(EditError::InvalidStyleProperty(property.to_string()));
    }
    let value = value.trim().trim_end_matches(';');

    let editor = TagEditor::open(source, id)?;
    let Some(attr) = editor.find("style") else {
        let style = format!("{property}: {value}");
        return Ok(editor.insert(&format!("style={}", ValueEncoding::DoubleQuoted.format(&style))));
    };

    let (encoding, current) = match editor.value(attr) {
        AttributeValue::Literal { encoding, text } => (encoding, text),
        AttributeValue::Boolean => (ValueEncoding::DoubleQuoted, ""),
        AttributeValue::Dynamic(_) => return Err(EditError::dynamic_binding(id, "style")),
    };

    let mut declarations = parse_declarations(current);
    match declarations.iter_mut().find(|d| d.is(property)) {
        Some(Declaration::Property { value: old, .. }) => *old = value,
        _ => declarations.push(Declaration::Property {
            name: property,
            value,
        }),
    }

    let style = format_declarations(&declarations, current.trim_end().ends_with(';'));
    Ok(editor.replace_value(attr, &encoding.format(&style)))
}

/// Set one declaration of a literal `style` attribute, keeping the others in order.
pub fn set_inline_style_property<'a>(
    source: &'a str,
    id: &str,
    property: &str,
    value: &str,
) -> Cow<'a, str> {
    or_unchanged(source, try_set_inline_style_property(source, id, property, value))
}

pub fn try_remove_inline_style_property(
    source: &str,
    id: &str,
    property: &str,
) -> EditResult<String> {
    let property = property.trim();
    let editor = TagEditor::open(source, id)?;
    let Some(attr) = editor.find("style") else {
        return Ok(source.to_string());
    };

    let (encoding, current) = match editor.value(attr) {
        AttributeValue::Literal { encoding, text } => (encoding, text),
        AttributeValue::Boolean => return Ok(source.to_string()),
        AttributeValue::Dynamic(_) => return Err(EditError::dynamic_binding(id, "style")),
    };

    let mut declarations = parse_declarations(current);
    let before = declarations.len();
    declarations.retain(|d| !d.is(property));
    if declarations.len() == before {
        return Ok(source.to_string());
    }

    if declarations.is_empty() {
        return Ok(editor.remove(attr));
    }
    let style = format_declarations(&declarations, current.trim_end().ends_with(';'));
    Ok(editor.replace_value(attr, &encoding.format(&style)))
}

/// Drop one declaration; the `style` attribute goes away when it empties.
pub fn remove_inline_style_property<'a>(source: &'a str, id: &str, property: &str) -> Cow<'a, str> {
    or_unchanged(source, try_remove_inline_style_property(source, id, property))
}
