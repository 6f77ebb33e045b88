//! # Attribute Value Encodings
//!
//! One logical attribute value can be written several ways:
//!
//! ```text
//! name="value"      DoubleQuoted
//! name='value'      SingleQuoted
//! name=value        Unquoted
//! name={"value"}    BracedDouble
//! name={'value'}    BracedSingle
//! name={`value`}    BracedTemplate (no ${} interpolation)
//! ```
//!
//! Anything else inside braces (`{url}`, `{cn(a, b)}`, `` {`a ${b}`} ``) is a
//! dynamic binding and is never rewritten.

use serde::Serialize;

use crate::lexer::{skip_string, skip_template};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ValueEncoding {
    DoubleQuoted,
    SingleQuoted,
    Unquoted,
    BracedDouble,
    BracedSingle,
    BracedTemplate,
}

/// Classified value of one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeValue<'a> {
    /// A fixed string; `text` is the raw content between the delimiters
    Literal {
        encoding: ValueEncoding,
        text: &'a str,
    },
    /// A non-literal expression, raw text including braces
    Dynamic(&'a str),
    /// Present without a value (`disabled`)
    Boolean,
}

impl<'a> AttributeValue<'a> {
    pub fn classify(raw: Option<&'a str>) -> Self {
        match raw {
            None => AttributeValue::Boolean,
            Some(raw) => match ValueEncoding::parse(raw) {
                Some((encoding, text)) => AttributeValue::Literal { encoding, text },
                None => AttributeValue::Dynamic(raw),
            },
        }
    }

    pub fn literal(&self) -> Option<&'a str> {
        match self {
            AttributeValue::Literal { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// `raw` is exactly one quoted literal spanning the whole text.
fn whole_literal(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    match bytes.first() {
        Some(b'"' | b'\'') => skip_string(bytes, 0) == Some(bytes.len()),
        Some(b'`') => skip_template(bytes, 0) == Some(bytes.len()) && !raw.contains("${"),
        _ => false,
    }
}

impl ValueEncoding {
    /// Classify a raw attribute value (delimiters included).
    ///
    /// Returns the encoding and the literal text between the delimiters, or
    /// `None` when the value is a dynamic binding.
    pub fn parse(raw: &str) -> Option<(ValueEncoding, &str)> {
        let first = *raw.as_bytes().first()?;

        match first {
            b'"' | b'\'' => {
                if !whole_literal(raw) {
                    return None;
                }
                let encoding = if first == b'"' {
                    ValueEncoding::DoubleQuoted
                } else {
                    ValueEncoding::SingleQuoted
                };
                Some((encoding, &raw[1..raw.len() - 1]))
            }
            b'{' => {
                let inner = raw.strip_prefix('{')?.strip_suffix('}')?.trim();
                if !whole_literal(inner) {
                    return None;
                }
                let encoding = match inner.as_bytes()[0] {
                    b'"' => ValueEncoding::BracedDouble,
                    b'\'' => ValueEncoding::BracedSingle,
                    _ => ValueEncoding::BracedTemplate,
                };
                Some((encoding, &inner[1..inner.len() - 1]))
            }
            b'`' => None,
            _ => Some((ValueEncoding::Unquoted, raw)),
        }
    }

    /// Render `value` in this encoding, escaping whatever would end it early.
    ///
    /// A quoted value holding only the other quote kind switches delimiters
    /// instead; character references are used when both kinds appear.
    pub fn format(self, value: &str) -> String {
        match self {
            ValueEncoding::DoubleQuoted if value.contains('"') && !value.contains('\'') => {
                format!("'{value}'")
            }
            ValueEncoding::DoubleQuoted => format!("\"{}\"", value.replace('"', "&quot;")),
            ValueEncoding::SingleQuoted if value.contains('\'') && !value.contains('"') => {
                format!("\"{value}\"")
            }
            ValueEncoding::SingleQuoted => format!("'{}'", value.replace('\'', "&#39;")),
            ValueEncoding::Unquoted => {
                let bare = !value.is_empty()
                    && value.bytes().all(|b| {
                        !b.is_ascii_whitespace()
                            && !matches!(b, b'"' | b'\'' | b'`' | b'=' | b'<' | b'>' | b'{' | b'}' | b'/')
                    });
                if bare {
                    value.to_string()
                } else {
                    ValueEncoding::DoubleQuoted.format(value)
                }
            }
            ValueEncoding::BracedDouble => {
                format!("{{\"{}\"}}", value.replace('\\', "\\\\").replace('"', "\\\""))
            }
            ValueEncoding::BracedSingle => {
                format!("{{'{}'}}", value.replace('\\', "\\\\").replace('\'', "\\'"))
            }
            ValueEncoding::BracedTemplate => format!(
                "{{`{}`}}",
                value
                    .replace('\\', "\\\\")
                    .replace('`', "\\`")
                    .replace("${", "\\${")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literal_forms() {
        assert_eq!(
            ValueEncoding::parse("\"a b\""),
            Some((ValueEncoding::DoubleQuoted, "a b"))
        );
        assert_eq!(
            ValueEncoding::parse("'a'"),
            Some((ValueEncoding::SingleQuoted, "a"))
        );
        assert_eq!(
            ValueEncoding::parse("{ \"a\" }"),
            Some((ValueEncoding::BracedDouble, "a"))
        );
        assert_eq!(
            ValueEncoding::parse("{'a'}"),
            Some((ValueEncoding::BracedSingle, "a"))
        );
        assert_eq!(
            ValueEncoding::parse("{`a b`}"),
            Some((ValueEncoding::BracedTemplate, "a b"))
        );
        assert_eq!(
            ValueEncoding::parse("100"),
            Some((ValueEncoding::Unquoted, "100"))
        );
    }

    #[test]
    fn test_parse_dynamic_bindings() {
        assert_eq!(ValueEncoding::parse("{imageUrl}"), None);
        assert_eq!(ValueEncoding::parse("{cn('a', b)}"), None);
        assert_eq!(ValueEncoding::parse("{`a ${b}`}"), None);
        assert_eq!(ValueEncoding::parse("{'a' + b}"), None);
        assert_eq!(ValueEncoding::parse("{{ color: 'red' }}"), None);
    }

    #[test]
    fn test_classify() {
        assert_eq!(AttributeValue::classify(None), AttributeValue::Boolean);
        assert_eq!(
            AttributeValue::classify(Some("{x}")),
            AttributeValue::Dynamic("{x}")
        );
        assert_eq!(AttributeValue::classify(Some("'x'")).literal(), Some("x"));
    }

    #[test]
    fn test_format_escapes_delimiters() {
        assert_eq!(ValueEncoding::DoubleQuoted.format("it's \"hi\""), "\"it's &quot;hi&quot;\"");
        assert_eq!(ValueEncoding::SingleQuoted.format("it's \"hi\""), "'it&#39;s \"hi\"'");
        assert_eq!(ValueEncoding::BracedSingle.format("it's"), "{'it\\'s'}");
        assert_eq!(ValueEncoding::BracedTemplate.format("${x}`"), "{`\\${x}\\``}");
        assert_eq!(ValueEncoding::Unquoted.format("10"), "10");
        assert_eq!(ValueEncoding::Unquoted.format("a b"), "\"a b\"");
    }

    #[test]
    fn test_format_switches_quote_kind() {
        assert_eq!(ValueEncoding::DoubleQuoted.format("say \"hi\""), "'say \"hi\"'");
        assert_eq!(ValueEncoding::SingleQuoted.format("it's"), "\"it's\"");
        assert_eq!(ValueEncoding::Unquoted.format("a\"b"), "'a\"b'");

        let (encoding, text) = ValueEncoding::parse("'say \"hi\"'").unwrap();
        assert_eq!(encoding, ValueEncoding::SingleQuoted);
        assert_eq!(text, "say \"hi\"");
    }
}
