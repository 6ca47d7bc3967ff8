//! Tag serialization.
//!
//! Turns a tag identifier and its attributes into the exact text of an
//! opening, closing, or self-closing tag. Output is compact: no whitespace is
//! ever inserted between fragments.

use crate::attributes::{AttrValue, Attributes};
use crate::names::{camel_case, pascal_case};
use std::borrow::Cow;

/// How an opening tag is terminated
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseStyle {
    /// `<Tag>`, to be followed by children and a closing tag
    Normal,
    /// `<Tag />`
    SelfClose,
}

/// Entity escaping applied to text and string attribute values
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Escape {
    /// Values are written verbatim
    #[default]
    None,
    /// `& < > " '` are replaced by entity references
    Xml,
}

/// Serializes an opening or self-closing tag.
pub fn start_tag(tag: &str, attrs: &Attributes, style: CloseStyle, escape: Escape) -> String {
    let mut output = String::new();
    output.push('<');
    output.push_str(&pascal_case(tag));

    for (key, value) in attrs {
        output.push(' ');
        output.push_str(&camel_case(key));
        output.push_str("=\"");
        match value {
            AttrValue::String(s) => output.push_str(&escape_text(s, escape)),
            other => output.push_str(&other.to_string()),
        }
        output.push('"');
    }

    match style {
        CloseStyle::Normal => output.push('>'),
        CloseStyle::SelfClose => output.push_str(" />"),
    }
    output
}

/// `<Tag attr="v">`
pub fn open_tag(tag: &str, attrs: &Attributes) -> String {
    start_tag(tag, attrs, CloseStyle::Normal, Escape::None)
}

/// `<Tag attr="v" />`
pub fn self_closing_tag(tag: &str, attrs: &Attributes) -> String {
    start_tag(tag, attrs, CloseStyle::SelfClose, Escape::None)
}

/// `</Tag>`
pub fn close_tag(tag: &str) -> String {
    format!("</{}>", pascal_case(tag))
}

pub fn escape_text(input: &str, escape: Escape) -> Cow<'_, str> {
    match escape {
        Escape::None => Cow::Borrowed(input),
        Escape::Xml if input.contains(['&', '<', '>', '"', '\'']) => Cow::Owned(escape_xml(input)),
        Escape::Xml => Cow::Borrowed(input),
    }
}

pub fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
