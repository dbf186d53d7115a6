//! Literal resolution over a decorator's argument object.
//!
//! The deep-link decorator carries a plain object literal. Its values are
//! resolved from verbatim source text: quotes stripped anywhere in the text,
//! whitespace trimmed. When a key appears more than once, the last
//! occurrence in source order wins; source projects rely on this overwrite
//! behavior, so duplicate keys are never rejected.

use crate::utils::strip_quotes;

/// One `key: value` entry of the decorator's argument object, in source
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationProperty {
    pub key: String,
    pub value: PropertyValue,
}

/// The shape of a property's value expression.
///
/// `text` is always the verbatim source of the whole value expression;
/// `Array` additionally carries the verbatim source of each element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// A string or template literal.
    Str { text: String },
    /// An array literal.
    Array { text: String, elements: Vec<String> },
    /// Any other expression; resolved best-effort from its source text.
    Other { text: String },
}

impl PropertyValue {
    pub fn text(&self) -> &str {
        match self {
            PropertyValue::Str { text }
            | PropertyValue::Array { text, .. }
            | PropertyValue::Other { text } => text,
        }
    }
}

/// Resolve `key` to a string, scanning `properties` left to right.
///
/// Every match overwrites the candidate, so the last occurrence wins.
/// Returns `default` unchanged when no entry matches.
pub fn resolve_string(properties: &[AnnotationProperty], key: &str, default: &str) -> String {
    let mut value = default.to_string();
    for property in properties {
        if property.key == key {
            value = strip_quotes(property.value.text());
        }
    }
    value
}

/// Resolve `key` to an ordered list of strings.
///
/// Only array-literal values match; each element is quote-stripped and
/// trimmed, order preserved. A matching entry whose value is not an array
/// literal leaves the candidate untouched. Returns `default` when nothing
/// matched.
pub fn resolve_string_list(
    properties: &[AnnotationProperty],
    key: &str,
    default: Vec<String>,
) -> Vec<String> {
    let mut value = default;
    for property in properties {
        if property.key == key
            && let PropertyValue::Array { elements, .. } = &property.value
        {
            value = elements.iter().map(|e| strip_quotes(e)).collect();
        }
    }
    value
}
