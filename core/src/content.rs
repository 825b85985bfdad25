//! The two shapes a post body arrives in, and the normalizer that turns
//! either into renderable markup.
//!
//! The CMS sends `content` as a raw HTML string for rich-text fields and as
//! an object with `html` (plus an optional plain-text rendition) for custom
//! fields. Anything else is treated as no content.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A post body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    /// Markup delivered directly as a string.
    Markup(String),
    /// Markup wrapped in an object.
    Structured(StructuredMarkup),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredMarkup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Renderable markup for `content`: the string itself, the `html` field of a
/// structured body, or `""` when there is nothing to render.
pub fn content_html(content: Option<&Content>) -> &str {
    match content {
        Some(Content::Markup(html)) => html.as_str(),
        Some(Content::Structured(StructuredMarkup { html: Some(html), .. })) => html.as_str(),
        _ => "",
    }
}

/// Deserialize an optional `Content`, mapping unexpected JSON shapes (numbers,
/// arrays, objects with a non-string `html`) to `None` instead of failing the
/// whole post.
pub(crate) fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<Content>, D::Error>
where
    D: Deserializer<'de>,
{
    let content = match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(Value::String(html)) => Some(Content::Markup(html)),
        Some(value @ Value::Object(_)) => serde_json::from_value::<StructuredMarkup>(value)
            .ok()
            .map(Content::Structured),
        _ => None,
    };
    Ok(content)
}
