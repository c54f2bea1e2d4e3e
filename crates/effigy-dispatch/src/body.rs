//! Request body classification.
//!
//! Backends match against a typed view of the request payload. The
//! classifier decodes the raw bytes as UTF-8 (lossily), then tries JSON,
//! then XML, and falls back to plain text. Classification never fails: a
//! payload that looks structured but does not parse degrades to text with
//! a warning.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// The shape a request body classified to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    Json,
    Xml,
    Text,
}

/// A classified request body. Exactly one shape at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyValue {
    /// A syntactically valid JSON document.
    Json(serde_json::Value),
    /// Well-formed XML, kept as source text. The XML arena types are not
    /// shareable across threads, so evaluators re-parse on use.
    Xml(String),
    /// Anything else, including payloads that failed structured parsing.
    Text(String),
}

impl BodyValue {
    pub fn kind(&self) -> BodyKind {
        match self {
            BodyValue::Json(_) => BodyKind::Json,
            BodyValue::Xml(_) => BodyKind::Xml,
            BodyValue::Text(_) => BodyKind::Text,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            BodyValue::Json(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn as_xml(&self) -> Option<&str> {
        match self {
            BodyValue::Xml(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            BodyValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Classify a raw payload into exactly one [`BodyValue`] shape.
///
/// Tries JSON first (first non-whitespace byte `{` or `[`), then XML
/// (first non-whitespace byte `<`), then plain text. A parse failure is
/// logged at warn level and the payload degrades to text; this function
/// never returns an error and never panics.
pub fn classify(bytes: &[u8]) -> BodyValue {
    let text = String::from_utf8_lossy(bytes).into_owned();
    let trimmed = text.trim_start();

    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return match serde_json::from_str(&text) {
            Ok(doc) => BodyValue::Json(doc),
            Err(e) => {
                warn!("json parsing failed, request data type set to string: {}", e);
                BodyValue::Text(text)
            }
        };
    }

    if trimmed.starts_with('<') {
        return match sxd_document::parser::parse(&text) {
            Ok(_) => BodyValue::Xml(text),
            Err(e) => {
                warn!("xml parsing failed, request data type set to string: {:?}", e);
                BodyValue::Text(text)
            }
        };
    }

    BodyValue::Text(text)
}
