use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

/// The uniform success shape handed back by [`normalize`](crate::normalize).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedResponse {
    /// Numeric HTTP status code
    pub status: u16,

    /// The transport's ok flag, carried through as-is. The text path
    /// surfaces non-OK bodies under this shape too (historical passthrough,
    /// see the crate docs), so this can be false.
    pub ok: bool,

    /// Body, tagged by the read path that produced it
    #[serde(flatten)]
    pub payload: Payload,
}

/// Body of a [`NormalizedResponse`], tagged by which read path was taken.
///
/// Serializes under a `json` or `text` key, matching the shape the
/// normalizer has always emitted on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Payload {
    /// The body was read as structured JSON
    Json(Value),
    /// The body was read as plain text
    Text(String),
}

/// The uniform error shape handed back by [`normalize`](crate::normalize).
///
/// Serializes flat, base fields inline next to the named ones:
/// `{…fields, "message": …, "status": …, "statusText": …[, "payload": …]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseError {
    /// Base fields merged in from a structured error body. The named fields
    /// below win on key collision.
    #[serde(flatten)]
    pub fields: Map<String, Value>,

    /// Always populated: the raw error body text, or the read-failure
    /// description when no body text could be read
    pub message: String,

    /// Numeric HTTP status code
    pub status: u16,

    /// Reason phrase for the status, empty when unknown
    #[serde(rename = "statusText")]
    pub status_text: String,

    /// Recovered payload, only present when a body read failed: the
    /// message re-parsed as a structured value when it is one, otherwise
    /// the message (or failure description) as a plain string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "HTTP {} {}: {}",
            self.status, self.status_text, self.message
        )
    }
}

impl std::error::Error for ResponseError {}
