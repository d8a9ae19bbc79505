/*!
Mock response to ease testing
*/
use async_trait::async_trait;
use serde_json::Value;

use crate::errors::{Error, Result};
use crate::raw::RawResponse;

/// Configurable `RawResponse` double.
///
/// The two read outcomes are independent (`None` makes that read fail), so
/// tests can model split-brain bodies that a buffering adapter can never
/// produce, such as a readable text body whose structured read fails.
#[derive(Debug, Clone)]
pub(crate) struct ResponseMock {
    pub(crate) status: u16,
    pub(crate) ok: bool,
    pub(crate) status_text: &'static str,
    pub(crate) content_type: Option<&'static str>,
    pub(crate) text: Option<String>,
    pub(crate) json: Option<Value>,
    pub(crate) text_taken: bool,
    pub(crate) json_taken: bool,
}

impl ResponseMock {
    /// A well-behaved server: both reads derive from the same `body`.
    pub(crate) fn with_body(
        status: u16,
        ok: bool,
        status_text: &'static str,
        content_type: Option<&'static str>,
        body: &str,
    ) -> Self {
        Self {
            status,
            ok,
            status_text,
            content_type,
            text: Some(body.to_string()),
            json: serde_json::from_str(body).ok(),
            text_taken: false,
            json_taken: false,
        }
    }
}

#[async_trait]
impl RawResponse for ResponseMock {
    fn status(&self) -> u16 {
        self.status
    }

    fn ok(&self) -> bool {
        self.ok
    }

    fn status_text(&self) -> &str {
        self.status_text
    }

    fn content_type(&self) -> Option<&str> {
        self.content_type
    }

    async fn read_text(&mut self) -> Result<String> {
        if self.text_taken {
            return Err(Error::already_consumed("text"));
        }
        self.text_taken = true;
        match &self.text {
            Some(text) => Ok(text.clone()),
            None => Err(Error::body_read("connection reset by peer")),
        }
    }

    async fn read_json(&mut self) -> Result<Value> {
        if self.json_taken {
            return Err(Error::already_consumed("json"));
        }
        self.json_taken = true;
        match &self.json {
            Some(value) => Ok(value.clone()),
            None => Err(Error::decode("unexpected end of input")),
        }
    }
}
