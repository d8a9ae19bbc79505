use async_trait::async_trait;
use serde_json::Value;

use crate::errors::Result;

/// `RawResponse` is the fetch-style view of a network response that
/// [`normalize`](crate::normalize) consumes: status metadata plus two
/// single-use asynchronous body reads.
///
/// `read_text` and `read_json` are each consumable at most once per
/// response. The normalizer may need one of each for the same response (a
/// non-OK JSON response is read as text first, then as JSON), so
/// implementations over a single-shot body stream must buffer the body on
/// first pull and serve both reads from it, the way
/// [`HttpResponse`](crate::HttpResponse) does.
#[async_trait]
pub trait RawResponse: Send {
    /// Numeric HTTP status code
    fn status(&self) -> u16;

    /// Whether the status is in the success range
    fn ok(&self) -> bool;

    /// Reason phrase for the status, empty when unknown
    fn status_text(&self) -> &str;

    /// The content-type header, or `None` when the response carries none
    fn content_type(&self) -> Option<&str>;

    /// Read the body as text. Single-use.
    async fn read_text(&mut self) -> Result<String>;

    /// Read the body as a parsed JSON value. Single-use.
    async fn read_json(&mut self) -> Result<Value>;
}
