/*! Adapter between `reqwest` responses and the normalizer

*/
use async_trait::async_trait;
use log::trace;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::errors::{Error, Result};
use crate::raw::RawResponse;

/// [`RawResponse`] view of a [`reqwest::Response`].
///
/// Status metadata is snapshotted at construction. The body is pulled from
/// the wire once, on the first read, and buffered so that a text read and a
/// structured read can both serve the same response. Each read is still
/// single-use on its own.
#[derive(Debug)]
pub struct HttpResponse {
    status: u16,
    ok: bool,
    status_text: String,
    content_type: Option<String>,
    inner: Option<reqwest::Response>,
    body: Option<String>,
    text_taken: bool,
    json_taken: bool,
}

impl From<reqwest::Response> for HttpResponse {
    fn from(response: reqwest::Response) -> Self {
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|header| header.to_str().ok())
            .map(str::to_string);

        Self {
            status: status.as_u16(),
            ok: status.is_success(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            content_type,
            inner: Some(response),
            body: None,
            text_taken: false,
            json_taken: false,
        }
    }
}

impl HttpResponse {
    async fn buffer(&mut self) -> Result<String> {
        if let Some(body) = &self.body {
            return Ok(body.clone());
        }

        // A failed first pull consumes the wrapped response, so a later
        // read finds neither a buffer nor a response to drain.
        let response = self
            .inner
            .take()
            .ok_or_else(|| Error::body_read("body lost to an earlier failed read"))?;
        let body = response.text().await?;
        trace!("buffered {} byte body", body.len());
        self.body = Some(body.clone());
        Ok(body)
    }
}

#[async_trait]
impl RawResponse for HttpResponse {
    fn status(&self) -> u16 {
        self.status
    }

    fn ok(&self) -> bool {
        self.ok
    }

    fn status_text(&self) -> &str {
        &self.status_text
    }

    fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    async fn read_text(&mut self) -> Result<String> {
        if self.text_taken {
            return Err(Error::already_consumed("text"));
        }
        self.text_taken = true;
        self.buffer().await
    }

    async fn read_json(&mut self) -> Result<Value> {
        if self.json_taken {
            return Err(Error::already_consumed("json"));
        }
        self.json_taken = true;
        let body = self.buffer().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::errors::ErrorKind;
    use crate::normalize;
    use crate::response::Payload;

    async fn fetch(path: &str) -> HttpResponse {
        let url = format!("{}{}", mockito::server_url(), path);
        let response = reqwest::Client::new().get(&url).send().await.unwrap();
        HttpResponse::from(response)
    }

    #[tokio::test]
    async fn test_snapshot_metadata() {
        let _m = mockito::mock("GET", "/metadata")
            .with_status(201)
            .with_header("content-type", "application/json; charset=utf-8")
            .with_body("{}")
            .create();

        let response = fetch("/metadata").await;
        assert_eq!(response.status(), 201);
        assert!(response.ok());
        assert_eq!(response.status_text(), "Created");
        assert_eq!(
            response.content_type(),
            Some("application/json; charset=utf-8")
        );
    }

    #[tokio::test]
    async fn test_text_and_json_reads_share_one_body_pull() {
        let _m = mockito::mock("GET", "/shared")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"code":"X"}"#)
            .create();

        let mut response = fetch("/shared").await;
        assert_eq!(response.read_text().await.unwrap(), r#"{"code":"X"}"#);
        assert_eq!(response.read_json().await.unwrap(), json!({"code": "X"}));
    }

    #[tokio::test]
    async fn test_each_read_is_single_use() {
        let _m = mockito::mock("GET", "/single-use")
            .with_status(200)
            .with_body("hello")
            .create();

        let mut response = fetch("/single-use").await;
        response.read_text().await.unwrap();
        let err = response.read_text().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::AlreadyConsumed);

        response.read_json().await.unwrap_err();
        let err = response.read_json().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::AlreadyConsumed);
    }

    #[tokio::test]
    async fn test_read_json_reports_decode_failures() {
        let _m = mockito::mock("GET", "/not-json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("<html>")
            .create();

        let mut response = fetch("/not-json").await;
        let err = response.read_json().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Decode);
        assert!(err.message.starts_with("error decoding body: "));
    }

    #[tokio::test]
    async fn test_normalize_json_success_over_http() {
        let _m = mockito::mock("GET", "/ok")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"a":1}"#)
            .create();

        let reply = normalize(fetch("/ok").await).await.unwrap();
        assert_eq!(reply.status, 200);
        assert!(reply.ok);
        assert_eq!(reply.payload, Payload::Json(json!({"a": 1})));
    }

    #[tokio::test]
    async fn test_normalize_merges_json_error_over_http() {
        let _m = mockito::mock("GET", "/missing")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"code":"X"}"#)
            .create();

        let error = normalize(fetch("/missing").await).await.unwrap_err();
        assert_eq!(error.status, 404);
        assert_eq!(error.status_text, "Not Found");
        assert_eq!(error.message, r#"{"code":"X"}"#);
        assert_eq!(error.fields["code"], json!("X"));
    }

    #[tokio::test]
    async fn test_normalize_passes_error_text_through_over_http() {
        let _m = mockito::mock("GET", "/oops")
            .with_status(503)
            .with_header("content-type", "text/plain")
            .with_body("oops")
            .create();

        let reply = normalize(fetch("/oops").await).await.unwrap();
        assert_eq!(reply.status, 503);
        assert!(!reply.ok);
        assert_eq!(reply.payload, Payload::Text("oops".to_string()));
    }

    #[tokio::test]
    async fn test_normalize_without_content_type_takes_text_path() {
        let _m = mockito::mock("GET", "/untyped")
            .with_status(200)
            .with_body(r#"{"a":1}"#)
            .create();

        let reply = normalize(fetch("/untyped").await).await.unwrap();
        assert_eq!(reply.payload, Payload::Text(r#"{"a":1}"#.to_string()));
    }
}
