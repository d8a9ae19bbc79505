/*! The normalization routine: one raw response in, one uniform value out.

*/
use std::fmt;

use log::{debug, error};
use serde_json::{Map, Value};

use crate::detect::parse_structured;
use crate::errors::Error;
use crate::observe::{Branch, BranchObserver, LogObserver};
use crate::raw::RawResponse;
use crate::response::{NormalizedResponse, Payload, ResponseError};

// Sentinel substituted when a response carries no content-type header.
const EMPTY_CONTENT_TYPE: &str = "Empty Content-Type";

/// Error record built eagerly for non-OK responses, before the content-type
/// branch decides how the body is read. Later steps enrich or supersede it.
struct Provisional {
    message: String,
    status: u16,
    status_text: String,
}

impl Provisional {
    /// Overlay the record on a structured error body: body fields form the
    /// base, the record's fields win on collision. Arrays and scalars have
    /// no fields to contribute.
    fn merge(self, body: Value) -> ResponseError {
        let mut fields = match body {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        fields.remove("message");
        fields.remove("status");
        fields.remove("statusText");

        ResponseError {
            fields,
            message: self.message,
            status: self.status,
            status_text: self.status_text,
            payload: None,
        }
    }
}

/// Which content-type branch a failed read came from, for observer labelling.
#[derive(Clone, Copy)]
enum ReadPath {
    Json,
    Text,
}

/// `Normalizer` turns a raw response into a uniform success or error value.
///
/// The only state is the branch observer. The default observer reports each
/// executed arm through the `log` facade; inject your own with
/// [`Normalizer::with_observer`] to trace or test the path a response takes.
/// For one-off calls with the default observer use the free [`normalize`].
pub struct Normalizer {
    observer: Box<dyn BranchObserver + Send + Sync>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            observer: Box::new(LogObserver),
        }
    }
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Normalizer").finish_non_exhaustive()
    }
}

impl Normalizer {
    /// Creates a normalizer with the default logging observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a normalizer that reports each executed branch to `observer`.
    pub fn with_observer(observer: Box<dyn BranchObserver + Send + Sync>) -> Self {
        Self { observer }
    }

    /// Normalize `response` into a uniform result value.
    ///
    /// Success is `NormalizedResponse`; failure is the structured
    /// `ResponseError` VALUE, not a propagated fault: body-read failures
    /// are absorbed here and never panic or escape. Callers branch on the
    /// returned `Result`, they never catch.
    ///
    /// Note the one historical quirk, preserved deliberately: a non-OK
    /// response with a non-JSON content-type comes back as
    /// `Ok(NormalizedResponse { ok: false, .. })` with its raw body text,
    /// not as an error. See the crate docs before "fixing" callers.
    pub async fn normalize<R: RawResponse>(
        &self,
        mut response: R,
    ) -> Result<NormalizedResponse, ResponseError> {
        let status = response.status();
        let ok = response.ok();
        let status_text = response.status_text().to_string();
        let content_type = response
            .content_type()
            .unwrap_or(EMPTY_CONTENT_TYPE)
            .to_string();

        debug!(
            "normalizing response, status {} content-type {:?}",
            status, content_type
        );

        // Speculative read: a non-OK body is captured as text up front so
        // the error message carries whatever the server said. The text is
        // kept for the non-JSON branch, which must not read a second time.
        let mut provisional = None;
        let mut body_text = None;
        if !ok {
            self.observer.observe(Branch::ProvisionalError);
            let message = match response.read_text().await {
                Ok(text) => {
                    body_text = Some(text.clone());
                    text
                }
                Err(e) => {
                    error!("could not read non-OK body: {}", e);
                    e.to_string()
                }
            };
            provisional = Some(Provisional {
                message,
                status,
                status_text: status_text.clone(),
            });
        }

        // Substring test, not MIME parsing: "application/vnd.api+json" and
        // friends all take the JSON path.
        if content_type.contains("json") {
            match response.read_json().await {
                Ok(value) => match provisional {
                    None => {
                        self.observer.observe(Branch::JsonSuccess);
                        Ok(NormalizedResponse {
                            status,
                            ok,
                            payload: Payload::Json(value),
                        })
                    }
                    Some(provisional) => {
                        self.observer.observe(Branch::JsonErrorMerged);
                        Err(provisional.merge(value))
                    }
                },
                Err(e) => Err(self.recover(provisional, e, status, status_text, ReadPath::Json)),
            }
        } else {
            let text = match body_text {
                Some(text) => Ok(text),
                None => response.read_text().await,
            };
            match text {
                Ok(text) => {
                    self.observer.observe(Branch::TextPassthrough);
                    Ok(NormalizedResponse {
                        status,
                        ok,
                        payload: Payload::Text(text),
                    })
                }
                Err(e) => Err(self.recover(provisional, e, status, status_text, ReadPath::Text)),
            }
        }
    }

    /// Shared failure handling for a failed content-type-driven read.
    ///
    /// The provisional message doubles as the payload: re-parsed when it is
    /// itself a structured string, kept verbatim otherwise. Without a
    /// provisional record (the response was OK), the read failure's own
    /// description is all there is.
    fn recover(
        &self,
        provisional: Option<Provisional>,
        read_failure: Error,
        status: u16,
        status_text: String,
        path: ReadPath,
    ) -> ResponseError {
        error!("body read failed for status {}: {}", status, read_failure);

        match provisional {
            Some(p) => {
                if let Some(value) = parse_structured(&p.message) {
                    self.observe_recovered(path, true);
                    ResponseError {
                        fields: Map::new(),
                        message: p.message,
                        status: p.status,
                        status_text: p.status_text,
                        payload: Some(value),
                    }
                } else {
                    self.observe_recovered(path, false);
                    let message = if p.message.is_empty() {
                        read_failure.to_string()
                    } else {
                        p.message
                    };
                    ResponseError {
                        fields: Map::new(),
                        message: message.clone(),
                        status: p.status,
                        status_text: p.status_text,
                        payload: Some(Value::String(message)),
                    }
                }
            }
            None => {
                self.observe_recovered(path, false);
                let message = read_failure.to_string();
                ResponseError {
                    fields: Map::new(),
                    message: message.clone(),
                    status,
                    status_text,
                    payload: Some(Value::String(message)),
                }
            }
        }
    }

    fn observe_recovered(&self, path: ReadPath, structured: bool) {
        let branch = match (path, structured) {
            (ReadPath::Json, true) => Branch::JsonRecoveredStructured,
            (ReadPath::Json, false) => Branch::JsonRecoveredPlain,
            (ReadPath::Text, true) => Branch::TextRecoveredStructured,
            (ReadPath::Text, false) => Branch::TextRecoveredPlain,
        };
        self.observer.observe(branch);
    }
}

/// Normalize `response` into a uniform result value using the default
/// logging observer.
///
/// Completes with a value in both success and failure cases; see
/// [`Normalizer::normalize`] for the contract and the preserved non-OK text
/// passthrough.
pub async fn normalize<R: RawResponse>(
    response: R,
) -> Result<NormalizedResponse, ResponseError> {
    Normalizer::new().normalize(response).await
}
