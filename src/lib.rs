/*! Uniform results for fetch-style HTTP responses.

Application code that talks to HTTP APIs tends to regrow the same thicket at
every call site: check the status, sniff the content-type, pick a body read,
parse, and decide what counts as an error. This library funnels all of that
through a single routine, [`normalize`], which turns any response into one of
two plain values and never panics or propagates a body-read fault.

- [`NormalizedResponse`] on success: status, the original `ok` flag, and the
  payload tagged by how it was read (`json` or `text`).
- [`ResponseError`] on failure: a `message` that is always populated, the
  status and reason phrase, any fields the server sent in a structured error
  body, and (when the body could not be decoded) a best-effort `payload`
  rebuilt from the error text.

Responses reach the normalizer through the [`RawResponse`] trait. An adapter
for `reqwest` is included ([`HttpResponse`]); anything else that can expose
status metadata and two single-use body reads works too.

# Usage

```rust
# let _m = mockito::mock("GET", "/user")
#     .with_status(200)
#     .with_header("content-type", "application/json")
#     .with_body(r#"{"id":7,"name":"Ada"}"#)
#     .create();
use fetch_normalize::{normalize, HttpResponse, Payload};

let runtime = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .unwrap();

runtime.block_on(async {
    let url = format!("{}/user", mockito::server_url());
    let response = reqwest::Client::new().get(&url).send().await.unwrap();

    match normalize(HttpResponse::from(response)).await {
        Ok(reply) => match reply.payload {
            Payload::Json(user) => assert_eq!(user["id"], 7),
            Payload::Text(text) => panic!("expected JSON, got {}", text),
        },
        Err(error) => panic!("request failed: {}", error),
    }
});
```

# Error values

A failed request comes back as a value, not as something to catch. The
server's own error fields ride along next to the standard ones:

```rust
# let _m = mockito::mock("GET", "/missing")
#     .with_status(404)
#     .with_header("content-type", "application/json")
#     .with_body(r#"{"code":"unknown-user"}"#)
#     .create();
# use fetch_normalize::{normalize, HttpResponse};
# let runtime = tokio::runtime::Builder::new_current_thread()
#     .enable_all()
#     .build()
#     .unwrap();
# runtime.block_on(async {
let response = reqwest::Client::new()
    .get(&format!("{}/missing", mockito::server_url()))
    .send()
    .await
    .unwrap();

let error = normalize(HttpResponse::from(response)).await.unwrap_err();
assert_eq!(error.status, 404);
assert_eq!(error.message, r#"{"code":"unknown-user"}"#);
assert_eq!(error.fields["code"], "unknown-user");
# });
```

When the server's reply is neither OK nor decodable, the normalizer falls
back to whatever it has: the raw error text becomes both `message` and
`payload`, re-parsed into a structure when the text itself turns out to be
JSON.

# The non-OK text passthrough

One long-standing behavior is preserved on purpose: a non-OK response whose
content-type is not JSON comes back as `Ok(NormalizedResponse)` with the raw
body text and `ok: false`, not as a `ResponseError`. Callers on the text
path must check the `ok` flag themselves. Downstream code has come to rely
on reading plain-text error pages this way, so the routine keeps the shape.

# Observing the path taken

Every arm of the routine reports a [`Branch`] to an observer before it
returns. The default observer logs at debug level through the `log` facade;
[`Normalizer::with_observer`] swaps in your own, which is also the easiest
way to assert on the exact path a response took in tests.

*/
#![deny(missing_docs)]

mod detect;
mod errors;
mod http;
#[cfg(test)]
mod mock;
mod normalizer;
mod observe;
mod raw;
mod response;

pub use detect::is_json_string;
pub use errors::{Error, ErrorKind, Result};
pub use http::HttpResponse;
pub use normalizer::{normalize, Normalizer};
pub use observe::{Branch, BranchObserver, LogObserver};
pub use raw::RawResponse;
pub use response::{NormalizedResponse, Payload, ResponseError};
pub use serde_json::{json, Value};
