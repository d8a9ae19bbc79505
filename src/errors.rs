use std::fmt;

/// Result shorthand for a `std::result::Result` wrapping our own `Error`
pub type Result<T> = std::result::Result<T, Error>;

/// Type of error, exposed through `Error` member `kind`
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ErrorKind {
    /// The transport failed while the body was being read
    BodyRead,

    /// The body could not be decoded as the format its content-type implies
    Decode,

    /// A single-use body read was attempted a second time
    AlreadyConsumed,
}

/// Error reported by the body-read primitives of a [`RawResponse`](crate::RawResponse).
///
/// These never escape [`normalize`](crate::normalize); the normalizer absorbs
/// them into the returned [`ResponseError`](crate::ResponseError) value.
#[derive(Debug)]
pub struct Error {
    /// Error message
    pub message: String,
    /// Type of error
    pub kind: ErrorKind,
}

impl Error {
    #[doc(hidden)]
    pub(crate) fn body_read(description: &str) -> Self {
        Self {
            message: format!("error reading body: {}", description),
            kind: ErrorKind::BodyRead,
        }
    }

    #[doc(hidden)]
    pub(crate) fn decode(description: &str) -> Self {
        Self {
            message: format!("error decoding body: {}", description),
            kind: ErrorKind::Decode,
        }
    }

    #[doc(hidden)]
    pub(crate) fn already_consumed(read: &str) -> Self {
        Self {
            message: format!("{} body already consumed", read),
            kind: ErrorKind::AlreadyConsumed,
        }
    }
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::body_read(&e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::decode(&e.to_string())
    }
}
