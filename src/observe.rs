use std::fmt;

use log::debug;

/// Identifies which arm of the normalization routine executed.
///
/// One observation is emitted per arm taken, in execution order, so a test
/// (or a tracing layer) can follow the exact path a response took without
/// capturing log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// Non-OK status: body text captured into the provisional error record
    ProvisionalError,
    /// JSON content-type, OK status, body decoded
    JsonSuccess,
    /// JSON content-type, non-OK status: body fields merged under the error
    JsonErrorMerged,
    /// JSON decode failed; the provisional message re-parsed as a structured payload
    JsonRecoveredStructured,
    /// JSON decode failed; the provisional message (or failure description) kept as plain payload
    JsonRecoveredPlain,
    /// Non-JSON content-type: body passed through, OK or not
    TextPassthrough,
    /// Text read failed; the provisional message re-parsed as a structured payload
    TextRecoveredStructured,
    /// Text read failed; the provisional message (or failure description) kept as plain payload
    TextRecoveredPlain,
}

impl Branch {
    /// Stable identifier for this arm
    pub fn as_str(&self) -> &'static str {
        match self {
            Branch::ProvisionalError => "provisional-error",
            Branch::JsonSuccess => "json-success",
            Branch::JsonErrorMerged => "json-error-merged",
            Branch::JsonRecoveredStructured => "json-recovered-structured",
            Branch::JsonRecoveredPlain => "json-recovered-plain",
            Branch::TextPassthrough => "text-passthrough",
            Branch::TextRecoveredStructured => "text-recovered-structured",
            Branch::TextRecoveredPlain => "text-recovered-plain",
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `BranchObserver` receives the [`Branch`] taken at each step of
/// normalization. Implementations must be safe for concurrent calls.
pub trait BranchObserver {
    /// Called once per executed arm, in execution order
    fn observe(&self, branch: Branch);
}

/// The default observer: forwards branch identifiers to the `log` facade
/// at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl BranchObserver for LogObserver {
    fn observe(&self, branch: Branch) {
        debug!("normalize: {}", branch);
    }
}
