//! Error types for connection liveness probes.

use std::time::Duration;

use thiserror::Error;

/// Outcome classes for a single keep-alive probe.
///
/// `ConnectionInvalid` is a sentinel, not a health failure: it means the
/// connection is already closed or in a terminal state and there is nothing
/// left to probe. Callers that count failures must treat it separately.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("connection is in an invalid state")]
    ConnectionInvalid,

    #[error("probe timed out after {0:?}")]
    Timeout(Duration),

    #[error("transport error: {0}")]
    Transport(String),
}

impl ProbeError {
    /// Whether this outcome means the connection is already gone, as
    /// opposed to a genuine probe failure.
    pub fn is_connection_invalid(&self) -> bool {
        matches!(self, ProbeError::ConnectionInvalid)
    }
}
