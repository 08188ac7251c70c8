//! The capability trait a connection exposes to its observers.

use async_trait::async_trait;

use crate::error::ProbeError;

/// Identifier of a connection within the transport.
///
/// Carried purely for diagnostic context (log fields, attributing a stuck
/// task to a specific connection); it has no behavioral meaning.
pub type ConnectionId = u32;

/// Narrow capability interface implemented by the owning connection.
///
/// Subsystems like the health monitor hold this as `Arc<dyn
/// ConnectionHandle>` instead of reaching into connection internals, so
/// they stay unit-testable against a fake.
#[async_trait]
pub trait ConnectionHandle: Send + Sync {
    /// Perform one liveness round-trip over the connection.
    ///
    /// Callers bound the attempt with their own deadline; an
    /// implementation that tracks deadlines internally may also return
    /// [`ProbeError::Timeout`] itself. Returns
    /// [`ProbeError::ConnectionInvalid`] when the connection is already
    /// closed or being torn down.
    async fn probe(&self) -> Result<(), ProbeError>;

    /// Record a non-fatal operational error attributed to `source`.
    fn report_error(&self, source: &str, err: &ProbeError);

    /// Tear down the connection, attaching a human-readable reason and the
    /// triggering error.
    async fn close(&self, reason: &str, err: ProbeError);
}
