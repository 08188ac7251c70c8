//! girder-conn — connection-facing contracts shared across Girder crates.
//!
//! A Girder connection is observed and acted on by subsystems (liveness
//! monitoring, teardown coordination) that must not depend on the
//! connection's internals. This crate holds the narrow seam between them:
//! the [`ConnectionHandle`] capability trait and the [`ProbeError`]
//! taxonomy for keep-alive probes.

pub mod error;
pub mod handle;

pub use error::ProbeError;
pub use handle::{ConnectionHandle, ConnectionId};
