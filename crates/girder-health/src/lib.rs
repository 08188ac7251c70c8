//! girder-health — connection liveness monitoring for Girder.
//!
//! Detects half-open or silently-dead connections that neither side has
//! explicitly closed, independent of application traffic. Each connection
//! with health checks enabled owns one [`ConnectionHealthMonitor`]: a
//! background task that periodically issues a keep-alive probe, tracks the
//! consecutive-failure streak, and closes the connection once the streak
//! reaches the configured threshold.
//!
//! # Architecture
//!
//! ```text
//! ConnectionHealthMonitor
//!   ├── Per-connection background task (tokio::spawn)
//!   │   ├── recurring tick every `interval`
//!   │   ├── probe via Arc<dyn ConnectionHandle>, bounded by `timeout`
//!   │   └── consecutive failures vs. `failures_to_close`
//!   └── stop(): idempotent one-shot quit signal
//! ```
//!
//! This checks transport-level health (similar to TCP keep-alives), not
//! application-level health. A single successful probe resets the streak.

pub mod config;
pub mod monitor;

pub use config::HealthCheckConfig;
pub use monitor::ConnectionHealthMonitor;
