//! Connection health monitor — the per-connection probe loop.
//!
//! One monitor per connection, created by the connection when health checks
//! are enabled. The loop runs as an independent tokio task and terminates
//! when the failure streak reaches the configured threshold, when a probe
//! reveals the connection is already gone, or when [`stop`] is requested.
//!
//! [`stop`]: ConnectionHealthMonitor::stop

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use girder_conn::{ConnectionHandle, ConnectionId, ProbeError};

use crate::config::HealthCheckConfig;

/// Source tag used when reporting probe failures through the connection.
const ERROR_SOURCE: &str = "health_check";

/// Reason attached to a connection closed by the monitor.
const CLOSE_REASON: &str = "health check failure";

/// Periodically probes one connection and closes it after too many
/// consecutive failures.
///
/// The monitor owns its own cancellation: `stop` delivers exactly one quit
/// signal no matter how many callers race it, and a loop that has already
/// self-terminated makes any later `stop` a no-op.
pub struct ConnectionHealthMonitor {
    config: HealthCheckConfig,
    handle: Arc<dyn ConnectionHandle>,
    quit_tx: watch::Sender<bool>,
    quit_rx: watch::Receiver<bool>,
    /// Guards the one-shot quit transition; also set by the loop itself
    /// when it terminates on its own.
    stopped: Arc<AtomicBool>,
}

impl ConnectionHealthMonitor {
    /// Create a monitor for one connection.
    ///
    /// The config is resolved with
    /// [`with_defaults`](HealthCheckConfig::with_defaults) before use.
    pub fn new(config: HealthCheckConfig, handle: Arc<dyn ConnectionHandle>) -> Self {
        let (quit_tx, quit_rx) = watch::channel(false);
        Self {
            config: config.with_defaults(),
            handle,
            quit_tx,
            quit_rx,
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Spawn the probe loop for the connection.
    ///
    /// Must only be called when the config is
    /// [`enabled`](HealthCheckConfig::enabled), and at most once per
    /// connection. `conn_id` is carried purely as a log field so a stuck or
    /// leaked task can be attributed to its connection. The returned handle
    /// is for observation only; dropping it does not affect the loop.
    pub fn start(&self, conn_id: ConnectionId) -> JoinHandle<()> {
        debug_assert!(
            self.config.enabled(),
            "health checks started on a disabled config"
        );

        let config = self.config;
        let handle = Arc::clone(&self.handle);
        let stopped = Arc::clone(&self.stopped);
        let quit = self.quit_rx.clone();
        tokio::spawn(run_loop(conn_id, config, handle, stopped, quit))
    }

    /// Request the probe loop to exit at its next wait point.
    ///
    /// Safe to call any number of times from any number of tasks,
    /// concurrently with the loop's own termination. Exactly one quit
    /// signal is ever delivered; calling this after the loop has already
    /// terminated on its own does nothing.
    pub fn stop(&self) {
        if self.stopped.swap(true, Ordering::SeqCst) {
            // Already stopped, or the loop already terminated itself.
            return;
        }

        debug!("stopping health checks");
        let _ = self.quit_tx.send(true);
    }
}

/// The probe loop for a single connection.
async fn run_loop(
    conn_id: ConnectionId,
    config: HealthCheckConfig,
    handle: Arc<dyn ConnectionHandle>,
    stopped: Arc<AtomicBool>,
    mut quit: watch::Receiver<bool>,
) {
    // First fire one full interval after start; a probe slower than the
    // interval skips the missed ticks instead of bursting.
    let mut ticker = time::interval_at(Instant::now() + config.interval, config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    debug!(conn_id, interval = ?config.interval, "health check loop starting");

    let mut consecutive_failures: u32 = 0;
    loop {
        // Biased so a pending stop always wins the wait point, even when a
        // tick is ready at the same instant. An in-flight probe below is
        // never raced against quit; it resolves (or times out) first.
        tokio::select! {
            biased;
            _ = quit.changed() => {
                debug!(conn_id, "health check loop stopping");
                return;
            }
            _ = ticker.tick() => {}
        }

        debug!(conn_id, "performing health check probe");

        // The timeout is scoped to this one attempt; nothing accumulates
        // across iterations.
        let result = match time::timeout(config.timeout, handle.probe()).await {
            Ok(result) => result,
            Err(_) => Err(ProbeError::Timeout(config.timeout)),
        };

        match result {
            Ok(()) => {
                consecutive_failures = 0;
            }
            Err(ProbeError::ConnectionInvalid) => {
                // The connection is already gone or being torn down through
                // another path; nothing left to monitor and nothing to close.
                debug!(conn_id, "connection no longer valid, stopping health checks");
                stopped.store(true, Ordering::SeqCst);
                return;
            }
            Err(err) => {
                handle.report_error(ERROR_SOURCE, &err);
                consecutive_failures += 1;
                if consecutive_failures >= config.failures_to_close {
                    warn!(
                        conn_id,
                        failures = consecutive_failures,
                        error = %err,
                        "closing connection after consecutive health check failures"
                    );
                    handle.close(CLOSE_REASON, err).await;
                    stopped.store(true, Ordering::SeqCst);
                    return;
                }
            }
        }
    }
}
