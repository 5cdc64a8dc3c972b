//! Scoped waits: one bounded-poll abstraction parameterized by predicate and
//! timeout.
//!
//! Every "wait until P holds, else fail" in the suite goes through
//! [`wait_for`]; accessors differ only in the probe they pass and the budget
//! they carry. A timeout is a hard failure surfaced as
//! [`SuiteError::WaitTimeout`], never a retry opportunity.

use std::future::Future;
use std::time::{Duration, Instant};

use crate::error::{SuiteError, SuiteResult};

/// Default budget for act-style waits (enter text, click), in milliseconds
pub const DEFAULT_ACTION_TIMEOUT_MS: u64 = 15_000;

/// Default budget for read-style waits (error text, visibility), in milliseconds
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval, in milliseconds
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 250;

/// Timeout and polling configuration for one wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Timeout budget in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create options with the default read budget
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with the action budget (15 s)
    #[must_use]
    pub const fn action() -> Self {
        Self {
            timeout_ms: DEFAULT_ACTION_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }

    /// Options with the read budget (10 s)
    #[must_use]
    pub const fn read() -> Self {
        Self {
            timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }

    /// Set the timeout budget
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Timeout as a [`Duration`]
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Poll interval as a [`Duration`]
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Poll `probe` until it yields true or the budget elapses.
///
/// The probe is always evaluated at least once, so a zero timeout still
/// observes the current state. Probe errors propagate immediately; they are
/// driver failures, not unsatisfied conditions.
pub async fn wait_for<F, Fut>(mut probe: F, condition: &str, options: WaitOptions) -> SuiteResult<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = SuiteResult<bool>>,
{
    let start = Instant::now();
    loop {
        if probe().await? {
            return Ok(());
        }
        if start.elapsed() >= options.timeout() {
            break;
        }
        sleep_for(options.poll_interval()).await;
    }
    Err(SuiteError::WaitTimeout {
        condition: condition.to_string(),
        ms: options.timeout_ms,
    })
}

/// Sleep between polls. Under the `browser` feature this yields to the tokio
/// runtime; the scripted backend blocks the thread, which is fine for the
/// short budgets hermetic tests use.
async fn sleep_for(duration: Duration) {
    #[cfg(feature = "browser")]
    tokio::time::sleep(duration).await;
    #[cfg(not(feature = "browser"))]
    std::thread::sleep(duration);
}
