//! Bounded wait primitives.
//!
//! The web table renders its filtered rows asynchronously with no completion
//! signal, and the react-select widgets populate their option lists a frame
//! after being opened. Both cases are covered by polling a probe under an
//! explicit deadline instead of sleeping for a fixed interval:
//!
//! - [`poll_until`] resolves as soon as the probe yields a value.
//! - [`until_stable`] resolves once two consecutive observations are equal,
//!   which is the "rendering has settled" predicate used after a search.

use std::future::Future;
use std::time::{Duration, Instant};

use crate::error::{SuiteError, SuiteResult};

/// Default timeout for wait operations (10 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval (100ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Options for wait operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    /// Give up after this long
    pub timeout: Duration,
    /// Pause between probes
    pub poll_interval: Duration,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl PollOptions {
    /// Set the timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

/// Poll `probe` until it yields `Some`, or fail with a timeout.
///
/// `what` names the awaited condition in the timeout error. Probe errors
/// are terminal and propagate immediately.
pub async fn poll_until<T, F, Fut>(
    options: &PollOptions,
    what: &str,
    mut probe: F,
) -> SuiteResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = SuiteResult<Option<T>>>,
{
    let deadline = Instant::now() + options.timeout;
    loop {
        if let Some(value) = probe().await? {
            return Ok(value);
        }
        if Instant::now() >= deadline {
            return Err(SuiteError::Timeout {
                what: what.to_string(),
                ms: options.timeout.as_millis() as u64,
            });
        }
        tokio::time::sleep(options.poll_interval).await;
    }
}

/// Poll `probe` until two consecutive observations are equal, then return
/// the settled value.
pub async fn until_stable<T, F, Fut>(
    options: &PollOptions,
    what: &str,
    mut probe: F,
) -> SuiteResult<T>
where
    T: PartialEq,
    F: FnMut() -> Fut,
    Fut: Future<Output = SuiteResult<T>>,
{
    let deadline = Instant::now() + options.timeout;
    let mut previous = probe().await?;
    loop {
        tokio::time::sleep(options.poll_interval).await;
        let current = probe().await?;
        if current == previous {
            return Ok(current);
        }
        if Instant::now() >= deadline {
            return Err(SuiteError::Timeout {
                what: what.to_string(),
                ms: options.timeout.as_millis() as u64,
            });
        }
        previous = current;
    }
}
