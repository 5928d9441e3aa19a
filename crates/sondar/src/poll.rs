//! Deadline polling: drive a [`Probe`] at a fixed interval until it is ready
//! or a time budget expires.
//!
//! The timeout is soft: it is checked once per poll interval, so the actual
//! wait never exceeds the timeout by more than one interval. Each call owns
//! its own deadline; nothing is shared between calls.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::driver::Driver;
use crate::locator::Locator;
use crate::probe::{ElementReadinessProbe, OptionCountProbe, Probe, ProbeOutcome};
use crate::result::{SondarError, SondarResult};

/// Default timeout for poll operations (30 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default polling interval (1 second)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Options for poll operations
#[derive(Debug, Clone)]
pub struct PollOptions {
    /// Timeout in milliseconds; must be positive
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl PollOptions {
    /// Create poll options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Poll `probe` until it reports ready or `options.timeout_ms` elapses.
///
/// A `Ready` sample returns immediately. A `Transient` sample is logged at
/// debug level and retried like a pending one; it never fails the loop. On
/// deadline exhaustion the error depends on what the probe saw:
/// [`SondarError::ElementNotReady`] when some sample produced a candidate
/// value that failed its readiness check, [`SondarError::ElementNotFound`]
/// when nothing was ever located. The two outcomes are deliberately kept
/// distinct.
pub fn poll_until<P: Probe>(probe: &mut P, options: &PollOptions) -> SondarResult<P::Output> {
    let deadline = Instant::now() + options.timeout();

    loop {
        match probe.sample() {
            ProbeOutcome::Ready(value) => return Ok(value),
            ProbeOutcome::Pending => {}
            ProbeOutcome::Transient(cause) => {
                debug!(awaiting = %probe.describe(), %cause, "transient probe failure");
            }
        }

        if Instant::now() >= deadline {
            break;
        }
        std::thread::sleep(options.poll_interval());
    }

    if probe.saw_candidate() {
        Err(SondarError::ElementNotReady {
            locator: probe.describe(),
        })
    } else {
        Err(SondarError::ElementNotFound {
            locator: probe.describe(),
            timeout_ms: options.timeout_ms,
        })
    }
}

/// Wait for an element to exist, be enabled and be displayed.
pub fn wait_for_element<D: Driver>(
    driver: &D,
    locator: Locator,
    options: &PollOptions,
) -> SondarResult<D::Element> {
    let mut probe = ElementReadinessProbe::new(driver, locator);
    poll_until(&mut probe, options)
}

/// Wait for a select-like control to report at least `min_count` options.
pub fn wait_for_option_count<D: Driver>(
    driver: &D,
    locator: Locator,
    min_count: usize,
    options: &PollOptions,
) -> SondarResult<D::Element> {
    let mut probe = OptionCountProbe::new(driver, locator, min_count);
    poll_until(&mut probe, options)
}
