//! Wait policies for dynamically rendered pages
//!
//! A policy decides how long the fetcher pauses before capturing a page and
//! before each pagination click. Callers express what they are waiting for
//! as an async condition; the policy decides whether to probe it.

use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// How to wait for dynamic content to settle
///
/// # Example
///
/// ```toml
/// [fetcher.wait]
/// kind = "poll"
/// interval-ms = 250
/// timeout-ms = 10000
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum WaitPolicy {
    /// Sleep unconditionally, never probing the condition
    Fixed {
        #[serde(rename = "delay-ms")]
        delay_ms: u64,
    },

    /// Probe the condition every `interval_ms` until it holds or
    /// `timeout_ms` has elapsed
    Poll {
        #[serde(rename = "interval-ms")]
        interval_ms: u64,
        #[serde(rename = "timeout-ms")]
        timeout_ms: u64,
    },
}

impl WaitPolicy {
    /// Creates a fixed-delay policy
    pub fn fixed(delay: Duration) -> Self {
        Self::Fixed {
            delay_ms: delay.as_millis() as u64,
        }
    }

    /// Creates a polling policy
    pub fn poll(interval: Duration, timeout: Duration) -> Self {
        Self::Poll {
            interval_ms: interval.as_millis() as u64,
            timeout_ms: timeout.as_millis() as u64,
        }
    }

    /// Upper bound on how long a single wait can take
    pub fn max_duration(&self) -> Duration {
        match *self {
            Self::Fixed { delay_ms } => Duration::from_millis(delay_ms),
            Self::Poll { timeout_ms, .. } => Duration::from_millis(timeout_ms),
        }
    }

    /// Waits until `condition` holds or the policy gives up
    ///
    /// Returns `true` if the condition was observed to hold, or if the policy
    /// does not probe (`Fixed`). Returns `false` when a `Poll` times out; the
    /// caller decides whether that is an error.
    pub async fn wait_until<F, Fut>(&self, mut condition: F) -> bool
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = bool>,
    {
        match *self {
            Self::Fixed { delay_ms } => {
                sleep(Duration::from_millis(delay_ms)).await;
                true
            }
            Self::Poll {
                interval_ms,
                timeout_ms,
            } => {
                let interval = Duration::from_millis(interval_ms);
                let deadline = Instant::now() + Duration::from_millis(timeout_ms);

                loop {
                    if condition().await {
                        return true;
                    }

                    let now = Instant::now();
                    if now >= deadline {
                        tracing::debug!("Wait condition not met within {}ms", timeout_ms);
                        return false;
                    }

                    sleep(interval.min(deadline - now)).await;
                }
            }
        }
    }
}
