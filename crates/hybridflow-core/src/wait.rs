//! Polling waits on match counts.
//!
//! Rendering in the app under test, and especially inside a web surface, runs
//! independently of driver queries, so a single query is racy. The functions
//! here re-query on a fixed interval until the match count satisfies a
//! [`WaitCondition`] or the [`PollPolicy`] deadline passes, turning the race
//! into a single failure mode: [`FlowError::Timeout`].
//!
//! A poll taken exactly at the deadline still counts. Driver errors abort the
//! wait immediately.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{trace, warn};

use crate::driver::AutomationDriver;
use crate::error::FlowError;
use crate::selector::ResolvedQuery;

/// Default wait deadline (90 seconds).
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 90_000;

/// Default interval between polls.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 250;

/// The stop condition of a wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitCondition {
    /// At least one node matches.
    Presence,
    /// No node matches.
    Absence,
}

impl WaitCondition {
    pub fn is_satisfied(self, match_count: usize) -> bool {
        match self {
            WaitCondition::Presence => match_count > 0,
            WaitCondition::Absence => match_count == 0,
        }
    }

    /// Static message carried by the timeout error.
    pub fn diagnostic(&self) -> &'static str {
        match self {
            WaitCondition::Presence => "Timed out waiting for element",
            WaitCondition::Absence => "Timed out waiting for no element",
        }
    }
}

/// Deadline and polling interval of a wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub timeout: Duration,
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS),
            interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl PollPolicy {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Label used in timeout errors for surface-level waits.
pub const WEB_SURFACE_LABEL: &str = "<web surface>";

/// Blocks until at least one node matches `locator`.
///
/// `include_hidden` switches from "visible matches only" to "any attached
/// match".
pub async fn wait_for_presence(
    driver: &dyn AutomationDriver,
    locator: &str,
    policy: &PollPolicy,
    include_hidden: bool,
) -> Result<(), FlowError> {
    let query = ResolvedQuery::new(locator);
    poll_until(WaitCondition::Presence, locator, policy, || {
        query.fetch(driver, include_hidden)
    })
    .await
}

/// Blocks until no visible node matches `locator`.
pub async fn wait_for_absence(
    driver: &dyn AutomationDriver,
    locator: &str,
    policy: &PollPolicy,
) -> Result<(), FlowError> {
    let query = ResolvedQuery::new(locator);
    poll_until(WaitCondition::Absence, locator, policy, || {
        query.fetch(driver, false)
    })
    .await
}

/// Blocks until the embedded web surface itself is present.
pub async fn wait_for_web_surface(
    driver: &dyn AutomationDriver,
    policy: &PollPolicy,
) -> Result<(), FlowError> {
    poll_until(WaitCondition::Presence, WEB_SURFACE_LABEL, policy, || {
        driver.query_web_surface()
    })
    .await
}

async fn poll_until<F, Fut, T>(
    condition: WaitCondition,
    label: &str,
    policy: &PollPolicy,
    mut query: F,
) -> Result<(), FlowError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<Vec<T>, crate::driver::DriverError>>,
{
    let start = Instant::now();
    let mut polls: u32 = 0;

    loop {
        let matches = query().await?.len();
        polls += 1;
        trace!(target_label = label, matches, polls, ?condition, "poll");

        if condition.is_satisfied(matches) {
            return Ok(());
        }

        let elapsed = start.elapsed();
        if elapsed >= policy.timeout {
            let elapsed_ms = elapsed.as_millis() as u64;
            warn!(target_label = label, elapsed_ms, polls, "{}", condition.diagnostic());
            return Err(FlowError::Timeout {
                condition,
                locator: label.to_string(),
                elapsed_ms,
            });
        }

        tokio::time::sleep(policy.interval.min(policy.timeout - elapsed)).await;
    }
}
