//! Waiting for Compose's read path to reflect a write.
//!
//! Compose acknowledges whitelist writes before the change is visible from
//! `GET /deployments/{id}/whitelist`. Callers poll the listing until the
//! entry shows up (create) or goes away (delete), bounded by a timeout.
//!
//! The loop is:
//!
//! 1. sleep `delay` (clamped to `timeout`)
//! 2. list entries and classify them against the [`Expect`]ation
//! 3. settled: return; pending: sleep `min_interval` and go to 2, unless the
//!    next poll would land past the deadline
//!
//! A failed read aborts immediately with [`ReconcileError::Refresh`].

use std::fmt;
use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;

use crate::api::{ApiError, WhitelistEntry, WhitelistSource};

/// Which condition on the read path counts as converged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    Present,
    Absent,
}

impl fmt::Display for Expect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expect::Present => f.write_str("present"),
            Expect::Absent => f.write_str("absent"),
        }
    }
}

/// Outcome of a single poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollState<T> {
    Pending,
    /// Holds the matched item for [`Expect::Present`], `None` for [`Expect::Absent`].
    Settled(Option<T>),
}

impl Expect {
    /// Classify what one read observed. Pure: the same observation always
    /// yields the same state.
    pub fn classify<T>(self, observed: Option<T>) -> PollState<T> {
        match (self, observed) {
            (Expect::Present, Some(item)) => PollState::Settled(Some(item)),
            (Expect::Absent, None) => PollState::Settled(None),
            _ => PollState::Pending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitConfig {
    /// Upper bound on the whole wait, initial delay included.
    pub timeout: Duration,
    /// Sleep before the first poll.
    pub delay: Duration,
    /// Sleep between polls.
    pub min_interval: Duration,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5 * 60),
            delay: Duration::from_secs(10),
            min_interval: Duration::from_secs(3),
        }
    }
}

#[derive(Debug, Error)]
pub enum ReconcileError<E> {
    #[error(
        "timeout while waiting for {target} to become {expect} \
         (elapsed: {elapsed:?}, polls: {polls}, timeout: {timeout:?})"
    )]
    Timeout {
        target: String,
        expect: Expect,
        elapsed: Duration,
        timeout: Duration,
        polls: u32,
    },

    #[error("failed to refresh {target}: {source}")]
    Refresh {
        target: String,
        #[source]
        source: E,
    },
}

impl<E> ReconcileError<E> {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ReconcileError::Timeout { .. })
    }
}

/// Poll `refresh` until `expect` holds for what it returns.
///
/// `refresh` reports the currently visible item, if any. `target` only feeds
/// log lines and error messages.
pub async fn poll_until<T, E, F, Fut>(
    config: &WaitConfig,
    expect: Expect,
    target: &str,
    mut refresh: F,
) -> Result<Option<T>, ReconcileError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
{
    let start = Instant::now();
    let deadline = start.checked_add(config.timeout).unwrap_or_else(far_future);
    let mut polls = 0u32;

    tracing::debug!(
        "Waiting {:?} before polling {} to become {}",
        config.delay,
        target,
        expect
    );
    tokio::time::sleep(config.delay.min(config.timeout)).await;

    loop {
        polls += 1;

        // A hung read must not push us past the deadline.
        let observed = match tokio::time::timeout_at(deadline, refresh()).await {
            Ok(Ok(observed)) => observed,
            Ok(Err(source)) => {
                tracing::debug!("Refresh of {} failed on poll {}", target, polls);
                return Err(ReconcileError::Refresh {
                    target: target.to_string(),
                    source,
                });
            }
            Err(_) => break,
        };

        match expect.classify(observed) {
            PollState::Settled(item) => {
                tracing::debug!(
                    "{} became {} after {:?} ({} polls)",
                    target,
                    expect,
                    start.elapsed(),
                    polls
                );
                return Ok(item);
            }
            PollState::Pending => {
                tracing::debug!("{} not yet {} (poll {})", target, expect, polls);
            }
        }

        match Instant::now().checked_add(config.min_interval) {
            Some(next) if next <= deadline => tokio::time::sleep_until(next).await,
            _ => break,
        }
    }

    let elapsed = start.elapsed();
    tracing::warn!(
        "Gave up waiting for {} to become {} after {:?} ({} polls)",
        target,
        expect,
        elapsed,
        polls
    );
    Err(ReconcileError::Timeout {
        target: target.to_string(),
        expect,
        elapsed,
        timeout: config.timeout,
        polls,
    })
}

/// Stand-in deadline for timeouts too large to add to `Instant::now()`.
fn far_future() -> Instant {
    // ~30 years
    Instant::now() + Duration::from_secs(86400 * 365 * 30)
}

/// How a whitelist entry is recognised in the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKey<'a> {
    /// Before creation settles the id is unknown, so the IP is the key.
    Ip(&'a str),
    Id(&'a str),
}

impl MatchKey<'_> {
    pub fn matches(&self, entry: &WhitelistEntry) -> bool {
        match self {
            MatchKey::Ip(ip) => entry.ip == *ip,
            MatchKey::Id(id) => entry.id == *id,
        }
    }
}

impl fmt::Display for MatchKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchKey::Ip(ip) => write!(f, "ip {}", ip),
            MatchKey::Id(id) => write!(f, "id {}", id),
        }
    }
}

/// Binds [`poll_until`] to a deployment's whitelist listing.
pub struct WhitelistReconciler<'a, S: ?Sized> {
    source: &'a S,
    config: WaitConfig,
}

impl<'a, S> WhitelistReconciler<'a, S>
where
    S: WhitelistSource + ?Sized,
{
    pub fn new(source: &'a S, config: WaitConfig) -> Self {
        Self { source, config }
    }

    /// Wait until an entry matching `key` is `expect` on `deployment_id`.
    ///
    /// Returns the matched entry when expecting [`Expect::Present`].
    pub async fn wait_for(
        &self,
        deployment_id: &str,
        key: MatchKey<'_>,
        expect: Expect,
    ) -> Result<Option<WhitelistEntry>, ReconcileError<ApiError>> {
        let target = format!(
            "whitelist entry with {} on deployment {}",
            key, deployment_id
        );
        let source = self.source;

        poll_until(&self.config, expect, &target, || async move {
            let entries = source.list_whitelist(deployment_id).await?;
            tracing::debug!(
                "Checking {} entries of deployment {} for {}",
                entries.len(),
                deployment_id,
                key
            );
            Ok::<_, ApiError>(entries.into_iter().find(|entry| key.matches(entry)))
        })
        .await
    }
}
