pub mod fetch;
pub mod summary;
pub mod wakatime;

use std::{
    future::Future,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use thiserror::Error;

pub use summary::{StatsSummary, FALLBACK_SUMMARY};
pub use wakatime::{LanguageBreakdown, LanguageShare, WakaTimeStats};

/// Result of one stats load, shared by every widget.
///
/// `Fallback` carries substitute data the widget may still render, `Empty`
/// means there is nothing to show.
#[derive(Debug, Clone, PartialEq)]
pub enum StatsOutcome<T> {
    Ok(T),
    Fallback(T),
    Empty,
}

impl<T> StatsOutcome<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            StatsOutcome::Ok(data) | StatsOutcome::Fallback(data) => Some(data),
            StatsOutcome::Empty => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, StatsOutcome::Fallback(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, StatsOutcome::Empty)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("upstream returned HTTP {0}")]
    Status(u16),
    #[error("couldn't parse stats response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for StatsError {
    fn from(value: reqwest::Error) -> Self {
        StatsError::Network(value.to_string())
    }
}

impl From<serde_json::Error> for StatsError {
    fn from(value: serde_json::Error) -> Self {
        StatsError::Parse(value.to_string())
    }
}

/// State of a widget's single load per mount.
///
/// Loading and the committed outcome live in one value so a reader can never
/// see "not loading" without an outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Settled(StatsOutcome<T>),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Loading
    }
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn outcome(&self) -> Option<&StatsOutcome<T>> {
        match self {
            LoadState::Loading => None,
            LoadState::Settled(outcome) => Some(outcome),
        }
    }

    /// Commits `outcome`. Only the first call has any effect.
    pub fn settle(&mut self, outcome: StatsOutcome<T>) -> bool {
        if self.is_loading() {
            *self = LoadState::Settled(outcome);
            true
        } else {
            false
        }
    }
}

/// Shared flag telling an in-flight load whether its component is still
/// mounted. Cloned into the task, released from `on_cleanup`.
#[derive(Debug, Clone)]
pub struct MountGuard(Arc<AtomicBool>);

impl Default for MountGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl MountGuard {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn release(&self) {
        self.0.store(false, Ordering::Release);
    }

    pub fn is_mounted(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Runs `commit` only while still mounted.
    pub fn commit<F: FnOnce()>(&self, commit: F) -> bool {
        if self.is_mounted() {
            commit();
            true
        } else {
            false
        }
    }
}

/// Awaits one load and hands its outcome to `settle`, unless `guard` was
/// released while the load was in flight. Returns whether `settle` ran.
pub async fn load_once<T, Fut, S>(guard: MountGuard, pending: Fut, settle: S) -> bool
where
    Fut: Future<Output = StatsOutcome<T>>,
    S: FnOnce(StatsOutcome<T>),
{
    let outcome = pending.await;
    guard.commit(|| settle(outcome))
}
