//! Timestamp Tracker
//!
//! Measures the wall-clock gap between committed renders.
//!
//! The stored timestamp is the one recorded at the previous commit. During a
//! render, `time_since_last_render` is measured against it; after the render
//! commits, the stored timestamp moves to the commit time. The first render
//! seeds the stored timestamp with its own start time, so it reports zero.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

/// A source of millisecond timestamps.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> u64;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can hold one handle and give
/// another to the code under test.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    pub fn set(&self, ms: u64) {
        self.now.store(ms, Ordering::SeqCst);
    }

    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Timing of the render in progress, relative to the previous commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderTiming {
    /// When the previous render committed (ms since the Unix epoch).
    pub last_render_timestamp: u64,
    /// Milliseconds elapsed since then.
    pub time_since_last_render: u64,
}

/// Tracks the timestamp of the last committed render.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampTracker {
    last_render_timestamp: Option<u64>,
}

impl TimestampTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Measure the render in progress at time `now`.
    pub fn observe(&mut self, now: u64) -> RenderTiming {
        let last = *self.last_render_timestamp.get_or_insert(now);
        RenderTiming {
            last_render_timestamp: last,
            time_since_last_render: now.saturating_sub(last),
        }
    }

    /// Record a commit at time `now`.
    pub fn commit(&mut self, now: u64) {
        self.last_render_timestamp = Some(now);
    }

    pub fn last_render_timestamp(&self) -> Option<u64> {
        self.last_render_timestamp
    }
}
