//! One-shot deferred work: the dispensing-status clear.
//!
//! A scheduled clear always fires at its own deadline. Nothing is cancelled
//! when a newer dispense schedules another one.

use std::sync::Mutex;
use std::time::Duration;

use thiserror::Error;

/// Work to run once the delay has elapsed.
pub type ClearTask = Box<dyn FnOnce() + Send + 'static>;

#[derive(Debug, Error)]
pub enum TimerError {
    /// `TokioTimer` was created outside a tokio runtime.
    #[error("no tokio runtime available: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}

/// Scheduler for deferred tasks.
///
/// Intentionally minimal: fire-and-forget, no handles, no cancellation.
pub trait ClearTimer: Send + Sync + 'static {
    fn schedule(&self, delay: Duration, task: ClearTask);
}

/// Runs tasks on a tokio runtime after a `tokio::time::sleep`.
#[derive(Debug, Clone)]
pub struct TokioTimer {
    handle: tokio::runtime::Handle,
}

impl TokioTimer {
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }

    /// Bind to the runtime the caller is running on.
    pub fn try_current() -> Result<Self, TimerError> {
        Ok(Self::new(tokio::runtime::Handle::try_current()?))
    }
}

impl ClearTimer for TokioTimer {
    fn schedule(&self, delay: Duration, task: ClearTask) {
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
    }
}

struct Pending {
    due: Duration,
    seq: u64,
    task: ClearTask,
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_seq: u64,
    pending: Vec<Pending>,
}

/// Deterministic virtual clock.
///
/// Time only moves when `advance` is called. Due tasks run in deadline
/// order (ties in scheduling order) on the caller's thread.
#[derive(Default)]
pub struct ManualTimer {
    state: Mutex<ManualState>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.lock().now
    }

    /// Tasks scheduled but not yet fired.
    pub fn pending(&self) -> usize {
        self.lock().pending.len()
    }

    /// Move the clock forward by `by`, firing every task that falls due.
    ///
    /// Returns the number of tasks fired.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.lock().now + by;
        let mut fired = 0;

        loop {
            // Tasks run without the lock held so they may schedule more work.
            let task = {
                let mut state = self.lock();
                let next = state
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due <= target)
                    .min_by_key(|(_, p)| (p.due, p.seq))
                    .map(|(idx, _)| idx);
                match next {
                    Some(idx) => {
                        let pending = state.pending.swap_remove(idx);
                        state.now = pending.due;
                        pending.task
                    }
                    None => {
                        state.now = target;
                        break;
                    }
                }
            };
            task();
            fired += 1;
        }

        fired
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManualState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ClearTimer for ManualTimer {
    fn schedule(&self, delay: Duration, task: ClearTask) {
        let mut state = self.lock();
        let due = state.now + delay;
        let seq = state.next_seq;
        state.next_seq += 1;
        state.pending.push(Pending { due, seq, task });
    }
}

impl core::fmt::Debug for ManualTimer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = self.lock();
        f.debug_struct("ManualTimer")
            .field("now", &state.now)
            .field("pending", &state.pending.len())
            .finish()
    }
}
