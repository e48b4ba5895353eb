//! Observation and pacing hooks for incremental visualisation.
//!
//! None of these types can influence a search: they only see snapshots of it
//! and may delay the calling thread between expansions. A search run with a
//! default [`SearchControl`] skips all of this work.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use gridpath_core::Point;
use indexmap::IndexSet;

use crate::error::{Result, SearchError};

/// Default minimum gap between progress callbacks (one 60 Hz frame).
pub const DEFAULT_CALLBACK_INTERVAL: Duration = Duration::from_micros(16_660);

// ---------------------------------------------------------------------------
// Progress hooks
// ---------------------------------------------------------------------------

/// Snapshot of a running search, borrowed for the duration of one callback.
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    /// Coordinates finalized so far, in settlement order.
    pub visited: &'a IndexSet<Point>,
    /// Coordinates waiting in the open frontier, without duplicates.
    pub frontier: &'a [Point],
    /// The coordinate just finalized.
    pub current: Point,
    /// Number of nodes finalized so far, `current` included.
    pub expanded: usize,
}

/// Receives [`Progress`] snapshots while a search runs.
pub trait ProgressHook {
    fn on_progress(&mut self, progress: &Progress<'_>);
}

impl<F> ProgressHook for F
where
    F: FnMut(&Progress<'_>),
{
    fn on_progress(&mut self, progress: &Progress<'_>) {
        self(progress)
    }
}

/// Owned copy of a [`Progress`] snapshot, suitable for sending to another
/// thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    pub visited: Vec<Point>,
    pub frontier: Vec<Point>,
    pub current: Point,
    pub expanded: usize,
}

impl From<&Progress<'_>> for ProgressEvent {
    fn from(p: &Progress<'_>) -> Self {
        Self {
            visited: p.visited.iter().copied().collect(),
            frontier: p.frontier.to_vec(),
            current: p.current,
            expanded: p.expanded,
        }
    }
}

/// A [`ProgressHook`] that forwards snapshots to an observer over a channel.
///
/// The channel holds a single event. While the observer has not yet taken the
/// previous event, new snapshots are dropped, so a slow renderer never stalls
/// the search and at most one event is in flight.
#[derive(Debug)]
pub struct ChannelHook {
    tx: Sender<ProgressEvent>,
    sent: usize,
    dropped: usize,
}

/// Create a [`ChannelHook`] and the receiving end for the observer.
pub fn progress_channel() -> (ChannelHook, Receiver<ProgressEvent>) {
    let (tx, rx) = crossbeam_channel::bounded(1);
    (
        ChannelHook {
            tx,
            sent: 0,
            dropped: 0,
        },
        rx,
    )
}

impl ChannelHook {
    /// Number of events delivered to the channel.
    pub fn sent(&self) -> usize {
        self.sent
    }

    /// Number of snapshots discarded because the observer was busy or gone.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl ProgressHook for ChannelHook {
    fn on_progress(&mut self, progress: &Progress<'_>) {
        match self.tx.try_send(ProgressEvent::from(progress)) {
            Ok(()) => self.sent += 1,
            Err(TrySendError::Full(_)) => self.dropped += 1,
            Err(TrySendError::Disconnected(_)) => {
                log::trace!("progress observer disconnected at {}", progress.current);
                self.dropped += 1;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// CallbackInterval
// ---------------------------------------------------------------------------

/// Throttle that admits at most one callback per `interval` of wall time.
///
/// A zero interval admits every call.
#[derive(Debug, Clone)]
pub struct CallbackInterval {
    interval: Duration,
    last: Option<Instant>,
}

impl Default for CallbackInterval {
    fn default() -> Self {
        Self::new(DEFAULT_CALLBACK_INTERVAL)
    }
}

impl CallbackInterval {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// The configured minimum gap.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the gap and forget the previous call.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
        self.last = None;
    }

    /// Forget the previous call, so the next check is admitted.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Whether a callback may run now. Admitting a call starts a new gap.
    pub fn should_call(&mut self) -> bool {
        self.should_call_at(Instant::now())
    }

    pub(crate) fn should_call_at(&mut self, now: Instant) -> bool {
        if self.interval.is_zero() {
            return true;
        }
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

// ---------------------------------------------------------------------------
// StepDelay
// ---------------------------------------------------------------------------

/// Paces a search so that the average time per node approaches `target`.
///
/// Each call to [`wait`](StepDelay::wait) compares the elapsed time with
/// `nodes * target` and sleeps only for the shortfall. Time spent doing real
/// work therefore counts towards the budget and delays do not accumulate
/// drift. A zero target never sleeps.
#[derive(Debug, Clone)]
pub struct StepDelay {
    target: Duration,
    started: Instant,
    nodes: u32,
}

impl StepDelay {
    /// Shortest sleep ever issued.
    pub const MIN_SLEEP: Duration = Duration::from_millis(1);

    pub fn new(target: Duration) -> Self {
        Self {
            target,
            started: Instant::now(),
            nodes: 0,
        }
    }

    /// Target average time per node.
    pub fn target(&self) -> Duration {
        self.target
    }

    /// Change the target and restart the clock.
    pub fn set_target(&mut self, target: Duration) {
        self.target = target;
        self.reset();
    }

    /// Restart the clock and the node counter.
    pub fn reset(&mut self) {
        self.started = Instant::now();
        self.nodes = 0;
    }

    /// Block until the running average catches up with the target.
    pub fn wait(&mut self) {
        if let Some(d) = self.shortfall(self.started.elapsed()) {
            thread::sleep(d);
        }
        self.nodes = self.nodes.saturating_add(1);
    }

    /// How long to sleep given `elapsed` time since the clock started.
    pub(crate) fn shortfall(&self, elapsed: Duration) -> Option<Duration> {
        if self.target.is_zero() {
            return None;
        }
        let budget = self.target.saturating_mul(self.nodes);
        if elapsed < budget {
            Some((budget - elapsed).max(Self::MIN_SLEEP))
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// CancelToken
// ---------------------------------------------------------------------------

/// Cooperative cancellation flag, checked before every expansion.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    done: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a new, non-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

// ---------------------------------------------------------------------------
// SearchControl
// ---------------------------------------------------------------------------

/// Optional collaborators for a single search call.
///
/// ```
/// use std::time::Duration;
/// use gridpath_core::{Grid, Point};
/// use gridpath_search::{AStar, Movement, PathFinder, Progress, SearchControl};
///
/// let grid = Grid::new(8, 8).unwrap();
/// let mut frames = 0;
/// let mut hook = |_: &Progress<'_>| frames += 1;
/// let mut control = SearchControl::new()
///     .with_hook(&mut hook)
///     .with_callback_interval(Duration::ZERO);
/// let result = AStar::default()
///     .search_with(&grid, Point::new(0, 0), Point::new(7, 7), Movement::Diagonal, &mut control)
///     .unwrap();
/// drop(control);
/// assert!(result.path_found());
/// assert_eq!(frames, result.visited().len());
/// ```
#[derive(Default)]
pub struct SearchControl<'h> {
    hook: Option<&'h mut dyn ProgressHook>,
    interval: CallbackInterval,
    pacing: Option<StepDelay>,
    cancel: Option<CancelToken>,
    expanded: usize,
}

impl<'h> SearchControl<'h> {
    /// No hook, no pacing, no cancellation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report progress to `hook`.
    pub fn with_hook(mut self, hook: &'h mut dyn ProgressHook) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Minimum wall time between two progress callbacks.
    pub fn with_callback_interval(mut self, interval: Duration) -> Self {
        self.interval.set_interval(interval);
        self
    }

    /// Pace the search to an average of `target` per node.
    pub fn with_step_delay(mut self, target: Duration) -> Self {
        self.pacing = if target.is_zero() {
            None
        } else {
            Some(StepDelay::new(target))
        };
        self
    }

    /// Abort the search once `token` is cancelled.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Nodes finalized by the most recent search.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    pub(crate) fn begin(&mut self) {
        self.expanded = 0;
        self.interval.reset();
        if let Some(p) = self.pacing.as_mut() {
            p.reset();
        }
    }

    pub(crate) fn check_cancelled(&self) -> Result<()> {
        match &self.cancel {
            Some(t) if t.is_cancelled() => Err(SearchError::Cancelled),
            _ => Ok(()),
        }
    }

    /// Record one finalized node; returns whether a hook wants a snapshot.
    pub(crate) fn tick(&mut self) -> bool {
        self.expanded += 1;
        self.hook.is_some() && self.interval.should_call()
    }

    pub(crate) fn notify(&mut self, progress: &Progress<'_>) {
        if let Some(hook) = self.hook.as_deref_mut() {
            hook.on_progress(progress);
        }
    }

    pub(crate) fn pace(&mut self) {
        if let Some(p) = self.pacing.as_mut() {
            p.wait();
        }
    }
}
