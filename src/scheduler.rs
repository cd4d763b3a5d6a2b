//! Deferred work for widgets that animate or time out.
//!
//! Widgets never sleep or spawn on their own. They ask a [`Scheduler`] for a
//! command that delivers a message later, either after the next render frame
//! or after a fixed delay, and the host runs that command like any other
//! `bubbletea_rs::Cmd`. The returned message comes back through `update`,
//! where the widget decides whether it is still wanted.
//!
//! Two schedulers are provided:
//!
//! - [`TickScheduler`] is backed by `bubbletea_rs::tick` and is what a running
//!   program uses.
//! - [`ManualScheduler`] keeps a virtual clock. Its commands resolve to
//!   nothing and the queued messages are handed out by
//!   [`ManualScheduler::advance`], which makes timing deterministic in tests
//!   and in hosts that drive their own loop.
//!
//! ```rust
//! use bubbletea_snackbar::scheduler::{Deferral, ManualScheduler, Scheduler};
//! use bubbletea_rs::Msg;
//! use std::time::Duration;
//!
//! let scheduler = ManualScheduler::new();
//! let _cmd = scheduler.schedule(
//!     Deferral::After(Duration::from_secs(1)),
//!     Box::new(|| Box::new("ping") as Msg),
//! );
//!
//! assert!(scheduler.advance(Duration::from_millis(999)).is_empty());
//! assert_eq!(scheduler.advance(Duration::from_millis(1)).len(), 1);
//! ```

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Frames per second assumed for next-frame deferrals.
pub const FPS: u32 = 60;

/// Duration of one frame at [`FPS`].
pub const FRAME_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / FPS as u64);

// `tick` cannot run with a zero period.
const MIN_TICK: Duration = Duration::from_nanos(1);

/// Builds the message a deferred task delivers.
pub type MsgFactory = Box<dyn Fn() -> Msg + Send + Sync>;

/// When a deferred task should fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferral {
    /// After the current render pass has settled.
    NextFrame,
    /// After the given delay.
    After(Duration),
}

/// Source of deferred commands.
///
/// Implementations must not deliver a message before its deferral has
/// elapsed. Cancellation is the widget's job: it ignores messages it no
/// longer expects.
pub trait Scheduler: Send + Sync + fmt::Debug {
    /// Returns a command that yields `make()` once `deferral` has passed.
    fn schedule(&self, deferral: Deferral, make: MsgFactory) -> Cmd;
}

/// Scheduler backed by `bubbletea_rs::tick`.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    frame_interval: Duration,
}

impl TickScheduler {
    /// Creates a scheduler with a 60 FPS frame interval.
    pub fn new() -> Self {
        Self::with_frame_interval(FRAME_INTERVAL)
    }

    /// Creates a scheduler with a custom frame interval. A zero interval is
    /// raised to one nanosecond.
    pub fn with_frame_interval(frame_interval: Duration) -> Self {
        Self {
            frame_interval: frame_interval.max(MIN_TICK),
        }
    }

    /// Returns the delay used for [`Deferral::NextFrame`].
    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for TickScheduler {
    fn schedule(&self, deferral: Deferral, make: MsgFactory) -> Cmd {
        let delay = match deferral {
            Deferral::NextFrame => self.frame_interval,
            Deferral::After(delay) => delay,
        };
        bubbletea_tick(delay.max(MIN_TICK), move |_| make())
    }
}

struct Task {
    due: Duration,
    seq: u64,
    make: MsgFactory,
}

#[derive(Default)]
struct Queue {
    now: Duration,
    seq: u64,
    tasks: Vec<Task>,
}

impl fmt::Debug for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Queue")
            .field("now", &self.now)
            .field("pending", &self.tasks.len())
            .finish()
    }
}

/// Scheduler driven by a virtual clock.
///
/// Clones share the same clock and queue, so a test can keep one handle and
/// give another to the widget.
///
/// A frame boundary passes on every call to [`advance`](Self::advance):
/// next-frame tasks queued before the call are always released by it, even
/// when the clock moves by zero. Delayed tasks are released once the clock
/// reaches their due time. Released messages come back ordered by due time,
/// then by scheduling order.
#[derive(Debug, Clone)]
pub struct ManualScheduler {
    queue: Arc<Mutex<Queue>>,
    frame_interval: Duration,
}

impl ManualScheduler {
    /// Creates a scheduler at virtual time zero with a 60 FPS frame interval.
    pub fn new() -> Self {
        Self {
            queue: Arc::new(Mutex::new(Queue::default())),
            frame_interval: FRAME_INTERVAL,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Queue> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.lock().now
    }

    /// Number of queued tasks, including ones the widget has since abandoned.
    pub fn pending(&self) -> usize {
        self.lock().tasks.len()
    }

    /// Moves the clock forward by one frame interval.
    pub fn advance_frame(&self) -> Vec<Msg> {
        self.advance(self.frame_interval)
    }

    /// Moves the clock forward by `by` and returns every message now due.
    pub fn advance(&self, by: Duration) -> Vec<Msg> {
        let mut due = {
            let mut queue = self.lock();
            queue.now += by;
            let now = queue.now;
            let (due, waiting): (Vec<Task>, Vec<Task>) =
                queue.tasks.drain(..).partition(|task| task.due <= now);
            queue.tasks = waiting;
            due
        };
        due.sort_by_key(|task| (task.due, task.seq));
        // Factories run outside the lock so they may schedule again.
        due.into_iter().map(|task| (task.make)()).collect()
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, deferral: Deferral, make: MsgFactory) -> Cmd {
        {
            let mut queue = self.lock();
            let due = match deferral {
                Deferral::NextFrame => queue.now,
                Deferral::After(delay) => queue.now + delay,
            };
            queue.seq += 1;
            let seq = queue.seq;
            queue.tasks.push(Task { due, seq, make });
        }
        Box::pin(async { None::<Msg> })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(text: &'static str) -> MsgFactory {
        Box::new(move || Box::new(text) as Msg)
    }

    fn labels(msgs: Vec<Msg>) -> Vec<&'static str> {
        msgs.into_iter()
            .map(|msg| *msg.downcast::<&'static str>().expect("label message"))
            .collect()
    }

    #[test]
    fn test_frame_interval_matches_fps() {
        assert_eq!(FRAME_INTERVAL, Duration::from_nanos(16_666_666));
        assert_eq!(TickScheduler::new().frame_interval(), FRAME_INTERVAL);
    }

    #[test]
    fn test_next_frame_released_on_any_advance() {
        let scheduler = ManualScheduler::new();
        let _ = scheduler.schedule(Deferral::NextFrame, label("frame"));
        assert_eq!(scheduler.pending(), 1);

        assert_eq!(labels(scheduler.advance(Duration::ZERO)), vec!["frame"]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_delayed_task_waits_for_due_time() {
        let scheduler = ManualScheduler::new();
        let _ = scheduler.schedule(Deferral::After(Duration::from_millis(4000)), label("late"));

        assert!(scheduler.advance(Duration::from_millis(3999)).is_empty());
        assert_eq!(scheduler.now(), Duration::from_millis(3999));
        assert_eq!(labels(scheduler.advance(Duration::from_millis(1))), vec!["late"]);
    }

    #[test]
    fn test_release_order_is_due_time_then_schedule_order() {
        let scheduler = ManualScheduler::new();
        let _ = scheduler.schedule(Deferral::After(Duration::from_millis(20)), label("b"));
        let _ = scheduler.schedule(Deferral::NextFrame, label("a"));
        let _ = scheduler.schedule(Deferral::After(Duration::from_millis(20)), label("c"));

        assert_eq!(
            labels(scheduler.advance(Duration::from_millis(50))),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn test_clones_share_the_clock() {
        let scheduler = ManualScheduler::new();
        let handle = scheduler.clone();
        let _ = handle.schedule(Deferral::NextFrame, label("shared"));

        assert_eq!(scheduler.pending(), 1);
        assert_eq!(labels(scheduler.advance_frame()), vec!["shared"]);
        assert_eq!(handle.now(), FRAME_INTERVAL);
    }

    #[tokio::test]
    async fn test_manual_commands_resolve_to_nothing() {
        let scheduler = ManualScheduler::new();
        let cmd = scheduler.schedule(Deferral::NextFrame, label("queued"));
        assert!(cmd.await.is_none());
        assert_eq!(scheduler.pending(), 1);
    }

    #[tokio::test]
    async fn test_tick_scheduler_delivers_message() {
        let scheduler = TickScheduler::with_frame_interval(Duration::from_millis(1));
        let cmd = scheduler.schedule(Deferral::NextFrame, label("tick"));
        let msg = cmd.await.expect("tick should deliver a message");
        assert_eq!(*msg.downcast::<&'static str>().expect("label"), "tick");
    }

    #[test]
    fn test_zero_frame_interval_is_raised() {
        let scheduler = TickScheduler::with_frame_interval(Duration::ZERO);
        assert_eq!(scheduler.frame_interval(), Duration::from_nanos(1));
    }

    #[tokio::test]
    async fn test_tick_scheduler_zero_delay_delivers_message() {
        let scheduler = TickScheduler::with_frame_interval(Duration::ZERO);
        let cmd = scheduler.schedule(Deferral::After(Duration::ZERO), label("now"));
        let msg = cmd.await.expect("zero delay should still deliver");
        assert_eq!(*msg.downcast::<&'static str>().expect("label"), "now");

        let cmd = scheduler.schedule(Deferral::NextFrame, label("frame"));
        assert!(cmd.await.is_some());
    }
}
