//! Recurring countdown timers with owned cancellation handles.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Duration;

use log::trace;

use crate::runtime::GameEvent;

/// Length of one countdown step.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Identifies the timer that produced a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickId(u64);

impl TickId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Handle to a scheduled recurring tick. Once cancelled it must not fire again.
pub trait TickHandle {
    fn id(&self) -> TickId;
    fn cancel(&mut self);
}

pub trait TickScheduler {
    type Handle: TickHandle;

    /// Start emitting ticks every `period` until the returned handle is cancelled.
    fn schedule(&mut self, period: Duration) -> Self::Handle;
}

/// Spawns a sleeper thread per timer which posts [`GameEvent::Tick`] into the game channel.
#[derive(Debug)]
pub struct ThreadTickScheduler {
    tx: Sender<GameEvent>,
    next_id: u64,
}

impl ThreadTickScheduler {
    pub fn new(tx: Sender<GameEvent>) -> Self {
        Self { tx, next_id: 0 }
    }
}

#[derive(Debug)]
pub struct ThreadTickHandle {
    id: TickId,
    cancelled: Arc<AtomicBool>,
}

impl TickHandle for ThreadTickHandle {
    fn id(&self) -> TickId {
        self.id
    }

    fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

impl Drop for ThreadTickHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl TickScheduler for ThreadTickScheduler {
    type Handle = ThreadTickHandle;

    fn schedule(&mut self, period: Duration) -> ThreadTickHandle {
        self.next_id += 1;
        let id = TickId(self.next_id);
        let cancelled = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&cancelled);
        let tx = self.tx.clone();
        std::thread::spawn(move || loop {
            std::thread::sleep(period);
            if flag.load(Ordering::SeqCst) {
                trace!("timer {id:?} stopped");
                break;
            }
            if tx.send(GameEvent::Tick(id)).is_err() {
                break;
            }
        });

        ThreadTickHandle { id, cancelled }
    }
}

#[derive(Debug, Default)]
struct ManualTimers {
    next_id: u64,
    active: Vec<TickId>,
    scheduled: usize,
}

/// Scheduler for tests: nothing fires on its own, the test delivers ticks itself.
///
/// Clones share state, so a test can keep one clone to inspect timers owned by a session.
#[derive(Debug, Clone, Default)]
pub struct ManualTickScheduler {
    timers: Rc<RefCell<ManualTimers>>,
}

impl ManualTickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timers scheduled and not yet cancelled.
    pub fn active(&self) -> Vec<TickId> {
        self.timers.borrow().active.clone()
    }

    pub fn scheduled_count(&self) -> usize {
        self.timers.borrow().scheduled
    }
}

#[derive(Debug)]
pub struct ManualTickHandle {
    id: TickId,
    timers: Rc<RefCell<ManualTimers>>,
}

impl TickHandle for ManualTickHandle {
    fn id(&self) -> TickId {
        self.id
    }

    fn cancel(&mut self) {
        self.timers.borrow_mut().active.retain(|id| *id != self.id);
    }
}

impl Drop for ManualTickHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl TickScheduler for ManualTickScheduler {
    type Handle = ManualTickHandle;

    fn schedule(&mut self, _period: Duration) -> ManualTickHandle {
        let mut timers = self.timers.borrow_mut();
        timers.next_id += 1;
        timers.scheduled += 1;
        let id = TickId(timers.next_id);
        timers.active.push(id);
        ManualTickHandle {
            id,
            timers: Rc::clone(&self.timers),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn manual_scheduler_tracks_cancellation() {
        let mut scheduler = ManualTickScheduler::new();
        let probe = scheduler.clone();

        let mut a = scheduler.schedule(TICK_PERIOD);
        let b = scheduler.schedule(TICK_PERIOD);
        assert_ne!(a.id(), b.id());
        assert_eq!(probe.active(), vec![a.id(), b.id()]);

        a.cancel();
        assert_eq!(probe.active(), vec![b.id()]);

        drop(b);
        assert!(probe.active().is_empty());
        assert_eq!(probe.scheduled_count(), 2);
    }

    #[test]
    fn thread_scheduler_ticks_until_cancelled() {
        let (tx, rx) = mpsc::channel();
        let mut scheduler = ThreadTickScheduler::new(tx);
        let mut handle = scheduler.schedule(Duration::from_millis(5));

        match rx.recv_timeout(Duration::from_secs(1)) {
            Ok(GameEvent::Tick(id)) => assert_eq!(id, handle.id()),
            other => panic!("expected a tick, got {other:?}"),
        }

        handle.cancel();
        // Let the sleeper observe the flag, then drain anything already queued.
        std::thread::sleep(Duration::from_millis(30));
        while rx.try_recv().is_ok() {}
        std::thread::sleep(Duration::from_millis(30));
        assert!(rx.try_recv().is_err());
    }
}
