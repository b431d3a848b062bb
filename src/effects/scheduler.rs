//! Cancellable timers on a virtual clock.
//!
//! The UI is single-threaded: ftui delivers a tick, the app calls
//! [`Scheduler::advance_to`] with the elapsed time, and whatever came due is
//! returned in order. Every task belongs to an owner; dropping the owner's
//! element calls [`Scheduler::cancel_owner`] so nothing fires into it later.

use std::time::Duration;

/// Handle returned by [`Scheduler::schedule`]; pass it to [`Scheduler::cancel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug)]
struct Task<O, T> {
    id: u64,
    due: Duration,
    owner: O,
    payload: T,
}

#[derive(Debug)]
pub struct Scheduler<O, T> {
    now: Duration,
    next_id: u64,
    tasks: Vec<Task<O, T>>,
}

impl<O, T> Default for Scheduler<O, T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            tasks: Vec::new(),
        }
    }
}

impl<O: PartialEq, T> Scheduler<O, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    pub fn pending_for(&self, owner: &O) -> usize {
        self.tasks.iter().filter(|t| &t.owner == owner).count()
    }

    /// Due time of the earliest pending task.
    pub fn next_due(&self) -> Option<Duration> {
        self.tasks.iter().map(|t| t.due).min()
    }

    /// Queue `payload` to fire `delay` after the current virtual time.
    pub fn schedule(&mut self, owner: O, delay: Duration, payload: T) -> TaskHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            due: self.now + delay,
            owner,
            payload,
        });
        TaskHandle(id)
    }

    /// Drop one task. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != handle.0);
        before != self.tasks.len()
    }

    /// Drop every pending task of `owner`; returns how many were dropped.
    pub fn cancel_owner(&mut self, owner: &O) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| &t.owner != owner);
        let dropped = before - self.tasks.len();
        if dropped > 0 {
            tracing::trace!(dropped, "cancelled scheduled tasks");
        }
        dropped
    }

    /// Move the clock forward and return due payloads, earliest first.
    /// Ties fire in scheduling order. The clock never moves backwards.
    pub fn advance_to(&mut self, now: Duration) -> Vec<T> {
        if now > self.now {
            self.now = now;
        }
        let now = self.now;
        let (mut due, pending): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.tasks)
                .into_iter()
                .partition(|t| t.due <= now);
        self.tasks = pending;
        due.sort_by_key(|t| (t.due, t.id));
        due.into_iter().map(|t| t.payload).collect()
    }

    /// Advance by a relative step.
    pub fn advance_by(&mut self, step: Duration) -> Vec<T> {
        let target = self.now + step;
        self.advance_to(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn fires_in_due_order_then_insertion_order() {
        let mut s: Scheduler<&str, u32> = Scheduler::new();
        s.schedule("a", ms(30), 3);
        s.schedule("a", ms(10), 1);
        s.schedule("b", ms(10), 2);
        s.schedule("b", ms(50), 4);

        assert_eq!(s.advance_to(ms(30)), vec![1, 2, 3]);
        assert_eq!(s.pending(), 1);
        assert_eq!(s.advance_to(ms(49)), Vec::<u32>::new());
        assert_eq!(s.advance_to(ms(50)), vec![4]);
    }

    #[test]
    fn cancel_single_task() {
        let mut s: Scheduler<u8, &str> = Scheduler::new();
        let h = s.schedule(0, ms(5), "gone");
        s.schedule(0, ms(5), "kept");
        assert!(s.cancel(h));
        assert!(!s.cancel(h));
        assert_eq!(s.advance_by(ms(5)), vec!["kept"]);
    }

    #[test]
    fn cancel_owner_drops_only_that_owner() {
        let mut s: Scheduler<&str, u32> = Scheduler::new();
        for i in 0..3 {
            s.schedule("boot", ms(i * 100), i as u32);
        }
        s.schedule("hero", ms(50), 99);
        assert_eq!(s.pending_for(&"boot"), 3);
        assert_eq!(s.cancel_owner(&"boot"), 3);
        assert_eq!(s.advance_to(ms(1_000)), vec![99]);
    }

    #[test]
    fn delays_are_relative_to_virtual_now() {
        let mut s: Scheduler<(), &str> = Scheduler::new();
        s.advance_to(ms(100));
        s.schedule((), ms(20), "x");
        assert!(s.advance_to(ms(119)).is_empty());
        assert_eq!(s.advance_to(ms(120)), vec!["x"]);
    }

    #[test]
    fn next_due_tracks_earliest_task() {
        let mut s: Scheduler<(), u8> = Scheduler::new();
        assert_eq!(s.next_due(), None);
        s.schedule((), ms(40), 1);
        s.schedule((), ms(10), 2);
        assert_eq!(s.next_due(), Some(ms(10)));
        s.advance_to(ms(10));
        assert_eq!(s.next_due(), Some(ms(40)));
    }

    #[test]
    fn clock_does_not_run_backwards() {
        let mut s: Scheduler<(), ()> = Scheduler::new();
        s.advance_to(ms(200));
        s.advance_to(ms(100));
        assert_eq!(s.now(), ms(200));
    }
}
