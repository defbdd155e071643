//! Time-indexed event queue driven by the game clock.
//!
//! Deferred actions are stored as plain event values instead of closures, so
//! nothing here can outlive the session that owns it: dropping or clearing
//! the scheduler cancels everything still pending.

/// Handle returned when an event is scheduled, used to cancel it.
pub type TimerId = u64;

/// Repeating timers never fire more often than this.
pub const MIN_INTERVAL_MS: f64 = 1.0;

#[derive(Debug, Clone)]
struct Entry<E> {
    id: TimerId,
    due_ms: f64,
    interval_ms: Option<f64>,
    event: E,
}

/// One-shot and repeating events keyed on elapsed game time (milliseconds).
#[derive(Debug, Clone)]
pub struct Scheduler<E> {
    now_ms: f64,
    next_id: TimerId,
    entries: Vec<Entry<E>>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self {
            now_ms: 0.0,
            next_id: 1,
            entries: Vec::new(),
        }
    }
}

impl<E: Clone> Scheduler<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed game time in milliseconds.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Number of events still waiting to fire.
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fire `event` once, `delay_ms` of game time from now.
    pub fn schedule_once(&mut self, delay_ms: f64, event: E) -> TimerId {
        self.push(delay_ms.max(0.0), None, event)
    }

    /// Fire `event` every `interval_ms` of game time until cancelled.
    pub fn schedule_repeating(&mut self, interval_ms: f64, event: E) -> TimerId {
        let interval = interval_ms.max(MIN_INTERVAL_MS);
        self.push(interval, Some(interval), event)
    }

    /// Cancel a pending event. Returns false if it already fired or never existed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Cancel everything.
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            tracing::debug!(count = self.entries.len(), "Cancelling pending timers");
        }
        self.entries.clear();
    }

    /// Advance the clock by `dt_ms` and return every event that came due, in
    /// due order. Events due at the same instant fire in scheduling order.
    pub fn advance(&mut self, dt_ms: f64) -> Vec<E> {
        if dt_ms.is_finite() && dt_ms > 0.0 {
            self.now_ms += dt_ms;
        }

        let mut fired = Vec::new();
        while let Some(idx) = self.next_due() {
            let entry = &mut self.entries[idx];
            fired.push(entry.event.clone());
            let interval_ms = entry.interval_ms;
            match interval_ms {
                Some(interval) => entry.due_ms += interval,
                None => {
                    self.entries.swap_remove(idx);
                },
            }
        }
        fired
    }

    fn next_due(&self) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= self.now_ms)
            .min_by(|(_, a), (_, b)| a.due_ms.total_cmp(&b.due_ms).then(a.id.cmp(&b.id)))
            .map(|(idx, _)| idx)
    }

    fn push(&mut self, delay_ms: f64, interval_ms: Option<f64>, event: E) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            due_ms: self.now_ms + delay_ms,
            interval_ms,
            event,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_fires_once_when_due() {
        let mut s = Scheduler::new();
        s.schedule_once(250.0, "reenable");

        assert!(s.advance(100.0).is_empty());
        assert!(s.advance(149.0).is_empty());
        assert_eq!(s.advance(1.0), vec!["reenable"]);
        assert!(s.advance(1000.0).is_empty());
        assert!(s.is_empty());
    }

    #[test]
    fn delay_is_measured_from_schedule_time() {
        let mut s = Scheduler::new();
        s.advance(1000.0);
        s.schedule_once(250.0, 1);
        assert!(s.advance(249.0).is_empty());
        assert_eq!(s.advance(1.0), vec![1]);
    }

    #[test]
    fn events_fire_in_due_order_then_schedule_order() {
        let mut s = Scheduler::new();
        s.schedule_once(30.0, "c");
        s.schedule_once(10.0, "a");
        s.schedule_once(10.0, "b");
        assert_eq!(s.advance(50.0), vec!["a", "b", "c"]);
    }

    #[test]
    fn repeating_fires_every_interval() {
        let mut s = Scheduler::new();
        s.schedule_repeating(1000.0, "spawn");
        assert!(s.advance(999.0).is_empty());
        assert_eq!(s.advance(1.0), vec!["spawn"]);
        assert_eq!(s.advance(2000.0), vec!["spawn", "spawn"]);
        assert_eq!(s.pending(), 1);
    }

    #[test]
    fn repeating_interval_has_a_floor() {
        let mut s = Scheduler::new();
        s.schedule_repeating(0.0, ());
        assert_eq!(s.advance(3.0).len(), 3);
    }

    #[test]
    fn cancel_removes_pending_event() {
        let mut s = Scheduler::new();
        let id = s.schedule_once(10.0, 'x');
        assert!(s.cancel(id));
        assert!(!s.cancel(id));
        assert!(s.advance(100.0).is_empty());
    }

    #[test]
    fn clear_cancels_everything() {
        let mut s = Scheduler::new();
        s.schedule_once(10.0, 1);
        s.schedule_repeating(10.0, 2);
        s.clear();
        assert_eq!(s.pending(), 0);
        assert!(s.advance(100.0).is_empty());
    }

    #[test]
    fn non_finite_dt_does_not_move_clock() {
        let mut s: Scheduler<()> = Scheduler::new();
        s.advance(f64::NAN);
        s.advance(-5.0);
        assert_eq!(s.now_ms(), 0.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn one_shot_never_fires_early(
                delay in 0.0f64..2000.0,
                steps in proptest::collection::vec(0.1f64..50.0, 1..200)
            ) {
                let mut s = Scheduler::new();
                s.schedule_once(delay, ());
                let mut fired_at = None;
                for dt in steps {
                    if !s.advance(dt).is_empty() {
                        fired_at = Some(s.now_ms());
                    }
                }
                if let Some(at) = fired_at {
                    prop_assert!(at >= delay, "fired at {at} before delay {delay}");
                } else {
                    prop_assert!(s.now_ms() < delay);
                }
            }
        }
    }
}
