//! Fire-once timers driven by caller-supplied instants.
//!
//! Nothing here sleeps or spawns. The owner calls [`TimerQueue::due`] from its
//! tick and handles whatever came due; dropping the queue (or calling
//! [`TimerQueue::cancel_all`]) means nothing fires.

use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    fn next(v: &mut u64) -> Self {
        let id = *v;
        *v = v.wrapping_add(1).max(1);
        Self(id.max(1))
    }
}

/// A timer that came due.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fired<K> {
    pub id: TimerId,
    pub kind: K,
    /// When it was scheduled to fire, which may be earlier than the tick that noticed.
    pub deadline: Instant,
}

#[derive(Debug)]
struct Entry<K> {
    id: TimerId,
    deadline: Instant,
    kind: K,
}

#[derive(Debug)]
pub struct TimerQueue<K> {
    next_id: u64,
    entries: Vec<Entry<K>>,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self {
            next_id: 1,
            entries: Vec::new(),
        }
    }
}

impl<K> TimerQueue<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration, kind: K) -> TimerId {
        self.schedule_at(now + delay, kind)
    }

    pub fn schedule_at(&mut self, deadline: Instant, kind: K) -> TimerId {
        let id = TimerId::next(&mut self.next_id);
        self.entries.push(Entry { id, deadline, kind });
        id
    }

    /// Returns `false` if the timer already fired or was never scheduled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Drop every pending timer; returns how many there were.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.entries.len();
        self.entries.clear();
        n
    }

    /// Remove and return every timer with `deadline <= now`, earliest first.
    pub fn due(&mut self, now: Instant) -> Vec<Fired<K>> {
        let mut fired = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].deadline <= now {
                let e = self.entries.swap_remove(i);
                fired.push(Fired {
                    id: e.id,
                    kind: e.kind,
                    deadline: e.deadline,
                });
            } else {
                i += 1;
            }
        }
        fired.sort_by_key(|f| (f.deadline, f.id));
        fired
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
