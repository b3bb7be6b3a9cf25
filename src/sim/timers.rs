//! Deadline scheduler for delayed effects
//!
//! Entries are `(id, deadline, action)` against the session clock. The owner
//! pulls due entries one at a time with [`Timers::pop_due`], so handling one
//! entry may cancel others before they fire.

/// Cancellation token for a scheduled entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u32);

#[derive(Debug, Clone)]
struct TimerEntry<A> {
    id: TimerId,
    deadline: f32,
    action: A,
}

/// Pending delayed actions of one owner
#[derive(Debug, Clone)]
pub struct Timers<A> {
    entries: Vec<TimerEntry<A>>,
    next_id: u32,
}

impl<A> Default for Timers<A> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

impl<A: Copy> Timers<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `action` once `delay` seconds have passed after `now`
    pub fn schedule(&mut self, now: f32, delay: f32, action: A) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(TimerEntry {
            id,
            deadline: now + delay,
            action,
        });
        id
    }

    /// Returns false if the entry already fired or was cancelled
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn deadline(&self, id: TimerId) -> Option<f32> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.deadline)
    }

    /// Seconds until `id` fires (0 if overdue)
    pub fn remaining(&self, id: TimerId, now: f32) -> Option<f32> {
        self.deadline(id).map(|d| (d - now).max(0.0))
    }

    /// Remove and return the earliest entry whose deadline has passed.
    /// Equal deadlines fire in scheduling order.
    pub fn pop_due(&mut self, now: f32) -> Option<(TimerId, A)> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline <= now)
            .min_by(|(_, a), (_, b)| {
                a.deadline
                    .partial_cmp(&b.deadline)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.id.cmp(&b.id))
            })
            .map(|(i, _)| i)?;
        let entry = self.entries.remove(idx);
        Some((entry.id, entry.action))
    }

    /// Drop every pending entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
