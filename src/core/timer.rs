/// Cooperative timer queue used by the game engine.
///
/// Nothing here sleeps. The owner advances time explicitly and pops every
/// event whose deadline has passed, running each one to completion before
/// asking for the next.
use std::collections::BTreeMap;
use std::time::Duration;

/// Handle returned by [`TimerQueue::schedule`], used to cancel a pending timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    deadline: Duration,
    seq: u64,
}

impl TimerHandle {
    pub fn deadline(&self) -> Duration {
        self.deadline
    }
}

#[derive(Debug)]
pub struct TimerQueue<E> {
    // Keyed by (deadline, seq) so equal deadlines fire in scheduling order
    pending: BTreeMap<(Duration, u64), E>,
    next_seq: u64,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self {
            pending: BTreeMap::new(),
            next_seq: 0,
        }
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` to fire once the clock reaches `deadline`.
    pub fn schedule(&mut self, deadline: Duration, event: E) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.insert((deadline, seq), event);
        TimerHandle { deadline, seq }
    }

    /// Cancel a pending timer. Returns the event if it had not fired yet.
    pub fn cancel(&mut self, handle: TimerHandle) -> Option<E> {
        self.pending.remove(&(handle.deadline, handle.seq))
    }

    /// Pop the earliest event due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, E)> {
        let (&(deadline, _), _) = self.pending.first_key_value()?;
        if deadline > now {
            return None;
        }
        self.pending
            .pop_first()
            .map(|((deadline, _), event)| (deadline, event))
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.keys().next().map(|(deadline, _)| *deadline)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
