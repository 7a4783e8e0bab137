/// Milliseconds on the host's clock.
pub type Millis = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// What a timer does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    /// End of the scroll debounce window.
    ScrollSettled,
    /// End of the post-navigation pause; infinite scroll resumes.
    NavigationSettled,
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    id: TimerId,
    kind: TimerKind,
    deadline: Millis,
}

/// Cancellable one-shot timers, fired in deadline order (ties in scheduling
/// order). The queue never holds more than a handful of entries, so a plain
/// vector is enough.
#[derive(Debug, Default)]
pub struct TimerQueue {
    entries: Vec<Entry>,
    next_id: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, kind: TimerKind, deadline: Millis) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, kind, deadline });
        id
    }

    /// Returns whether the timer was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Remove and return the earliest timer due at `now`.
    pub fn pop_due(&mut self, now: Millis) -> Option<(TimerId, TimerKind)> {
        let pos = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline <= now)
            .min_by_key(|(_, e)| (e.deadline, e.id.0))
            .map(|(i, _)| i)?;
        let entry = self.entries.remove(pos);
        Some((entry.id, entry.kind))
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_deadline_order() {
        let mut q = TimerQueue::new();
        q.schedule(TimerKind::NavigationSettled, 500);
        q.schedule(TimerKind::ScrollSettled, 100);
        assert_eq!(q.next_deadline(), Some(100));
        assert!(q.pop_due(99).is_none());
        assert_eq!(q.pop_due(600).map(|(_, k)| k), Some(TimerKind::ScrollSettled));
        assert_eq!(
            q.pop_due(600).map(|(_, k)| k),
            Some(TimerKind::NavigationSettled)
        );
        assert!(q.is_empty());
    }

    #[test]
    fn test_cancel() {
        let mut q = TimerQueue::new();
        let id = q.schedule(TimerKind::ScrollSettled, 100);
        assert_eq!(q.next_deadline(), Some(100));
        assert!(q.cancel(id));
        assert!(!q.cancel(id));
        assert!(q.pop_due(1_000).is_none());
        assert_eq!(q.next_deadline(), None);
    }
}
