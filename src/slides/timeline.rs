//! One-shot timers keyed by absolute time in milliseconds

/// A queue of actions waiting for their due time
///
/// Actions due at the same instant fire in the order they were scheduled.
#[derive(Debug, Clone)]
pub struct Timeline<A> {
    entries: Vec<(f64, u64, A)>,
    next_seq: u64,
}

impl<A> Default for Timeline<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Timeline<A> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }

    /// Schedule `action` to fire once `now >= due_ms`
    pub fn schedule(&mut self, due_ms: f64, action: A) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push((due_ms, seq, action));
    }

    /// Remove and return every action due at `now_ms`, earliest first
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<A> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].0 <= now_ms {
                due.push(self.entries.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        due.into_iter().map(|(_, _, action)| action).collect()
    }

    /// Earliest pending due time
    pub fn next_due(&self) -> Option<f64> {
        self.entries.iter().map(|e| e.0).min_by(f64::total_cmp)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every pending action
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_due_in_time_order() {
        let mut timeline = Timeline::new();
        timeline.schedule(500.0, "c");
        timeline.schedule(100.0, "a");
        timeline.schedule(300.0, "b");
        timeline.schedule(900.0, "late");

        assert_eq!(timeline.drain_due(500.0), vec!["a", "b", "c"]);
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.next_due(), Some(900.0));
    }

    #[test]
    fn test_same_instant_keeps_schedule_order() {
        let mut timeline = Timeline::new();
        timeline.schedule(200.0, 1);
        timeline.schedule(200.0, 2);
        timeline.schedule(200.0, 3);
        assert_eq!(timeline.drain_due(200.0), vec![1, 2, 3]);
        assert!(timeline.is_empty());
    }

    #[test]
    fn test_nothing_due_before_time() {
        let mut timeline = Timeline::new();
        timeline.schedule(650.0, ());
        assert!(timeline.drain_due(649.9).is_empty());
        assert_eq!(timeline.drain_due(650.0).len(), 1);
    }
}
