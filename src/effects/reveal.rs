//! One-shot visibility observer for scroll reveals.

use std::ops::Range;

/// Fraction of an element that must be on screen before it triggers.
pub const REVEAL_THRESHOLD: f32 = 0.1;

/// Tracks elements waiting to become visible. Each element triggers at most
/// once and is then forgotten.
#[derive(Debug, Clone)]
pub struct VisibilityObserver<K> {
    pending: Vec<(K, Range<usize>)>,
    threshold: f32,
}

impl<K: Copy + PartialEq> VisibilityObserver<K> {
    pub fn new(threshold: f32) -> Self {
        Self {
            pending: Vec::new(),
            threshold,
        }
    }

    pub fn observe(&mut self, key: K, rows: Range<usize>) {
        if !self.pending.iter().any(|(k, _)| *k == key) {
            self.pending.push((key, rows));
        }
    }

    pub fn is_pending(&self, key: K) -> bool {
        self.pending.iter().any(|(k, _)| *k == key)
    }

    /// Return elements that crossed the threshold, in observation order, and
    /// stop observing them.
    pub fn poll(&mut self, viewport: Range<usize>) -> Vec<K> {
        let threshold = self.threshold;
        let mut fired = Vec::new();
        self.pending.retain(|(key, rows)| {
            if visible_fraction(rows, &viewport) >= threshold {
                fired.push(*key);
                false
            } else {
                true
            }
        });
        fired
    }
}

fn visible_fraction(rows: &Range<usize>, viewport: &Range<usize>) -> f32 {
    let len = rows.end.saturating_sub(rows.start);
    if len == 0 {
        return 0.0;
    }
    let start = rows.start.max(viewport.start);
    let end = rows.end.min(viewport.end);
    end.saturating_sub(start) as f32 / len as f32
}
