//! Submitted-line history with up/down recall.

use std::collections::VecDeque;

/// Most-recent-first list of submitted lines plus a browsing cursor.
///
/// `cursor == None` means "not browsing". Recall only moves the cursor; the
/// entries themselves change only through [`CliHistory::push`].
#[derive(Debug, Clone, Default)]
pub struct CliHistory {
    entries: VecDeque<String>,
    cursor: Option<usize>,
}

impl CliHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submission and stop browsing.
    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push_front(line.into());
        self.cursor = None;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn is_browsing(&self) -> bool {
        self.cursor.is_some()
    }

    /// Entries, most recent first.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Step back to an older entry. `None` when already at the oldest (or the
    /// history is empty); the cursor is left untouched in that case.
    pub fn previous(&mut self) -> Option<&str> {
        let next = match self.cursor {
            None if !self.entries.is_empty() => 0,
            Some(i) if i + 1 < self.entries.len() => i + 1,
            _ => return None,
        };
        self.cursor = Some(next);
        self.entries.get(next).map(String::as_str)
    }

    /// Step forward to a newer entry. `None` means the input should be
    /// cleared: the cursor was at the newest entry or not browsing at all.
    pub fn next(&mut self) -> Option<&str> {
        match self.cursor {
            Some(i) if i > 0 => {
                self.cursor = Some(i - 1);
                self.entries.get(i - 1).map(String::as_str)
            }
            _ => {
                self.cursor = None;
                None
            }
        }
    }
}
