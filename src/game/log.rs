//! Bounded, newest-first match log.

use std::collections::VecDeque;

/// Maximum number of entries kept.
pub const MATCH_LOG_CAPACITY: usize = 14;

/// Human-readable history of recent events, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchLog {
    entries: VecDeque<String>,
}

impl MatchLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(MATCH_LOG_CAPACITY),
        }
    }

    /// Add a message at the front, dropping the oldest past capacity.
    pub fn push(&mut self, message: impl Into<String>) {
        self.entries.push_front(message.into());
        self.entries.truncate(MATCH_LOG_CAPACITY);
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Most recent entry.
    #[must_use]
    pub fn latest(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first() {
        let mut log = MatchLog::new();
        log.push("first");
        log.push("second");
        assert_eq!(log.latest(), Some("second"));
        assert_eq!(log.iter().collect::<Vec<_>>(), vec!["second", "first"]);
    }

    #[test]
    fn test_capacity() {
        let mut log = MatchLog::new();
        for i in 0..20 {
            log.push(format!("entry {i}"));
        }
        assert_eq!(log.len(), MATCH_LOG_CAPACITY);
        assert_eq!(log.latest(), Some("entry 19"));
        assert_eq!(log.iter().last(), Some("entry 6"));
    }
}
