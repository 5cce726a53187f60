//! In-memory activity log of mutating operations

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use crudpanel_operations::LogEntry;

/// Entries kept when no capacity is given.
pub const DEFAULT_CAPACITY: usize = 256;

/// Most recent log entries recorded by a controller, newest first.
///
/// Bounded: once full, recording an entry evicts the oldest one.
#[derive(Debug)]
pub struct ActivityLog {
    entries: Mutex<VecDeque<LogEntry>>,
    capacity: usize,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A log keeping at most `capacity` entries. A capacity of zero keeps nothing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn record(&self, entry: LogEntry) {
        if self.capacity == 0 {
            return;
        }
        let mut entries = self.lock();
        if entries.len() == self.capacity {
            entries.pop_back();
        }
        entries.push_front(entry);
    }

    /// The most recent entries, up to `limit`.
    pub fn entries(&self, limit: usize) -> Vec<LogEntry> {
        self.lock().iter().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<LogEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(op: &str) -> LogEntry {
        LogEntry::new(op, json!({}), json!({}), None, 0)
    }

    #[test]
    fn newest_first_with_limit() {
        let log = ActivityLog::new();
        assert!(log.is_empty());
        for op in ["store post", "update post", "update user"] {
            log.record(entry(op));
        }
        let ops: Vec<_> = log.entries(2).into_iter().map(|e| e.op).collect();
        assert_eq!(ops, vec!["update user", "update post"]);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn full_log_evicts_oldest() {
        let log = ActivityLog::with_capacity(2);
        for op in ["store a", "store b", "store c"] {
            log.record(entry(op));
        }
        assert_eq!(log.len(), 2);
        let ops: Vec<_> = log.entries(10).into_iter().map(|e| e.op).collect();
        assert_eq!(ops, vec!["store c", "store b"]);
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let log = ActivityLog::with_capacity(0);
        log.record(entry("store a"));
        assert!(log.is_empty());
    }

    #[test]
    fn default_capacity() {
        assert_eq!(ActivityLog::new().capacity(), DEFAULT_CAPACITY);
    }
}
