//! Bounded activity log fed by the backend event stream.
//!
//! # Design
//! - Newest-first ordering: operators care about the latest backend activity.
//! - Hard capacity of 1000 lines; insertion evicts the oldest.
//! - Ingest swallows undecodable frames: the transport legitimately carries
//!   keepalives that are not payloads.

use relocarr_events::{decode_payload, render_line};
use std::collections::VecDeque;

/// Maximum number of retained log lines.
pub const LOG_CAPACITY: usize = 1000;

/// Newest-first, capacity-bounded activity log.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ActivityLog {
    lines: VecDeque<String>,
}

impl ActivityLog {
    /// Prepend a rendered line, evicting the oldest beyond [`LOG_CAPACITY`].
    pub fn push(&mut self, line: String) {
        self.lines.push_front(line);
        while self.lines.len() > LOG_CAPACITY {
            self.lines.pop_back();
        }
    }

    /// Decode one stream frame and append it; undecodable frames are dropped
    /// without mutating the log.
    pub fn ingest(&mut self, data: &str) {
        if let Ok(payload) = decode_payload(data) {
            self.push(render_line(&payload));
        }
    }

    /// Drop all retained lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Retained lines, newest first.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Number of retained lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the log holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_is_enforced_with_oldest_evicted() {
        let mut log = ActivityLog::default();
        for n in 1..=1005 {
            log.push(format!("line {n}"));
        }
        assert_eq!(log.len(), LOG_CAPACITY);
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines.first().copied(), Some("line 1005"));
        assert_eq!(lines.last().copied(), Some("line 6"));
    }

    #[test]
    fn ingest_renders_structured_entries() {
        let mut log = ActivityLog::default();
        log.ingest(r#"{"hash":"abcdef1234567890","level":"warn","message":"moved file"}"#);
        assert_eq!(log.lines().next(), Some("abcdef12 [warn] moved file"));
    }

    #[test]
    fn ingest_drops_malformed_frames_without_mutation() {
        let mut log = ActivityLog::default();
        log.ingest(r#"{"line":"kept"}"#);
        log.ingest("not json");
        log.ingest(r#"{"taskId":"t1","success":true}"#);
        log.ingest(": heartbeat 1700000000");
        assert_eq!(log.len(), 1);
        assert_eq!(log.lines().next(), Some("kept"));
    }

    #[test]
    fn clear_empties_the_log() {
        let mut log = ActivityLog::default();
        log.push("one".to_string());
        assert!(!log.is_empty());
        log.clear();
        assert!(log.is_empty());
    }
}
