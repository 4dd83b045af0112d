/// Calculator Kernel: History Log
///
/// Newest first, capped at `HISTORY_CAPACITY`. Overflow silently drops
/// the oldest entry.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::tokens::{BinaryOp, UnaryOp};
use crate::HISTORY_CAPACITY;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct HistoryLog {
    entries: VecDeque<String>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the front, truncating the tail to capacity.
    pub fn record(&mut self, entry: String) {
        self.entries.push_front(entry);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    /// Newest entry, if any.
    pub fn latest(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    /// Entries newest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }
}

impl From<Vec<String>> for HistoryLog {
    fn from(mut entries: Vec<String>) -> Self {
        entries.truncate(HISTORY_CAPACITY);
        Self {
            entries: entries.into(),
        }
    }
}

impl From<HistoryLog> for Vec<String> {
    fn from(log: HistoryLog) -> Self {
        log.entries.into()
    }
}

/// `"<a> <op> <b> = <result>"`
pub fn binary_entry(a: &str, op: BinaryOp, b: &str, result: &str) -> String {
    format!("{} {} {} = {}", a, op.symbol(), b, result)
}

/// `"<fn>(<x>) = <result>"`
pub fn special_entry(op: UnaryOp, x: &str, result: &str) -> String {
    format!("{}({}) = {}", op.symbol(), x, result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first() {
        let mut log = HistoryLog::new();
        log.record("a".to_string());
        log.record("b".to_string());
        assert_eq!(log.latest(), Some("b"));
        assert_eq!(log.to_vec(), vec!["b", "a"]);
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut log = HistoryLog::new();
        for i in 0..8 {
            log.record(format!("entry {}", i));
        }
        assert_eq!(log.len(), HISTORY_CAPACITY);
        assert_eq!(log.latest(), Some("entry 7"));
        assert_eq!(log.iter().last(), Some("entry 3"));
    }

    #[test]
    fn test_no_deduplication() {
        let mut log = HistoryLog::new();
        log.record("x²(3) = 9".to_string());
        log.record("x²(3) = 9".to_string());
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_entry_text() {
        assert_eq!(binary_entry("7", BinaryOp::Add, "3", "10"), "7 + 3 = 10");
        assert_eq!(special_entry(UnaryOp::Square, "9", "81"), "x²(9) = 81");
        assert_eq!(special_entry(UnaryOp::Reciprocal, "4", "0.25"), "1/x(4) = 0.25");
    }

    #[test]
    fn test_deserialize_truncates() {
        let log: HistoryLog = serde_json::from_str(r#"["1","2","3","4","5","6","7"]"#).unwrap();
        assert_eq!(log.len(), HISTORY_CAPACITY);
        assert_eq!(log.latest(), Some("1"));
    }
}
