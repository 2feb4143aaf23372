//! Event Log
//!
//! Append-only, insertion-ordered history of recorded events.

use serde::{Deserialize, Serialize};

use crate::record::EventRecord;

/// Ordered, append-only sequence of [`EventRecord`]s.
///
/// Serializes transparently as a JSON array, which is the exported diary
/// document format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a log from records already in order.
    pub fn from_records(records: Vec<EventRecord>) -> Self {
        Self { records }
    }

    /// Appends a record at the tail. Duplicates are distinct entries.
    pub fn append(&mut self, record: EventRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EventRecord> {
        self.records.iter()
    }

    /// The most recently appended record.
    pub fn last(&self) -> Option<&EventRecord> {
        self.records.last()
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a EventRecord;
    type IntoIter = std::slice::Iter<'a, EventRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::InterpretationRecord;

    fn record(event: &str) -> EventRecord {
        EventRecord::new(
            "2024-03-01",
            "Hans",
            event,
            [
                InterpretationRecord::new("a", 20.0),
                InterpretationRecord::new("b", 30.0),
                InterpretationRecord::new("c", 50.0),
            ],
        )
    }

    #[test]
    fn test_empty_log() {
        let log = EventLog::new();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
        assert!(log.last().is_none());
    }

    #[test]
    fn test_append_preserves_order() {
        let mut log = EventLog::new();
        log.append(record("first"));
        log.append(record("second"));
        log.append(record("third"));

        let labels: Vec<_> = log.iter().map(|r| r.event_label.as_str()).collect();
        assert_eq!(labels, vec!["first", "second", "third"]);
        assert_eq!(log.last().unwrap().event_label, "third");
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut log = EventLog::new();
        log.append(record("same"));
        log.append(record("same"));

        assert_eq!(log.len(), 2);
        assert_eq!(log.records()[0], log.records()[1]);
    }

    #[test]
    fn test_serializes_as_array() {
        let mut log = EventLog::new();
        log.append(record("first"));

        let json = serde_json::to_string(&log).unwrap();
        assert!(json.starts_with('['));
        assert!(json.ends_with(']'));
    }
}
