//! Sample data fixtures for testing.
//!
//! This module provides ready-made test data for other crates to use.
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // diary-events = { path = "../diary-events", features = ["test-fixtures"] }
//!
//! use diary_events::fixtures;
//!
//! let log = fixtures::sample_log();
//! ```

use crate::{EventLog, EventRecord, InterpretationRecord};

/// Raw JSON of the sample diary document.
pub const SAMPLE_DIARY_JSON: &str = include_str!("../tests/fixtures/sample_diary.json");

/// Returns the sample diary from the fixtures file.
///
/// Contains 4 events:
/// - "Crítica" on 2024-03-01 (the worked example: 3.6 / 85.7 / 10.7)
/// - "Silencio" on 2024-03-02, recorded twice with the same event label and
///   date, sharing one identical interpretation ("Está ocupado (60.0%)")
/// - "Nada" on 2024-03-03 with zero evidence (all posteriors 0)
pub fn sample_log() -> EventLog {
    EventLog::from_json(SAMPLE_DIARY_JSON).expect("Failed to parse sample_diary.json")
}

/// Returns the worked example record: priors (0.2, 0.6, 0.2),
/// likelihoods (0.1, 0.8, 0.3).
pub fn criticism_record() -> EventRecord {
    EventRecord::new(
        "2024-03-01",
        "Hans",
        "Crítica",
        [
            InterpretationRecord::new("Me ayudan", 3.6),
            InterpretationRecord::new("Me humillan", 85.7),
            InterpretationRecord::new("Reflexiono", 10.7),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_log_loads() {
        let log = sample_log();
        assert_eq!(log.len(), 4);
        assert_eq!(log.records()[0], criticism_record());
        assert_eq!(log.records()[3].posterior_total(), 0.0);
    }
}
