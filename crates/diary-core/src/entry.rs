//! Event entry form.
//!
//! The input surface for one "add event" action: an event label, three
//! interpretation labels, and a prior and likelihood per interpretation.

use diary_events::{EventRecord, InterpretationRecord};
use serde::{Deserialize, Serialize};

use crate::posterior::{PosteriorUpdate, HYPOTHESES};

/// Clamps a probability into [0, 1]. NaN becomes 0.
pub fn clamp_probability(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// User input for a single event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventEntry {
    /// Free-text event label
    pub event_label: String,
    /// Candidate interpretations, in display order
    pub interpretations: [String; HYPOTHESES],
    /// Prior belief per interpretation
    pub priors: [f64; HYPOTHESES],
    /// Probability of the stimulus given each interpretation
    pub likelihoods: [f64; HYPOTHESES],
}

impl Default for EventEntry {
    fn default() -> Self {
        Self {
            event_label: "Crítica".to_string(),
            interpretations: [
                "Me ayudan".to_string(),
                "Me humillan".to_string(),
                "Reflexiono".to_string(),
            ],
            priors: [0.2, 0.6, 0.2],
            likelihoods: [0.1, 0.8, 0.3],
        }
    }
}

impl EventEntry {
    /// Creates a new entry.
    pub fn new(
        event_label: impl Into<String>,
        interpretations: [String; HYPOTHESES],
        priors: [f64; HYPOTHESES],
        likelihoods: [f64; HYPOTHESES],
    ) -> Self {
        Self {
            event_label: event_label.into(),
            interpretations,
            priors,
            likelihoods,
        }
    }

    /// Returns a copy with every probability clamped into [0, 1].
    pub fn clamped(&self) -> Self {
        Self {
            event_label: self.event_label.clone(),
            interpretations: self.interpretations.clone(),
            priors: self.priors.map(clamp_probability),
            likelihoods: self.likelihoods.map(clamp_probability),
        }
    }

    /// True if any prior or likelihood lies outside [0, 1] or is NaN.
    pub fn has_out_of_range(&self) -> bool {
        self.priors
            .iter()
            .chain(self.likelihoods.iter())
            .any(|v| !(0.0..=1.0).contains(v))
    }

    /// Runs the posterior engine on this entry as given.
    pub fn posterior_update(&self) -> PosteriorUpdate {
        PosteriorUpdate::compute(self.priors, self.likelihoods)
    }

    /// Computes posteriors and builds the record to append.
    ///
    /// Percentages are rounded to one decimal here and never re-derived.
    pub fn to_record(&self, date: impl Into<String>, owner_name: impl Into<String>) -> EventRecord {
        let percents = self.posterior_update().percents();
        let [a, b, c] = &self.interpretations;

        EventRecord::new(
            date,
            owner_name,
            self.event_label.clone(),
            [
                InterpretationRecord::new(a.clone(), percents[0]),
                InterpretationRecord::new(b.clone(), percents[1]),
                InterpretationRecord::new(c.clone(), percents[2]),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_entry_matches_worked_example() {
        let record = EventEntry::default().to_record("2024-03-01", "Hans");

        assert_eq!(record.event_label, "Crítica");
        assert_eq!(record.owner_name, "Hans");
        assert_eq!(record.date, "2024-03-01");

        let percents: Vec<f64> = record
            .interpretations
            .iter()
            .map(|i| i.posterior_percent)
            .collect();
        assert_eq!(percents, vec![3.6, 85.7, 10.7]);
        assert_eq!(record.interpretations[1].label, "Me humillan");
    }

    #[test]
    fn test_clamp_probability() {
        assert_eq!(clamp_probability(-0.5), 0.0);
        assert_eq!(clamp_probability(1.5), 1.0);
        assert_eq!(clamp_probability(0.25), 0.25);
        assert_eq!(clamp_probability(f64::NAN), 0.0);
    }

    #[test]
    fn test_clamped_entry() {
        let entry = EventEntry::new(
            "x",
            ["a".into(), "b".into(), "c".into()],
            [-1.0, 0.5, 2.0],
            [0.3, f64::NAN, 1.0],
        );
        assert!(entry.has_out_of_range());

        let clamped = entry.clamped();
        assert!(!clamped.has_out_of_range());
        assert_eq!(clamped.priors, [0.0, 0.5, 1.0]);
        assert_eq!(clamped.likelihoods, [0.3, 0.0, 1.0]);
        assert_eq!(clamped.interpretations, entry.interpretations);
    }

    #[test]
    fn test_empty_labels_are_valid() {
        let entry = EventEntry::new(
            "",
            [String::new(), String::new(), String::new()],
            [0.2, 0.6, 0.2],
            [0.1, 0.8, 0.3],
        );
        let record = entry.to_record("", "");

        assert_eq!(record.event_label, "");
        assert_eq!(record.node_label(), " ()");
        assert_eq!(record.interpretations[0].node_label(), " (3.6%)");
    }

    #[test]
    fn test_degenerate_record() {
        let entry = EventEntry::new(
            "Nada",
            ["a".into(), "b".into(), "c".into()],
            [0.2, 0.6, 0.2],
            [0.0, 0.0, 0.0],
        );
        let record = entry.to_record("2024-03-03", "Hans");
        assert_eq!(record.posterior_total(), 0.0);
    }
}
