//! Event Records
//!
//! One recorded emotional event and its three scored interpretations.
//!
//! Field names on the wire follow the exported diary format
//! (`fecha`, `nombre`, `evento`, `interpretaciones`, `respuesta`, `posterior`).

use serde::{Deserialize, Serialize};

/// Number of candidate interpretations attached to every event.
pub const INTERPRETATIONS_PER_EVENT: usize = 3;

/// Renders a stored percentage exactly as stored, with a `%` suffix.
///
/// Whole numbers keep a trailing `.0` (`100.0%`). Other values print their
/// shortest exact form, so an imported `33.33` stays `33.33%`.
pub fn format_percent(percent: f64) -> String {
    if percent.is_finite() && percent.fract() == 0.0 {
        format!("{:.1}%", percent)
    } else {
        format!("{}%", percent)
    }
}

/// One interpretation of an event with its posterior, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpretationRecord {
    /// Free-text interpretation label
    #[serde(rename = "respuesta")]
    pub label: String,
    /// Posterior probability in percent (0-100)
    #[serde(rename = "posterior")]
    pub posterior_percent: f64,
}

impl InterpretationRecord {
    /// Creates a new interpretation record.
    pub fn new(label: impl Into<String>, posterior_percent: f64) -> Self {
        Self {
            label: label.into(),
            posterior_percent,
        }
    }

    /// Posterior rendered as `"85.7%"`.
    pub fn formatted_posterior(&self) -> String {
        format_percent(self.posterior_percent)
    }

    /// Display label used for graph nodes: `"{label} ({percent}%)"`.
    pub fn node_label(&self) -> String {
        format!("{} ({})", self.label, self.formatted_posterior())
    }
}

/// A recorded emotional event.
///
/// Records are created once per "add event" action and never change after
/// being appended to an [`EventLog`](crate::EventLog).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Calendar date the event was recorded on
    #[serde(rename = "fecha")]
    pub date: String,
    /// Name of the diary owner
    #[serde(rename = "nombre")]
    pub owner_name: String,
    /// Free-text event label
    #[serde(rename = "evento")]
    pub event_label: String,
    /// Exactly three interpretations, in entry order
    #[serde(rename = "interpretaciones")]
    pub interpretations: [InterpretationRecord; INTERPRETATIONS_PER_EVENT],
}

impl EventRecord {
    /// Creates a new event record.
    pub fn new(
        date: impl Into<String>,
        owner_name: impl Into<String>,
        event_label: impl Into<String>,
        interpretations: [InterpretationRecord; INTERPRETATIONS_PER_EVENT],
    ) -> Self {
        Self {
            date: date.into(),
            owner_name: owner_name.into(),
            event_label: event_label.into(),
            interpretations,
        }
    }

    /// Display label used for graph nodes: `"{event} ({date})"`.
    pub fn node_label(&self) -> String {
        format!("{} ({})", self.event_label, self.date)
    }

    /// Sum of the stored posterior percentages.
    ///
    /// Close to 100 for any record whose evidence was nonzero, 0 otherwise.
    pub fn posterior_total(&self) -> f64 {
        self.interpretations.iter().map(|i| i.posterior_percent).sum()
    }

    /// Returns the interpretation with the highest posterior.
    ///
    /// Ties resolve to the earliest interpretation.
    pub fn dominant_interpretation(&self) -> &InterpretationRecord {
        let mut best = &self.interpretations[0];
        for interp in &self.interpretations[1..] {
            if interp.posterior_percent > best.posterior_percent {
                best = interp;
            }
        }
        best
    }
}
