//! Diary sessions.
//!
//! A [`Session`] owns one event log for its whole lifetime. Hosts serving
//! several users keep one session per user in a [`SessionRegistry`]; logs
//! are never shared between sessions.

use std::collections::HashMap;
use std::fmt;

use diary_events::{EventLog, EventRecord};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entry::EventEntry;
use crate::projection::{to_graph, to_rows, EmotionGraph, NodeKeying, TableRow};

/// Today's local calendar date as `YYYY-MM-DD`.
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Unique identifier of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ses_{}", self.0.simple())
    }
}

/// One user's diary session.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    owner_name: String,
    log: EventLog,
}

impl Session {
    /// Starts a session with an empty log.
    pub fn new(owner_name: impl Into<String>) -> Self {
        Self::with_log(owner_name, EventLog::new())
    }

    /// Starts a session seeded with an existing log, e.g. an imported diary.
    pub fn with_log(owner_name: impl Into<String>, log: EventLog) -> Self {
        let session = Self {
            id: SessionId::new(),
            owner_name: owner_name.into(),
            log,
        };
        tracing::info!(
            session = %session.id,
            owner = %session.owner_name,
            events = session.log.len(),
            "Session started"
        );
        session
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Clamps the entry, runs the posterior engine, and appends the
    /// resulting record dated `date`.
    pub fn add_event(&mut self, entry: &EventEntry, date: &str) -> &EventRecord {
        if entry.has_out_of_range() {
            tracing::warn!(event = %entry.event_label, "Clamping out-of-range probabilities");
        }
        let record = entry.clamped().to_record(date, self.owner_name.clone());

        tracing::info!(
            session = %self.id,
            event = %record.event_label,
            date = %record.date,
            dominant = %record.dominant_interpretation().label,
            "Event added"
        );

        self.log.append(record);
        &self.log.records()[self.log.len() - 1]
    }

    /// Same as [`add_event`](Self::add_event) using today's date.
    pub fn add_event_today(&mut self, entry: &EventEntry) -> &EventRecord {
        self.add_event(entry, &today())
    }

    /// Table projection of the full log.
    pub fn table(&self) -> Vec<TableRow> {
        to_rows(&self.log)
    }

    /// Graph projection of the full log.
    pub fn graph(&self, keying: NodeKeying) -> EmotionGraph {
        to_graph(&self.log, keying)
    }

    /// Ends the session, handing back its log.
    pub fn into_log(self) -> EventLog {
        self.log
    }
}

/// Isolated sessions keyed by id.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<SessionId, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new empty session and returns its id.
    pub fn open(&mut self, owner_name: impl Into<String>) -> SessionId {
        self.insert(Session::new(owner_name))
    }

    /// Adds an existing session, returning its id.
    pub fn insert(&mut self, session: Session) -> SessionId {
        let id = session.id();
        self.sessions.insert(id, session);
        id
    }

    pub fn get(&self, id: SessionId) -> Option<&Session> {
        self.sessions.get(&id)
    }

    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.sessions.get_mut(&id)
    }

    /// Closes a session, discarding it. Returns the session if it existed.
    pub fn close(&mut self, id: SessionId) -> Option<Session> {
        let session = self.sessions.remove(&id);
        if let Some(ref s) = session {
            tracing::info!(session = %id, events = s.log().len(), "Session closed");
        }
        session
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_event_appends_record() {
        let mut session = Session::new("Hans");
        let record = session.add_event(&EventEntry::default(), "2024-03-01");

        assert_eq!(record.owner_name, "Hans");
        assert_eq!(record.date, "2024-03-01");
        assert_eq!(record.interpretations[1].posterior_percent, 85.7);
        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn test_add_event_clamps_input() {
        let mut session = Session::new("Hans");
        let entry = EventEntry::new(
            "x",
            ["a".into(), "b".into(), "c".into()],
            [2.0, 0.0, -1.0],
            [0.5, 0.5, 0.5],
        );
        let record = session.add_event(&entry, "2024-03-01");

        let percents: Vec<f64> = record
            .interpretations
            .iter()
            .map(|i| i.posterior_percent)
            .collect();
        assert_eq!(percents, vec![100.0, 0.0, 0.0]);
    }

    #[test]
    fn test_add_event_today_uses_calendar_date() {
        let mut session = Session::new("Hans");
        let date = session.add_event_today(&EventEntry::default()).date.clone();

        assert_eq!(date.len(), 10);
        assert!(chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_ok());
    }

    #[test]
    fn test_projections_follow_log() {
        let mut session = Session::new("Hans");
        session.add_event(&EventEntry::default(), "2024-03-01");
        session.add_event(&EventEntry::default(), "2024-03-02");

        assert_eq!(session.table().len(), 6);
        assert_eq!(session.graph(NodeKeying::Label).node_count(), 5);
        assert_eq!(session.graph(NodeKeying::Record).node_count(), 8);
    }

    #[test]
    fn test_with_log_seeds_session() {
        let mut first = Session::new("Hans");
        first.add_event(&EventEntry::default(), "2024-03-01");

        let resumed = Session::with_log("Hans", first.into_log());
        assert_eq!(resumed.log().len(), 1);
    }

    #[test]
    fn test_session_id_display() {
        let id = SessionId::new();
        let text = id.to_string();
        assert!(text.starts_with("ses_"));
        assert_eq!(text.len(), 4 + 32);
        assert_ne!(id, SessionId::new());
    }

    #[test]
    fn test_registry_isolates_sessions() {
        let mut registry = SessionRegistry::new();
        let hans = registry.open("Hans");
        let ada = registry.open("Ada");
        assert_eq!(registry.len(), 2);

        registry
            .get_mut(hans)
            .unwrap()
            .add_event(&EventEntry::default(), "2024-03-01");

        assert_eq!(registry.get(hans).unwrap().log().len(), 1);
        assert!(registry.get(ada).unwrap().log().is_empty());
        assert_eq!(registry.get(ada).unwrap().owner_name(), "Ada");
    }

    #[test]
    fn test_registry_close_discards_log() {
        let mut registry = SessionRegistry::new();
        let id = registry.open("Hans");
        registry
            .get_mut(id)
            .unwrap()
            .add_event(&EventEntry::default(), "2024-03-01");

        let closed = registry.close(id).unwrap();
        assert_eq!(closed.log().len(), 1);
        assert!(registry.get(id).is_none());
        assert!(registry.is_empty());
        assert!(registry.close(id).is_none());
    }
}
