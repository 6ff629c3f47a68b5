//! Core types for the expense ledger

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::time::parse::parse_timestamp_ms;
use crate::timeline::types::{EventBounds, TimedItem};

/// A shared expense paid by one participant on behalf of several.
///
/// The amount is split equally among `participants`; the payer may or may
/// not be one of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: Uuid,
    /// Human-readable description
    pub description: String,
    /// Amount in `currency` units, positive
    pub amount: f64,
    /// ISO 4217 currency code, e.g. "USD"
    pub currency: String,
    /// ISO-8601 date or date-time the expense occurred
    pub date: String,
    /// Participant who paid
    pub paid_by: String,
    /// Participants sharing the expense
    pub participants: Vec<String>,
}

impl Expense {
    /// Create a new expense with a fresh id.
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        currency: impl Into<String>,
        date: impl Into<String>,
        paid_by: impl Into<String>,
        participants: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount,
            currency: currency.into(),
            date: date.into(),
            paid_by: paid_by.into(),
            participants,
        }
    }

    /// Equal share per participant; zero for an empty participant list.
    pub fn share(&self) -> f64 {
        if self.participants.is_empty() {
            0.0
        } else {
            self.amount / self.participants.len() as f64
        }
    }

    /// Whether the given participant paid or owes a share.
    pub fn involves(&self, name: &str) -> bool {
        self.paid_by == name || self.participants.iter().any(|p| p == name)
    }

    /// The expense date as epoch milliseconds (NaN if unparseable).
    pub fn date_ms(&self) -> f64 {
        parse_timestamp_ms(&self.date)
    }
}

impl From<&Expense> for TimedItem {
    fn from(expense: &Expense) -> Self {
        TimedItem {
            id: expense.id.to_string(),
            timestamp: expense.date.clone(),
        }
    }
}

/// Event descriptor supplying the timeline bounds and the participant roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventInfo {
    /// Event name
    pub name: String,
    /// ISO-8601 start of the event
    pub start_date: String,
    /// ISO-8601 end of the event, absent while ongoing
    #[serde(default)]
    pub end_date: Option<String>,
    /// Everyone taking part in the event
    #[serde(default)]
    pub participants: Vec<String>,
}

impl EventInfo {
    /// Create a new event descriptor.
    pub fn new(name: impl Into<String>, start_date: impl Into<String>, end_date: Option<&str>) -> Self {
        Self {
            name: name.into(),
            start_date: start_date.into(),
            end_date: end_date.map(str::to_owned),
            participants: Vec::new(),
        }
    }

    /// Attach the participant roster.
    pub fn with_participants(mut self, participants: Vec<String>) -> Self {
        self.participants = participants;
        self
    }

    /// The event's timeline bounds.
    pub fn bounds(&self) -> EventBounds {
        EventBounds {
            start: self.start_date.clone(),
            end: self.end_date.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_expense_share_equal_split() {
        let e = Expense::new(
            "dinner",
            90.0,
            "USD",
            "2023-06-05",
            "ana",
            names(&["ana", "ben", "cris"]),
        );
        assert!((e.share() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_expense_share_empty_participants() {
        let e = Expense::new("orphan", 90.0, "USD", "2023-06-05", "ana", vec![]);
        assert_eq!(e.share(), 0.0);
    }

    #[test]
    fn test_expense_involves() {
        let e = Expense::new(
            "taxi",
            20.0,
            "USD",
            "2023-06-05",
            "ana",
            names(&["ben", "cris"]),
        );
        assert!(e.involves("ana"));
        assert!(e.involves("ben"));
        assert!(!e.involves("dora"));
    }

    #[test]
    fn test_expense_to_timed_item() {
        let e = Expense::new("museum", 15.0, "EUR", "2023-06-07", "ben", names(&["ben"]));
        let item = TimedItem::from(&e);
        assert_eq!(item.id, e.id.to_string());
        assert_eq!(item.timestamp, "2023-06-07");
    }

    #[test]
    fn test_expense_date_ms() {
        let e = Expense::new("x", 1.0, "USD", "1970-01-02", "ana", names(&["ana"]));
        assert_eq!(e.date_ms(), 86_400_000.0);
    }

    #[test]
    fn test_event_info_bounds() {
        let info = EventInfo::new("trip", "2023-06-01", Some("2023-06-10"));
        let bounds = info.bounds();
        assert_eq!(bounds.start, "2023-06-01");
        assert_eq!(bounds.end.as_deref(), Some("2023-06-10"));
    }

    #[test]
    fn test_event_info_ongoing_bounds() {
        let info = EventInfo::new("trip", "2023-06-01", None);
        assert!(info.bounds().is_ongoing());
    }

    #[test]
    fn test_event_info_deserialize_defaults() {
        let info: EventInfo =
            serde_json::from_str(r#"{"name":"trip","start_date":"2023-06-01"}"#).unwrap();
        assert!(info.end_date.is_none());
        assert!(info.participants.is_empty());
    }

    #[test]
    fn test_expense_serialization_roundtrip() {
        let e = Expense::new(
            "hotel",
            240.5,
            "EUR",
            "2023-06-03T14:00:00Z",
            "cris",
            names(&["ana", "ben", "cris"]),
        );
        let json = serde_json::to_string(&e).unwrap();
        let back: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(back, e);
    }
}
