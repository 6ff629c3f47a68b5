//! Event Document Persistence
//!
//! Defines the serialization format for an event and its expenses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

use crate::ledger::types::{EventInfo, Expense};
use crate::time::parse::parse_timestamp_ms;
use crate::timeline::types::{EventBounds, TimedItem};

/// Current document format version
pub const CURRENT_FORMAT_VERSION: &str = "1.0";

/// Document metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentMetadata {
    /// Unique document ID
    pub id: Uuid,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Version of the document format
    pub format_version: String,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            format_version: CURRENT_FORMAT_VERSION.to_string(),
        }
    }
}

/// An event together with its expenses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDocument {
    /// Document metadata
    #[serde(default)]
    pub metadata: DocumentMetadata,
    /// Event descriptor
    pub event: EventInfo,
    /// Expenses in entry order
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl EventDocument {
    /// Create a new document for an event with no expenses yet.
    pub fn new(event: EventInfo) -> Self {
        Self {
            metadata: DocumentMetadata::default(),
            event,
            expenses: Vec::new(),
        }
    }

    /// Add an expense.
    pub fn add_expense(&mut self, expense: Expense) {
        self.expenses.push(expense);
    }

    /// Number of expenses.
    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    /// Whether the document has no expenses.
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// The event's timeline bounds.
    pub fn bounds(&self) -> EventBounds {
        self.event.bounds()
    }

    /// Project the expenses onto the timeline input shape.
    pub fn items(&self) -> Vec<TimedItem> {
        self.expenses.iter().map(TimedItem::from).collect()
    }

    /// Expenses paid by the given participant.
    pub fn expenses_paid_by(&self, name: &str) -> Vec<&Expense> {
        self.expenses.iter().filter(|e| e.paid_by == name).collect()
    }

    /// Save the document to a file as pretty JSON.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a document from a file.
    ///
    /// Logs a warning if the document was saved with an unknown format
    /// version, but still attempts to deserialize it (forward-compatible
    /// via `#[serde(default)]`).
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let document: EventDocument = serde_json::from_str(&content)?;
        if document.metadata.format_version != CURRENT_FORMAT_VERSION {
            tracing::warn!(
                event = %document.event.name,
                found = %document.metadata.format_version,
                expected = CURRENT_FORMAT_VERSION,
                "Document has different format version; some fields may use default values"
            );
        }
        Ok(document)
    }

    /// Validate the document against the obligations the timeline core
    /// leaves to its callers.
    ///
    /// The mapper itself never guards degenerate bounds or bad dates;
    /// this is the upstream gate for callers who want to reject them
    /// before layout instead of rendering clamped markers.
    pub fn validate(&self) -> crate::Result<()> {
        if self.event.name.trim().is_empty() {
            return Err(crate::Error::Document("event name must not be empty".into()));
        }

        let start = parse_timestamp_ms(&self.event.start_date);
        if start.is_nan() {
            return Err(crate::Error::Document(format!(
                "unparseable start date '{}'",
                self.event.start_date
            )));
        }
        if let Some(end_date) = &self.event.end_date {
            let end = parse_timestamp_ms(end_date);
            if end.is_nan() {
                return Err(crate::Error::Document(format!(
                    "unparseable end date '{end_date}'"
                )));
            }
            if end <= start {
                return Err(crate::Error::Document(format!(
                    "event ends at or before it starts ({} .. {end_date})",
                    self.event.start_date
                )));
            }
        }

        for expense in &self.expenses {
            if !(expense.amount.is_finite() && expense.amount > 0.0) {
                return Err(crate::Error::Document(format!(
                    "expense '{}' has non-positive amount {}",
                    expense.description, expense.amount
                )));
            }
            if expense.currency.trim().is_empty() {
                return Err(crate::Error::Document(format!(
                    "expense '{}' has no currency",
                    expense.description
                )));
            }
            if expense.date_ms().is_nan() {
                return Err(crate::Error::Document(format!(
                    "expense '{}' has unparseable date '{}'",
                    expense.description, expense.date
                )));
            }
            if expense.participants.is_empty() {
                return Err(crate::Error::Document(format!(
                    "expense '{}' has no participants",
                    expense.description
                )));
            }
            if !self.event.participants.is_empty() {
                let roster = &self.event.participants;
                if !roster.contains(&expense.paid_by) {
                    return Err(crate::Error::Document(format!(
                        "expense '{}' paid by '{}' who is not in the event roster",
                        expense.description, expense.paid_by
                    )));
                }
                if let Some(stranger) = expense.participants.iter().find(|p| !roster.contains(p)) {
                    return Err(crate::Error::Document(format!(
                        "expense '{}' includes '{stranger}' who is not in the event roster",
                        expense.description
                    )));
                }
            }
        }

        Ok(())
    }
}
