//! Read side of the scan history: list rows, details and confirmed deletes.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::history::{HistoryStore, ScanRecord};
use crate::labels::SeverityTier;
use crate::prompt::Prompter;
use crate::storage::KeyValueStore;

/// Shown instead of the list when there is nothing to show.
pub const EMPTY_MESSAGE: &str = "No history found.";

const UNNAMED: &str = "Unnamed Wound";

/// One line of the history list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub date: String,
    pub badge: &'static str,
}

/// Read-only view of every field of one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordDetail {
    pub id: String,
    pub uri: String,
    pub name: String,
    pub severity: String,
    pub tier: SeverityTier,
    pub description: String,
    pub date: String,
}

impl From<&ScanRecord> for RecordDetail {
    fn from(record: &ScanRecord) -> Self {
        Self {
            id: record.id.clone(),
            uri: record.uri.clone(),
            name: display_name(record),
            severity: record.severity.clone(),
            tier: SeverityTier::from_severity(&record.severity),
            description: record.description.clone(),
            date: record.date.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
    NotFound,
}

/// Holds the records as last loaded, newest first.
pub struct HistoryPresenter<S: KeyValueStore> {
    history: Arc<HistoryStore<S>>,
    records: Vec<ScanRecord>,
    selected: Option<String>,
}

impl<S: KeyValueStore> HistoryPresenter<S> {
    pub fn new(history: Arc<HistoryStore<S>>) -> Self {
        Self {
            history,
            records: Vec::new(),
            selected: None,
        }
    }

    /// Reload from the store. Called whenever the history becomes visible.
    pub fn refresh(&mut self) -> &[ScanRecord] {
        self.records = newest_first(self.history.load_all());
        let still_listed = self
            .selected
            .as_ref()
            .map_or(true, |id| self.records.iter().any(|r| &r.id == id));
        if !still_listed {
            self.selected = None;
        }
        &self.records
    }

    pub fn records(&self) -> &[ScanRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_MESSAGE)
    }

    pub fn rows(&self) -> Vec<HistoryRow> {
        self.records
            .iter()
            .map(|r| HistoryRow {
                id: r.id.clone(),
                name: display_name(r),
                description: r.description.clone(),
                date: r.date.clone(),
                badge: SeverityTier::from_severity(&r.severity).badge(),
            })
            .collect()
    }

    /// Open the detail view for `id`.
    pub fn select(&mut self, id: &str) -> Option<RecordDetail> {
        let detail = self.records.iter().find(|r| r.id == id).map(RecordDetail::from);
        self.selected = detail.as_ref().map(|d| d.id.clone());
        detail
    }

    pub fn selected(&self) -> Option<RecordDetail> {
        let id = self.selected.as_ref()?;
        self.records.iter().find(|r| &r.id == id).map(RecordDetail::from)
    }

    /// Delete `id` after the user confirms.
    pub fn delete(&mut self, id: &str, prompter: &dyn Prompter) -> Result<DeleteOutcome> {
        if !self.records.iter().any(|r| r.id == id) {
            return Ok(DeleteOutcome::NotFound);
        }

        if !prompter.confirm("Delete Entry", "Are you sure you want to delete this entry?") {
            info!("Delete of {} cancelled", id);
            return Ok(DeleteOutcome::Cancelled);
        }

        self.history.delete_by_id(id)?;
        self.records.retain(|r| r.id != id);
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        Ok(DeleteOutcome::Deleted)
    }
}

/// Sort by date, newest first. Equal dates keep store order.
pub fn newest_first(mut records: Vec<ScanRecord>) -> Vec<ScanRecord> {
    records.sort_by(|a, b| b.date.cmp(&a.date));
    records
}

fn display_name(record: &ScanRecord) -> String {
    if record.name.trim().is_empty() {
        UNNAMED.to_string()
    } else {
        record.name.clone()
    }
}
