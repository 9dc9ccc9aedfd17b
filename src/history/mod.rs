//! Locally persisted scan history.

mod store;
mod types;

pub use store::{HistoryStore, HISTORY_KEY};
pub use types::{HistorySummary, ScanRecord};
