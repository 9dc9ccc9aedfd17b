use std::sync::Mutex;

use tracing::{info, warn};

use super::types::{HistorySummary, ScanRecord};
use crate::error::{Result, SkinScanError};
use crate::storage::KeyValueStore;

/// Storage key holding the JSON-encoded history array.
pub const HISTORY_KEY: &str = "scan_history";

/// Ordered scan history kept as one JSON document in a key-value store.
///
/// Every mutation is a read-modify-write of the whole document. Mutations
/// go through `write_lock`, so overlapping `append`/`delete_by_id` calls on
/// one `HistoryStore` are applied one after the other.
pub struct HistoryStore<S: KeyValueStore> {
    store: S,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Load every record in insertion order.
    ///
    /// Never fails: a missing key, a read error or an unparsable document
    /// all yield an empty history.
    pub fn load_all(&self) -> Vec<ScanRecord> {
        let raw = match self.store.get(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read scan history, treating as empty: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<ScanRecord>>(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!("Stored scan history is unparsable, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Append a record and persist the whole history.
    ///
    /// Fails without writing when the stored history cannot be read, so an
    /// unreadable document is never overwritten.
    pub fn append(&self, record: ScanRecord) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|p| p.into_inner());

        let mut records = self.load_for_write()?;
        let id = record.id.clone();
        records.push(record);
        self.persist(&records)?;

        info!("Appended scan {} ({} in history)", id, records.len());
        Ok(())
    }

    /// Remove the record with `id`. Returns false (and writes nothing) when
    /// no record matched. Fails without writing when the stored history
    /// cannot be read.
    pub fn delete_by_id(&self, id: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().unwrap_or_else(|p| p.into_inner());

        let mut records = self.load_for_write()?;
        let before = records.len();
        records.retain(|r| r.id != id);

        if records.len() == before {
            info!("No scan {} to delete", id);
            return Ok(false);
        }

        self.persist(&records)?;
        info!("Deleted scan {} ({} remaining)", id, records.len());
        Ok(true)
    }

    /// Find one record by id.
    pub fn find(&self, id: &str) -> Option<ScanRecord> {
        self.load_all().into_iter().find(|r| r.id == id)
    }

    /// Counts and most recent scans, newest first by date.
    pub fn summary(&self) -> HistorySummary {
        let records = self.load_all();
        let healthy = records.iter().filter(|r| r.is_healthy()).count();

        let mut by_date = records.clone();
        by_date.reverse();
        // Stable sort on the reversed list: equal dates keep newest-inserted first
        by_date.sort_by(|a, b| b.date.cmp(&a.date));

        HistorySummary {
            total: records.len(),
            healthy,
            diagnosed: records.len() - healthy,
            latest: by_date.first().cloned(),
            recent: by_date.into_iter().take(2).collect(),
        }
    }

    /// Strict counterpart of `load_all` for read-modify-write: only a missing
    /// key means empty.
    fn load_for_write(&self) -> Result<Vec<ScanRecord>> {
        let raw = match self.store.get(HISTORY_KEY)? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };
        serde_json::from_str(&raw).map_err(|e| {
            warn!("Refusing to rewrite unparsable scan history: {}", e);
            SkinScanError::StorageReadFailed(format!("Stored history is unparsable: {}", e))
        })
    }

    fn persist(&self, records: &[ScanRecord]) -> Result<()> {
        let json = serde_json::to_string(records).map_err(|e| {
            SkinScanError::StorageWriteFailed(format!("Failed to serialize history: {}", e))
        })?;
        self.store.set(HISTORY_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn record(id: &str, name: &str, date: &str) -> ScanRecord {
        ScanRecord {
            id: id.to_string(),
            uri: format!("file:///captures/{}.jpg", id),
            name: name.to_string(),
            severity: "Unknown".to_string(),
            description: "No detailed description available.".to_string(),
            date: date.to_string(),
        }
    }

    #[test]
    fn test_load_all_absent_key() {
        let history = HistoryStore::new(MemoryStore::new());
        assert!(history.load_all().is_empty());
    }

    #[test]
    fn test_load_all_corrupt_blob() {
        let store = MemoryStore::new();
        store.set(HISTORY_KEY, "{not json").unwrap();
        let history = HistoryStore::new(store);
        assert!(history.load_all().is_empty());
    }

    #[test]
    fn test_load_all_wrong_shape() {
        let store = MemoryStore::new();
        store.set(HISTORY_KEY, r#"{"id":"1"}"#).unwrap();
        let history = HistoryStore::new(store);
        assert!(history.load_all().is_empty());
    }

    #[test]
    fn test_append_then_load() {
        let history = HistoryStore::new(MemoryStore::new());
        history.append(record("1", "Cut", "2026-01-01")).unwrap();

        let before = history.load_all().len();
        let added = record("2", "Bruise", "2026-01-02");
        history.append(added.clone()).unwrap();

        let all = history.load_all();
        assert_eq!(all.len(), before + 1);
        assert_eq!(all.last(), Some(&added));
    }

    #[test]
    fn test_append_over_corrupt_blob_leaves_it_untouched() {
        let store = MemoryStore::new();
        let corrupt = r#"[{"id":"1","uri":"file:///a.jpg","name":"Cut","severity":"Moderate Wound","description":"d","date":"2026-01-01"},]"#;
        store.set(HISTORY_KEY, corrupt).unwrap();
        let history = HistoryStore::new(store);

        let result = history.append(record("2", "Bruise", "2026-01-02"));
        assert!(matches!(result, Err(SkinScanError::StorageReadFailed(_))));
        assert_eq!(history.store.get(HISTORY_KEY).unwrap().as_deref(), Some(corrupt));
    }

    #[test]
    fn test_delete_over_corrupt_blob_leaves_it_untouched() {
        let store = MemoryStore::new();
        store.set(HISTORY_KEY, "garbage").unwrap();
        let history = HistoryStore::new(store);

        assert!(history.delete_by_id("1").is_err());
        assert_eq!(history.store.get(HISTORY_KEY).unwrap().as_deref(), Some("garbage"));
    }

    /// Fails the next `get` once armed.
    #[derive(Default)]
    struct FlakyRead {
        inner: MemoryStore,
        fail_next_get: std::sync::atomic::AtomicBool,
    }

    impl KeyValueStore for FlakyRead {
        fn get(&self, key: &str) -> Result<Option<String>> {
            if self
                .fail_next_get
                .swap(false, std::sync::atomic::Ordering::SeqCst)
            {
                return Err(SkinScanError::StorageReadFailed("database is locked".to_string()));
            }
            self.inner.get(key)
        }
        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.inner.set(key, value)
        }
        fn remove(&self, key: &str) -> Result<()> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_read_error_during_append_changes_nothing() {
        let history = HistoryStore::new(FlakyRead::default());
        for id in ["1", "2", "3"] {
            history.append(record(id, "Cut", "2026-01-01")).unwrap();
        }

        history
            .store
            .fail_next_get
            .store(true, std::sync::atomic::Ordering::SeqCst);
        let result = history.append(record("4", "Cut", "2026-01-01"));
        assert!(matches!(result, Err(SkinScanError::StorageReadFailed(_))));

        let ids: Vec<String> = history.load_all().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_delete_by_id() {
        let history = HistoryStore::new(MemoryStore::new());
        history.append(record("1", "Cut", "2026-01-01")).unwrap();
        history.append(record("2", "Bruise", "2026-01-02")).unwrap();
        history.append(record("3", "Abrasion", "2026-01-03")).unwrap();

        assert!(history.delete_by_id("2").unwrap());

        let all = history.load_all();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|r| r.id != "2"));
        // Remaining order preserved
        assert_eq!(all[0].id, "1");
        assert_eq!(all[1].id, "3");
    }

    #[test]
    fn test_delete_missing_id_is_noop() {
        let history = HistoryStore::new(MemoryStore::new());
        history.append(record("1", "Cut", "2026-01-01")).unwrap();

        assert!(!history.delete_by_id("nope").unwrap());
        assert_eq!(history.load_all().len(), 1);
    }

    #[test]
    fn test_delete_only_record_leaves_empty() {
        let history = HistoryStore::new(MemoryStore::new());
        history.append(record("1", "Cut", "2026-01-01")).unwrap();

        assert!(history.delete_by_id("1").unwrap());
        assert!(history.load_all().is_empty());
    }

    #[test]
    fn test_find() {
        let history = HistoryStore::new(MemoryStore::new());
        history.append(record("1", "Cut", "2026-01-01")).unwrap();

        assert_eq!(history.find("1").unwrap().name, "Cut");
        assert!(history.find("2").is_none());
    }

    #[test]
    fn test_summary_counts_and_recent() {
        let history = HistoryStore::new(MemoryStore::new());
        history.append(record("1", "Healthy Skin", "2026-01-05")).unwrap();
        history.append(record("2", "Cut", "2026-01-01")).unwrap();
        history.append(record("3", "Bruise", "2026-01-09")).unwrap();
        history.append(record("4", "Wart", "2026-01-09")).unwrap();

        let summary = history.summary();
        assert_eq!(summary.total, 4);
        assert_eq!(summary.healthy, 1);
        assert_eq!(summary.diagnosed, 3);
        // Same date: the later insertion is the latest
        assert_eq!(summary.latest.unwrap().id, "4");
        let recent: Vec<&str> = summary.recent.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(recent, vec!["4", "3"]);
    }

    #[test]
    fn test_summary_empty() {
        let history = HistoryStore::new(MemoryStore::new());
        let summary = history.summary();
        assert_eq!(summary.total, 0);
        assert!(summary.latest.is_none());
        assert!(summary.recent.is_empty());
    }

    #[test]
    fn test_concurrent_appends_are_not_lost() {
        use std::sync::Arc;

        let history = Arc::new(HistoryStore::new(MemoryStore::new()));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let history = Arc::clone(&history);
                std::thread::spawn(move || {
                    history
                        .append(record(&i.to_string(), "Cut", "2026-01-01"))
                        .unwrap();
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(history.load_all().len(), 8);
    }
}
