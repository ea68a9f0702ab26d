//! Shared test-only helpers for downtime_core.

use crate::db::RangeStore;
use crate::models::range::{DowntimeRange, RangeIdentity};
use crate::{AppError, Database};
use std::cell::RefCell;
use std::collections::BTreeMap;
use tempfile::TempDir;

/// Creates an isolated temporary database and returns it with the temp dir.
///
/// Keep the [`TempDir`] alive for the full test to preserve the backing files.
///
/// # Panics
/// Panics if temp-dir creation, path conversion, or database initialization
/// fails in the test environment.
pub(crate) fn setup_temp_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("db");
    let db = Database::new(db_path.to_str().expect("db path")).expect("db");
    (db, temp_dir)
}

/// Recorded storage call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreCall {
    Upsert(String, DowntimeRange),
    Delete(String, RangeIdentity),
}

/// In-memory [`RangeStore`] that records every call and can fail on demand.
#[derive(Default)]
pub(crate) struct RecordingStore {
    pub(crate) rows: RefCell<BTreeMap<(String, i64, String), DowntimeRange>>,
    pub(crate) calls: RefCell<Vec<StoreCall>>,
    pub(crate) fail_upsert_of: Option<String>,
}

impl RecordingStore {
    pub(crate) fn seeded(table: &str, rows: &[DowntimeRange]) -> Self {
        let store = Self::default();
        for row in rows {
            let parent_id = row.scheduled_downtime_id.expect("seeded row parent");
            store.rows.borrow_mut().insert(
                (table.to_string(), parent_id, row.range_key.clone()),
                row.clone(),
            );
        }
        store
    }

    pub(crate) fn upserted_keys(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                StoreCall::Upsert(_, range) => Some(range.range_key.clone()),
                StoreCall::Delete(..) => None,
            })
            .collect()
    }

    pub(crate) fn deleted_keys(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                StoreCall::Delete(_, identity) => Some(identity.range_key.clone()),
                StoreCall::Upsert(..) => None,
            })
            .collect()
    }
}

impl RangeStore for RecordingStore {
    fn load_ranges(&self, table: &str, parent_id: i64) -> Result<Vec<DowntimeRange>, AppError> {
        Ok(self
            .rows
            .borrow()
            .iter()
            .filter(|((t, pid, _), _)| t == table && *pid == parent_id)
            .map(|(_, row)| row.clone())
            .collect())
    }

    fn upsert_range(&self, table: &str, range: &DowntimeRange) -> Result<(), AppError> {
        if self.fail_upsert_of.as_deref() == Some(range.range_key.as_str()) {
            return Err(AppError::StorageMessage(format!(
                "rejected {}",
                range.range_key
            )));
        }
        let parent_id = range
            .scheduled_downtime_id
            .ok_or_else(|| AppError::MissingParentId(table.to_string()))?;
        self.calls
            .borrow_mut()
            .push(StoreCall::Upsert(table.to_string(), range.clone()));
        self.rows.borrow_mut().insert(
            (table.to_string(), parent_id, range.range_key.clone()),
            range.clone(),
        );
        Ok(())
    }

    fn delete_range(&self, table: &str, identity: &RangeIdentity) -> Result<bool, AppError> {
        self.calls
            .borrow_mut()
            .push(StoreCall::Delete(table.to_string(), identity.clone()));
        Ok(self
            .rows
            .borrow_mut()
            .remove(&(
                table.to_string(),
                identity.parent_id,
                identity.range_key.clone(),
            ))
            .is_some())
    }
}
