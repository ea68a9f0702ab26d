//! Range row storage backed by redb.

use crate::{db::tables::range_table, error::AppError, models::range::*};
use redb::{ReadableDatabase, ReadableTable, ReadableTableMetadata, TableError};
use std::sync::Arc;

/// Storage operations a [`crate::RangeSet`] needs to load and store itself.
///
/// `table` is the owner's range table name.
pub trait RangeStore {
    /// Fetch every row belonging to `parent_id`, ordered by range key.
    ///
    /// # Errors
    /// Returns an error when the storage backend fails.
    fn load_ranges(&self, table: &str, parent_id: i64) -> Result<Vec<DowntimeRange>, AppError>;

    /// Insert `range`, or replace the row with the same identity.
    ///
    /// # Errors
    /// Returns [`AppError::MissingParentId`] when `range` is not bound to a
    /// parent, or a storage error.
    fn upsert_range(&self, table: &str, range: &DowntimeRange) -> Result<(), AppError>;

    /// Delete the row matching `identity`.
    ///
    /// # Returns
    /// `true` if a row was deleted.
    ///
    /// # Errors
    /// Returns an error when the storage backend fails.
    fn delete_range(&self, table: &str, identity: &RangeIdentity) -> Result<bool, AppError>;
}

impl<S: RangeStore + ?Sized> RangeStore for &S {
    fn load_ranges(&self, table: &str, parent_id: i64) -> Result<Vec<DowntimeRange>, AppError> {
        (**self).load_ranges(table, parent_id)
    }

    fn upsert_range(&self, table: &str, range: &DowntimeRange) -> Result<(), AppError> {
        (**self).upsert_range(table, range)
    }

    fn delete_range(&self, table: &str, identity: &RangeIdentity) -> Result<bool, AppError> {
        (**self).delete_range(table, identity)
    }
}

/// Accessor for range tables.
#[derive(Clone)]
pub struct RangeDb {
    db: Arc<redb::Database>,
}

impl RangeDb {
    pub fn new(db: Arc<redb::Database>) -> Self {
        Self { db }
    }

    /// Count rows in `table` across all parents.
    ///
    /// # Errors
    /// Returns an error when storage access fails.
    pub fn count_rows(&self, table: &str) -> Result<usize, AppError> {
        let read_txn = self.db.begin_read()?;
        let rows = match read_txn.open_table(range_table(table)) {
            Ok(rows) => rows,
            Err(TableError::TableDoesNotExist(_)) => return Ok(0),
            Err(err) => return Err(err.into()),
        };
        Ok(rows.len()? as usize)
    }
}

impl RangeStore for RangeDb {
    fn load_ranges(&self, table: &str, parent_id: i64) -> Result<Vec<DowntimeRange>, AppError> {
        let read_txn = self.db.begin_read()?;
        let rows = match read_txn.open_table(range_table(table)) {
            Ok(rows) => rows,
            Err(TableError::TableDoesNotExist(_)) => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut ranges = Vec::new();
        for item in rows.range((parent_id, "")..)? {
            let (key, value) = item?;
            let (row_parent, _) = key.value();
            if row_parent != parent_id {
                break;
            }
            ranges.push(bincode::deserialize::<DowntimeRange>(value.value())?);
        }
        Ok(ranges)
    }

    fn upsert_range(&self, table: &str, range: &DowntimeRange) -> Result<(), AppError> {
        let Some(parent_id) = range.scheduled_downtime_id else {
            return Err(AppError::MissingParentId(table.to_string()));
        };
        let encoded = bincode::serialize(range)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut rows = write_txn.open_table(range_table(table))?;
            rows.insert((parent_id, range.range_key.as_str()), encoded.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn delete_range(&self, table: &str, identity: &RangeIdentity) -> Result<bool, AppError> {
        let write_txn = self.db.begin_write()?;
        let deleted = write_txn
            .open_table(range_table(table))?
            .remove((identity.parent_id, identity.range_key.as_str()))?
            .is_some();
        write_txn.commit()?;
        Ok(deleted)
    }
}
