//! Database layer for range storage.

/// Range row storage.
pub mod range;
/// Table definitions.
pub mod tables;

use crate::error::AppError;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use range::{RangeDb, RangeStore};

/// Database handle with access to range tables.
pub struct Database {
    pub db: Arc<redb::Database>,
    pub ranges: RangeDb,
}


/// Resolve the redb file inside the configured database directory.
pub fn database_file(path: &str) -> PathBuf {
    Path::new(path).join(tables::REDB_FILE_NAME)
}

impl Database {
    /// Build a database handle from an existing shared redb instance.
    ///
    /// # Returns
    /// A new [`Database`] wrapper that shares the underlying redb instance.
    pub fn from_shared(db: Arc<redb::Database>) -> Self {
        Self {
            ranges: RangeDb::new(db.clone()),
            db,
        }
    }

    /// Open (or create) the database stored under directory `path`.
    ///
    /// # Returns
    /// A fully initialized [`Database`].
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or redb cannot
    /// open the file.
    pub fn new(path: &str) -> Result<Self, AppError> {
        std::fs::create_dir_all(path).map_err(|err| {
            AppError::StorageMessage(format!(
                "Failed to create database directory '{}': {}",
                path, err
            ))
        })?;

        let file = database_file(path);
        let db = redb::Database::create(&file)?;
        tracing::debug!("Opened range database at {}", file.display());
        Ok(Self::from_shared(Arc::new(db)))
    }

    /// Open an existing database without creating anything.
    ///
    /// # Errors
    /// Returns [`AppError::StorageMessage`] when no database exists at `path`.
    pub fn open_existing(path: &str) -> Result<Self, AppError> {
        let file = database_file(path);
        if !file.exists() {
            return Err(AppError::StorageMessage(format!(
                "No range database at '{}'",
                file.display()
            )));
        }
        let db = redb::Database::open(&file)?;
        Ok(Self::from_shared(Arc::new(db)))
    }

    /// Clone this handle for another subsystem in the same process.
    pub fn share(&self) -> Self {
        Self::from_shared(self.db.clone())
    }
}
