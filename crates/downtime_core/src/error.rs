//! Application error types for range storage and rendering.
use thiserror::Error;

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] redb::Error),

    #[error("Storage error: {0}")]
    StorageMessage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("Parent object for '{0}' has not been stored yet")]
    MissingParentId(String),

    #[error("Render error: {0}")]
    Render(String),
}

/// redb reports each failure family with its own type; all of them fold into
/// [`AppError::Database`].
macro_rules! from_redb {
    ($($family:ident),+ $(,)?) => {
        $(
            impl From<redb::$family> for AppError {
                fn from(value: redb::$family) -> Self {
                    Self::Database(value.into())
                }
            }
        )+
    };
}

from_redb!(
    DatabaseError,
    TransactionError,
    TableError,
    StorageError,
    CommitError,
);
