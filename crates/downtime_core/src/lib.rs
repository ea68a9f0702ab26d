//! Core library for scheduled downtime ranges (models, storage, rendering).

/// Configuration loading and defaults.
pub mod config;
/// Shared constants.
pub mod constants;
/// Database access layer.
pub mod db;
/// Application error types (storage/rendering).
pub mod error;
/// Range entries and parent objects.
pub mod models;
/// The reconciling range collection.
pub mod ranges;
/// Config-text rendering helpers.
pub mod render;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use constants::*;
pub use db::{Database, RangeDb, RangeStore};
pub use error::AppError;
pub use models::owner::{ObjectType, RangeOwner, ScheduledDowntime};
pub use models::range::{DowntimeRange, RangeIdentity};
pub use ranges::{RangeSet, StoreSummary};
pub use render::{ConfigEscaper, ConfigRenderer, StringEscaper};
