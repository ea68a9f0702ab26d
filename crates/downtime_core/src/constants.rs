//! Shared constants used across the downtime crates.

/// Parent table used when no override is configured.
pub const DEFAULT_PARENT_TABLE: &str = "icinga_scheduled_downtime";

/// Suffix appended to a parent table name to get its range table.
pub const RANGE_TABLE_SUFFIX: &str = "_range";

/// Prefix stripped from table names to get the short object type.
pub const TABLE_PREFIX: &str = "icinga_";

/// Default database directory below the user's home.
pub const DEFAULT_DB_DIR: &str = ".cache/downtime-ranges/db";
