//! redb table definitions shared by storage modules.

use redb::TableDefinition;

/// File name for the redb database within the configured DB directory.
pub const REDB_FILE_NAME: &str = "data.redb";

/// Range rows keyed by `(parent id, range key)`, bincode-encoded `DowntimeRange`.
///
/// Each parent type gets its own table, named after its range table.
pub fn range_table(name: &str) -> TableDefinition<'_, (i64, &'static str), &'static [u8]> {
    TableDefinition::new(name)
}
