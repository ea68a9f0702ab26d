//! Range row model.

use serde::{Deserialize, Serialize};

/// One scheduled downtime range: a schedule specifier mapped to a time range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DowntimeRange {
    /// Parent object id; assigned when the owning set is stored.
    pub scheduled_downtime_id: Option<i64>,
    /// Schedule specifier, e.g. `monday` or `2024-12-24`.
    pub range_key: String,
    /// Time range text, e.g. `09:00-17:00`.
    pub range_value: String,
}

/// Criteria that identify a single persisted range row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RangeIdentity {
    pub parent_id: i64,
    pub range_key: String,
}

impl DowntimeRange {
    /// Create a range row bound to `parent_id`.
    pub fn new(
        parent_id: Option<i64>,
        range_key: impl Into<String>,
        range_value: impl Into<String>,
    ) -> Self {
        Self {
            scheduled_downtime_id: parent_id,
            range_key: range_key.into(),
            range_value: range_value.into(),
        }
    }

    /// Identity criteria for deleting or updating this row.
    ///
    /// # Returns
    /// `None` while the row is not bound to a stored parent.
    pub fn identity(&self) -> Option<RangeIdentity> {
        self.scheduled_downtime_id.map(|parent_id| RangeIdentity {
            parent_id,
            range_key: self.range_key.clone(),
        })
    }
}
