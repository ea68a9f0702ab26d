//! Reconciling collection of downtime ranges attached to a parent object.
//!
//! A [`RangeSet`] keeps a working set of ranges plus a snapshot of what was
//! last loaded or stored. Storing writes the working set and deletes rows
//! that disappeared from it since the snapshot.

use crate::db::RangeStore;
use crate::error::AppError;
use crate::models::owner::RangeOwner;
use crate::models::range::{DowntimeRange, RangeIdentity};
use crate::render::ConfigRenderer;
use std::collections::{btree_map, BTreeMap, BTreeSet};
use std::fmt;


/// Ranges of one parent object.
#[derive(Debug, Clone)]
pub struct RangeSet<O> {
    owner: O,
    ranges: BTreeMap<String, DowntimeRange>,
    stored_ranges: BTreeMap<String, DowntimeRange>,
    modified: bool,
}

/// Outcome of [`RangeSet::store`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreSummary {
    /// Keys written, ascending.
    pub upserted: Vec<String>,
    /// Keys removed from storage, ascending.
    pub deleted: Vec<String>,
}

impl<O: RangeOwner> RangeSet<O> {
    /// Create an empty, unmodified set bound to `owner`.
    pub fn new(owner: O) -> Self {
        Self {
            owner,
            ranges: BTreeMap::new(),
            stored_ranges: BTreeMap::new(),
            modified: false,
        }
    }

    /// Load the stored ranges of `owner`.
    ///
    /// # Returns
    /// A set whose working set and snapshot both hold the stored rows.
    ///
    /// # Errors
    /// Returns [`AppError::MissingParentId`] when `owner` has no id, or any
    /// error from `store`.
    pub fn load_for_stored_object<S: RangeStore>(owner: O, store: &S) -> Result<Self, AppError> {
        let table = owner.range_table_name();
        let Some(parent_id) = owner.id() else {
            return Err(AppError::MissingParentId(table));
        };

        let mut set = Self::new(owner);
        for range in store.load_ranges(&table, parent_id)? {
            set.ranges.insert(range.range_key.clone(), range);
        }
        set.stored_ranges = set.ranges.clone();
        tracing::debug!(
            table = %table,
            parent_id,
            count = set.ranges.len(),
            "Loaded downtime ranges"
        );
        Ok(set)
    }

    pub fn owner(&self) -> &O {
        &self.owner
    }

    /// Mutable access to the owner, e.g. to assign its id after it was stored.
    pub fn owner_mut(&mut self) -> &mut O {
        &mut self.owner
    }

    pub fn count(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn has_been_modified(&self) -> bool {
        self.modified
    }

    pub fn get(&self, key: &str) -> Option<&DowntimeRange> {
        self.ranges.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.ranges.contains_key(key)
    }

    /// Current value of every range, keyed by range key.
    pub fn values(&self) -> BTreeMap<String, String> {
        collect_values(&self.ranges)
    }

    /// Values as of the last load or store.
    pub fn original_values(&self) -> BTreeMap<String, String> {
        collect_values(&self.stored_ranges)
    }

    pub fn ranges(&self) -> &BTreeMap<String, DowntimeRange> {
        &self.ranges
    }

    /// Range keys in ascending order.
    pub fn list_keys(&self) -> Vec<String> {
        self.ranges.keys().cloned().collect()
    }

    /// `(key, range)` pairs in ascending key order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.ranges.iter(),
        }
    }

    /// Short object type of the owner, e.g. `scheduled_downtime`.
    pub fn range_type(&self) -> &str {
        self.owner.short_table_name()
    }

    pub fn range_table_name(&self) -> String {
        self.owner.range_table_name()
    }

    /// Replace the whole working set with `ranges`.
    ///
    /// Every pair goes through [`RangeSet::set_range`]; held keys missing
    /// from `ranges` are removed afterwards. Applying the same mapping twice
    /// leaves the set unchanged the second time.
    pub fn set<I, K, V>(&mut self, ranges: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut mentioned = BTreeSet::new();
        for (key, value) in ranges {
            let key = key.as_ref();
            self.set_range(key, value.as_ref().map(AsRef::as_ref));
            mentioned.insert(key.to_string());
        }

        let to_delete: Vec<String> = self
            .ranges
            .keys()
            .filter(|key| !mentioned.contains(key.as_str()))
            .cloned()
            .collect();
        for key in to_delete {
            self.remove(&key);
        }
        self
    }

    /// Set a single range. `None` removes an existing range.
    pub fn set_range(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        let Some(value) = value else {
            if self.contains(key) {
                self.remove(key);
            }
            return self;
        };

        match self.ranges.entry(key.to_string()) {
            btree_map::Entry::Occupied(mut existing) => {
                let range = existing.get_mut();
                if range.range_value != value {
                    range.range_value = value.to_string();
                    self.modified = true;
                }
            }
            btree_map::Entry::Vacant(slot) => {
                slot.insert(DowntimeRange::new(self.owner.id(), key, value));
                self.modified = true;
            }
        }
        self
    }

    /// Remove a range. Marks the set modified even if `key` was absent.
    pub fn remove(&mut self, key: &str) -> &mut Self {
        self.ranges.remove(key);
        self.modified = true;
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.ranges.clear();
        self.modified = true;
        self
    }

    /// Persist the working set through `store`.
    ///
    /// Every range is rebound to the owner's current id and upserted, rows
    /// that were stored before but are no longer in the working set are
    /// deleted, and the snapshot is reset to the working set.
    ///
    /// # Returns
    /// The keys that were written and deleted.
    ///
    /// # Errors
    /// Returns [`AppError::MissingParentId`] when the owner has no id, or the
    /// first storage error. Rows written before the failure are not rolled back.
    pub fn store<S: RangeStore>(&mut self, store: &S) -> Result<StoreSummary, AppError> {
        let table = self.owner.range_table_name();
        let Some(parent_id) = self.owner.id() else {
            return Err(AppError::MissingParentId(table));
        };

        let mut summary = StoreSummary::default();
        for range in self.ranges.values_mut() {
            range.scheduled_downtime_id = Some(parent_id);
            store.upsert_range(&table, range)?;
            summary.upserted.push(range.range_key.clone());
        }

        for (key, stored) in &self.stored_ranges {
            if self.ranges.contains_key(key) {
                continue;
            }
            let identity = stored.identity().unwrap_or_else(|| RangeIdentity {
                parent_id,
                range_key: key.clone(),
            });
            store.delete_range(&table, &identity)?;
            summary.deleted.push(key.clone());
        }

        self.stored_ranges = self.ranges.clone();
        self.modified = false;
        tracing::debug!(
            table = %table,
            parent_id,
            upserted = summary.upserted.len(),
            deleted = summary.deleted.len(),
            "Stored downtime ranges"
        );
        Ok(summary)
    }

    fn render_config(&self) -> Result<String, AppError> {
        if self.ranges.is_empty() && self.owner.is_template() {
            return Ok(String::new());
        }

        let escaper = self.owner.escaper();
        let mut rendered = String::from("    ranges = {\n");
        for range in self.ranges.values() {
            rendered.push_str(&format!(
                "        {}\t= {}\n",
                escaper.render_string(&range.range_key)?,
                escaper.render_string(&range.range_value)?
            ));
        }
        rendered.push_str("    }\n");
        Ok(rendered)
    }
}

fn collect_values(ranges: &BTreeMap<String, DowntimeRange>) -> BTreeMap<String, String> {
    ranges
        .iter()
        .map(|(key, range)| (key.clone(), range.range_value.clone()))
        .collect()
}

impl<O: RangeOwner> ConfigRenderer for RangeSet<O> {
    fn to_config_string(&self) -> Result<String, AppError> {
        self.render_config()
    }

    /// Ranges have no legacy representation.
    fn to_legacy_config_string(&self) -> Result<String, AppError> {
        Ok(String::new())
    }
}

impl<O: RangeOwner> fmt::Display for RangeSet<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render_config() {
            Ok(rendered) => f.write_str(&rendered),
            Err(err) => {
                tracing::error!(
                    table = %self.owner.range_table_name(),
                    "Failed to render downtime ranges: {}",
                    err
                );
                // Writer errors only; a broken range renders as nothing.
                Ok(())
            }
        }
    }
}

/// Iterator over a [`RangeSet`] in ascending key order.
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, String, DowntimeRange>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a DowntimeRange);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, range)| (key.as_str(), range))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a, O: RangeOwner> IntoIterator for &'a RangeSet<O> {
    type Item = (&'a str, &'a DowntimeRange);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
