//! Parent objects that own a set of ranges.

use crate::constants::{DEFAULT_PARENT_TABLE, RANGE_TABLE_SUFFIX, TABLE_PREFIX};
use crate::render::{ConfigEscaper, StringEscaper};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// Kind of configuration object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    #[default]
    Object,
    Template,
    ExternalObject,
    Apply,
}

impl ObjectType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Template => "template",
            Self::ExternalObject => "external_object",
            Self::Apply => "apply",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a [`crate::RangeSet`] needs to know about the object that owns it.
///
/// Implementors pick the table their ranges live in; the set never derives
/// it from naming conventions on its own.
pub trait RangeOwner {
    /// Persisted identifier, `None` while the object is unsaved.
    fn id(&self) -> Option<i64>;

    fn object_type(&self) -> ObjectType;

    /// Full table name of the owning object, e.g. `icinga_scheduled_downtime`.
    fn table_name(&self) -> &str;

    fn is_template(&self) -> bool {
        self.object_type() == ObjectType::Template
    }

    /// Table name without the `icinga_` prefix.
    fn short_table_name(&self) -> &str {
        let table = self.table_name();
        table.strip_prefix(TABLE_PREFIX).unwrap_or(table)
    }

    /// Table holding this owner's range rows.
    fn range_table_name(&self) -> String {
        format!("{}{}", self.table_name(), RANGE_TABLE_SUFFIX)
    }

    /// Escaper used to quote keys and values in rendered config.
    fn escaper(&self) -> &dyn StringEscaper {
        &ConfigEscaper
    }
}

macro_rules! forward_range_owner {
    ($($ptr:ty),*) => {
        $(
            impl<T: RangeOwner + ?Sized> RangeOwner for $ptr {
                fn id(&self) -> Option<i64> {
                    (**self).id()
                }
                fn object_type(&self) -> ObjectType {
                    (**self).object_type()
                }
                fn table_name(&self) -> &str {
                    (**self).table_name()
                }
                fn is_template(&self) -> bool {
                    (**self).is_template()
                }
                fn short_table_name(&self) -> &str {
                    (**self).short_table_name()
                }
                fn range_table_name(&self) -> String {
                    (**self).range_table_name()
                }
                fn escaper(&self) -> &dyn StringEscaper {
                    (**self).escaper()
                }
            }
        )*
    };
}

forward_range_owner!(&T, Rc<T>, Arc<T>, Box<T>);

/// A scheduled downtime object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledDowntime {
    pub id: Option<i64>,
    pub object_name: String,
    pub object_type: ObjectType,
    #[serde(default = "default_table_name")]
    pub table_name: String,
}

fn default_table_name() -> String {
    DEFAULT_PARENT_TABLE.to_string()
}

impl ScheduledDowntime {
    /// Create an unsaved downtime object.
    pub fn new(object_name: impl Into<String>, object_type: ObjectType) -> Self {
        Self {
            id: None,
            object_name: object_name.into(),
            object_type,
            table_name: default_table_name(),
        }
    }

    /// Handle for an already stored downtime object.
    pub fn stored(id: i64, object_type: ObjectType) -> Self {
        Self {
            id: Some(id),
            object_name: format!("downtime-{}", id),
            object_type,
            table_name: default_table_name(),
        }
    }

    /// Use a different parent table.
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }
}

impl RangeOwner for ScheduledDowntime {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn object_type(&self) -> ObjectType {
        self.object_type
    }

    fn table_name(&self) -> &str {
        &self.table_name
    }
}
