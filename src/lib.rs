//! Root crate facade for the scheduled downtime range library.

pub use downtime_core::{
    config, constants, db, error, models, ranges, render, AppError, Config, ConfigEscaper,
    ConfigRenderer, Database, DowntimeRange, ObjectType, RangeDb, RangeIdentity, RangeOwner,
    RangeSet, RangeStore, ScheduledDowntime, StoreSummary, StringEscaper,
};
