//! Data models for range rows and their parent objects.

/// Parent object contract and the scheduled-downtime parent.
pub mod owner;
/// Range rows as stored and rendered.
pub mod range;
