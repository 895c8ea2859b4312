//! Shared primitive types used across the entire crate.

/// A calendar year as stored on fact rows.
pub type Year = i64;

/// A calendar quarter, 1 through 4.
pub type Quarter = i64;
