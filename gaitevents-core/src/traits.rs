//! Core traits
//!
//! Two small seams: `Validatable` for input sanity checks and
//! `StrideFilter` for the stages that prune a finished stride table.

use crate::types::StrideTable;

/// Trait for values that can be checked before detection
pub trait Validatable {
    /// Check if the value is usable (not NaN, infinite, etc)
    fn is_valid(&self) -> bool;
}

impl Validatable for f32 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

impl Validatable for f64 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

/// A stage that removes strides from a table
///
/// Filters only ever delete rows; they never reorder or edit the surviving
/// strides, so chronological order and per-stride ordering are preserved.
pub trait StrideFilter {
    /// Short stage name used in logs
    fn name(&self) -> &'static str;

    /// Remove rejected strides in place and return how many were removed
    fn apply(&self, table: &mut StrideTable) -> usize;
}
