//! Stride filters
//!
//! Stages that prune a finished stride table. Both implement
//! `StrideFilter` so the pipeline runs them the same way and reports how
//! many strides each removed.
//!
//! - `outliers`: durations too far from the mean
//! - `edges`: strides touching the start or end of the recording

pub mod edges;
pub mod outliers;

pub use edges::EdgeBufferFilter;
pub use outliers::BadStrideFilter;
