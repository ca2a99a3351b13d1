//! Gait event extraction from dual-foot IMU recordings
//!
//! Finds heel strikes (HS) and toe offs (TO) in two synchronized IMU
//! streams, one per foot or shank, and returns a per-stride table of sample
//! indices for downstream stride segmentation, plus cadence.
//!
//! Key properties:
//! - Every returned stride starts on a right heel strike
//! - Event indices inside a stride strictly increase
//! - A stride that cannot be resolved is dropped, never fatal
//! - Builds without `std` (with `alloc`)
//!
//! ```no_run
//! use gaitevents_core::{DualFootRecording, PipelineConfig, StrideDetectionPipeline};
//!
//! # fn load() -> (Vec<[f64; 6]>, Vec<[f64; 6]>) { unimplemented!() }
//! let (right, left) = load();
//! let recording = DualFootRecording::from_rows(&right, &left)?;
//! let pipeline = StrideDetectionPipeline::new(PipelineConfig::default())?;
//!
//! let output = pipeline.run(&recording)?;
//! for stride in output.table.iter() {
//!     println!("{:?}", stride.indices());
//! }
//! # Ok::<(), gaitevents_core::GaitError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

#[macro_use]
mod logging;

pub mod config;
pub mod constants;
pub mod detectors;
pub mod errors;
pub mod filters;
pub mod pipeline;
pub mod signal;
pub mod traits;
pub mod types;

// Public API
pub use config::{BadStrideMode, DetectionMethod, EventSet, NetAccWindow, PipelineConfig};
pub use errors::{DetectionFailure, Foot, GaitError, GaitResult};
pub use pipeline::{DetectionReport, PipelineOutput, StrideDetectionPipeline};
pub use traits::StrideFilter;
pub use types::{
    CadenceSeries, DualFootRecording, FootRecording, ImuSample, StrideEvents, StrideLayout,
    StrideTable,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
