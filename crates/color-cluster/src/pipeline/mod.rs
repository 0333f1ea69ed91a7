//! Pipeline orchestration.
//!
//! [`Pipeline`] owns the per-image state and sequences the stages:
//! sampling, stray-pixel filtering, clustering, deduplication, and
//! reconstruction. It exposes [`Pipeline::recompute`] (fresh random
//! restarts over the held working set) and [`Pipeline::export`]
//! (full-resolution reconstruction with exactly `k` colors).

mod error;
mod export;
mod orchestrator;
mod params;

pub use error::PipelineError;
pub use export::{suggested_file_name, ExportOutcome, ImageFormatFamily};
pub use orchestrator::{Pipeline, PipelineState};
pub use params::{QuantizeParams, DEFAULT_K};
