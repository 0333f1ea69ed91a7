//! Pipeline error taxonomy.

use thiserror::Error;

/// Errors signaled by the quantization pipeline.
///
/// All variants are terminal for the request that raised them: the
/// pipeline never retries internally and never returns partial results.
/// A failed image load leaves the pipeline in a `Failed` state that
/// re-signals the same kind on every subsequent `recompute`/`export`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PipelineError {
    /// Sampling found no opaque pixels.
    #[error("image has no opaque pixels")]
    EmptyImage,

    /// The stray-pixel filter removed every sampled pixel.
    #[error("stray-pixel filter removed every sampled pixel")]
    AllPixelsRemoved,

    /// A run is already in flight; the request was rejected, not queued.
    #[error("a pipeline run is already in flight")]
    Busy,

    /// A configuration value is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),
}
