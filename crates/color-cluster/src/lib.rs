//! color-cluster: k-means palette clustering for raster images
//!
//! This library reduces an image's color palette by clustering its pixels
//! in RGB space and reconstructing a palette-reduced raster from the
//! resulting centroids. It operates on abstract RGBA pixel buffers --
//! decoding image files, rendering results, and wiring up user
//! interaction are the caller's business.
//!
//! # Pipeline
//!
//! ```text
//! RGBA buffer
//!     |
//!     v
//! sample      bounded opaque working set (<= 200k pixels)
//!     |
//!     v
//! filter      stray-pixel removal (bounded-window density estimate)
//!     |
//!     v
//! cluster     repeated-restart k-means, lowest inertia wins
//!     |
//!     v
//! dedup       collapse numerically identical centroids
//!     |
//!     v
//! reconstruct nearest-centroid raster at preview or full resolution
//! ```
//!
//! The [`Pipeline`] orchestrator owns the per-image state and sequences
//! the stages. It holds the sampled/filtered working set, so
//! [`Pipeline::recompute`] re-clusters with fresh random restarts without
//! re-sampling, and [`Pipeline::export`] produces a full-resolution
//! reconstruction whose palette holds exactly the requested number of
//! colors.
//!
//! # Quick Start
//!
//! ```
//! use color_cluster::{Pipeline, PixelBuffer, QuantizeParams};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! // 2x2 RGBA image: two reds, a green, a blue
//! let data = [
//!     255, 0, 0, 255, 255, 0, 0, 255, //
//!     0, 255, 0, 255, 0, 0, 255, 255,
//! ];
//! let buffer = PixelBuffer::new(2, 2, &data);
//!
//! let params = QuantizeParams::new(2).remove_stray_pixels(false);
//! let mut pipeline = Pipeline::with_rng(params, StdRng::seed_from_u64(1)).unwrap();
//! pipeline.load(buffer).unwrap();
//!
//! let result = pipeline.result().unwrap();
//! assert_eq!(result.assignments.len(), 4);
//! assert!(result.centroids.len() <= 2);
//! ```
//!
//! # Randomness
//!
//! Sampling, centroid initialization, and export padding are randomized
//! and unseeded by default ([`Pipeline::new`]), so runs are not
//! reproducible -- matching the interactive re-roll behavior this
//! pipeline serves. Every entry point also accepts a caller-provided
//! [`rand::Rng`] ([`Pipeline::with_rng`]) for deterministic tests.

pub mod cluster;
pub mod color;
pub mod filter;
pub mod pipeline;
pub mod reconstruct;
pub mod sample;

pub use cluster::{default_runs, kmeans, merge_identical_centroids, ClusteringResult};
pub use color::Rgb;
pub use filter::{remove_stray_pixels, FilterOptions};
pub use pipeline::{
    suggested_file_name, ExportOutcome, ImageFormatFamily, Pipeline, PipelineError, PipelineState,
    QuantizeParams,
};
pub use reconstruct::{preview_dimensions, reconstruct, ReconstructedImage, MAX_PREVIEW_DIM};
pub use sample::{sample_pixels, PixelBuffer, DEFAULT_PIXEL_LIMIT};
