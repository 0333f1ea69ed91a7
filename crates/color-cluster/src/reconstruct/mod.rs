//! Nearest-centroid image reconstruction.
//!
//! Every output pixel takes the color of the centroid nearest to its
//! source pixel, with alpha copied through unchanged. Preview
//! reconstructions are capped at [`MAX_PREVIEW_DIM`] on the longer side;
//! export reconstructions run at full source resolution.

mod image;
mod reconstructor;

pub use image::ReconstructedImage;
pub use reconstructor::{preview_dimensions, reconstruct, MAX_PREVIEW_DIM};
