//! Stray-pixel filtering: removing isolated points from the working set.
//!
//! Pixels that have too few close color neighbors are likely
//! anti-aliasing fringes or sensor noise; dropping them before clustering
//! keeps centroids anchored on the colors that actually dominate the
//! image.

mod options;
mod stray;

pub use options::FilterOptions;
pub use stray::remove_stray_pixels;
