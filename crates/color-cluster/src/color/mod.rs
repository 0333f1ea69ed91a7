//! Normalized RGB color type used throughout the clustering pipeline.

mod rgb;

pub use rgb::Rgb;
