//! Pipeline configuration surface.

use super::PipelineError;
use crate::filter::FilterOptions;
use crate::reconstruct::MAX_PREVIEW_DIM;
use crate::sample::DEFAULT_PIXEL_LIMIT;

/// Default requested color count.
pub const DEFAULT_K: usize = 3;

/// Configuration for a quantization pipeline.
///
/// `k` is user-controlled and authoritative: the pipeline never adjusts
/// it, and export pads or truncates to exactly `k` colors.
///
/// # Example
///
/// ```
/// use color_cluster::QuantizeParams;
///
/// let params = QuantizeParams::new(5)
///     .remove_stray_pixels(false)
///     .runs(16);
/// assert_eq!(params.k, 5);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantizeParams {
    /// Requested color count (positive, never auto-adjusted).
    pub k: usize,

    /// Restart-count override. `None` picks 32 for working sets below
    /// 200k pixels and 8 otherwise.
    pub runs: Option<usize>,

    /// Whether the stray-pixel filter runs at all.
    pub remove_stray_pixels: bool,

    /// Stray-pixel filter tuning.
    pub filter: FilterOptions,

    /// Maximum working-set size drawn from the image.
    pub pixel_limit: usize,

    /// Longer-side cap for preview reconstructions.
    pub max_preview_dim: u32,
}

impl Default for QuantizeParams {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            runs: None,
            remove_stray_pixels: true,
            filter: FilterOptions::default(),
            pixel_limit: DEFAULT_PIXEL_LIMIT,
            max_preview_dim: MAX_PREVIEW_DIM,
        }
    }
}

impl QuantizeParams {
    /// Create parameters requesting `k` colors, everything else default.
    #[inline]
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Self::default()
        }
    }

    /// Override the restart count.
    #[inline]
    pub fn runs(mut self, runs: usize) -> Self {
        self.runs = Some(runs);
        self
    }

    /// Enable or disable the stray-pixel filter.
    #[inline]
    pub fn remove_stray_pixels(mut self, enabled: bool) -> Self {
        self.remove_stray_pixels = enabled;
        self
    }

    /// Set the filter's neighbor distance threshold.
    #[inline]
    pub fn neighbor_threshold(mut self, threshold: f64) -> Self {
        self.filter = self.filter.neighbor_threshold(threshold);
        self
    }

    /// Set the filter's minimum neighbor count.
    #[inline]
    pub fn min_neighbors(mut self, count: usize) -> Self {
        self.filter = self.filter.min_neighbors(count);
        self
    }

    /// Set the working-set size cap.
    #[inline]
    pub fn pixel_limit(mut self, limit: usize) -> Self {
        self.pixel_limit = limit;
        self
    }

    /// Set the preview longer-side cap.
    #[inline]
    pub fn max_preview_dim(mut self, dim: u32) -> Self {
        self.max_preview_dim = dim;
        self
    }

    /// Check every value is usable, reporting the first offender.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.k == 0 {
            return Err(PipelineError::InvalidParameter("k must be at least 1"));
        }
        if self.runs == Some(0) {
            return Err(PipelineError::InvalidParameter("runs must be at least 1"));
        }
        if self.pixel_limit == 0 {
            return Err(PipelineError::InvalidParameter(
                "pixel limit must be at least 1",
            ));
        }
        if self.max_preview_dim == 0 {
            return Err(PipelineError::InvalidParameter(
                "preview dimension cap must be at least 1",
            ));
        }
        if !self.filter.neighbor_threshold.is_finite() || self.filter.neighbor_threshold < 0.0 {
            return Err(PipelineError::InvalidParameter(
                "neighbor threshold must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = QuantizeParams::default();
        assert_eq!(params.k, DEFAULT_K);
        assert_eq!(params.runs, None);
        assert!(params.remove_stray_pixels);
        assert_eq!(params.pixel_limit, DEFAULT_PIXEL_LIMIT);
        assert_eq!(params.max_preview_dim, MAX_PREVIEW_DIM);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_builder_chaining() {
        let params = QuantizeParams::new(7)
            .runs(4)
            .remove_stray_pixels(false)
            .neighbor_threshold(0.1)
            .min_neighbors(5)
            .pixel_limit(1000)
            .max_preview_dim(200);

        assert_eq!(params.k, 7);
        assert_eq!(params.runs, Some(4));
        assert!(!params.remove_stray_pixels);
        assert_eq!(params.filter.neighbor_threshold, 0.1);
        assert_eq!(params.filter.min_neighbors, 5);
        assert_eq!(params.pixel_limit, 1000);
        assert_eq!(params.max_preview_dim, 200);
    }

    #[test]
    fn test_validate_rejects_zero_k() {
        assert_eq!(
            QuantizeParams::new(0).validate(),
            Err(PipelineError::InvalidParameter("k must be at least 1"))
        );
    }

    #[test]
    fn test_validate_rejects_zero_runs_and_limits() {
        assert!(QuantizeParams::new(3).runs(0).validate().is_err());
        assert!(QuantizeParams::new(3).pixel_limit(0).validate().is_err());
        assert!(QuantizeParams::new(3).max_preview_dim(0).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        assert!(QuantizeParams::new(3)
            .neighbor_threshold(-0.01)
            .validate()
            .is_err());
        assert!(QuantizeParams::new(3)
            .neighbor_threshold(f64::NAN)
            .validate()
            .is_err());
    }
}
