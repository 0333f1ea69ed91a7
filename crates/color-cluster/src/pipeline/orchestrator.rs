//! The pipeline state machine.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::export::{exact_k_centroids, ExportOutcome};
use super::{PipelineError, QuantizeParams};
use crate::cluster::{default_runs, kmeans, merge_identical_centroids, ClusteringResult};
use crate::color::Rgb;
use crate::filter::remove_stray_pixels;
use crate::reconstruct::{preview_dimensions, reconstruct, ReconstructedImage};
use crate::sample::{sample_pixels, PixelBuffer};

/// Where a pipeline currently is in its lifecycle.
///
/// ```text
/// Idle -> Sampling -> Filtering -> Clustering -> Reconstructing -> Ready
///                                      ^                             |
///                                      +--------- recompute ---------+
/// ```
///
/// Any stage that ends with an empty working set moves to
/// `Failed(kind)`, which is terminal for the loaded image: `recompute`
/// and `export` re-signal the same error until a new image is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// No image loaded.
    Idle,
    /// Drawing the working set from the raw buffer.
    Sampling,
    /// Removing stray pixels.
    Filtering,
    /// Running k-means restarts.
    Clustering,
    /// Mapping pixels to centroids.
    Reconstructing,
    /// Results available; `recompute`/`export` accepted.
    Ready,
    /// Terminal failure for this image.
    Failed(PipelineError),
}

impl PipelineState {
    /// True while a run is in flight; new requests are rejected with
    /// [`PipelineError::Busy`] rather than queued.
    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(
            self,
            PipelineState::Sampling
                | PipelineState::Filtering
                | PipelineState::Clustering
                | PipelineState::Reconstructing
        )
    }

    /// True once results are available.
    #[inline]
    pub fn is_ready(&self) -> bool {
        matches!(self, PipelineState::Ready)
    }
}

/// The quantization pipeline for one image at a time.
///
/// Owns the per-image state: the borrowed source buffer, the sampled and
/// filtered working set, the current (deduplicated) clustering result,
/// and the preview reconstruction. The working set is produced once per
/// [`load`](Pipeline::load) and reused by every
/// [`recompute`](Pipeline::recompute) and [`export`](Pipeline::export);
/// the clusterer and reconstructor only ever see read-only views of it.
///
/// Randomness is injectable: [`Pipeline::new`] seeds from entropy
/// (non-reproducible runs, matching the interactive behavior), while
/// [`Pipeline::with_rng`] accepts any [`Rng`] so tests can pass a seeded
/// `StdRng`.
///
/// # Example
///
/// ```
/// use color_cluster::{Pipeline, PixelBuffer, QuantizeParams};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let data = [
///     255, 0, 0, 255, 255, 0, 0, 255, //
///     0, 255, 0, 255, 0, 0, 255, 255,
/// ];
/// let buffer = PixelBuffer::new(2, 2, &data);
///
/// let params = QuantizeParams::new(2).remove_stray_pixels(false);
/// let mut pipeline = Pipeline::with_rng(params, StdRng::seed_from_u64(7)).unwrap();
///
/// pipeline.load(buffer).unwrap();
/// assert!(pipeline.state().is_ready());
/// assert_eq!(pipeline.working_set().len(), 4);
/// ```
pub struct Pipeline<'a, R = StdRng> {
    params: QuantizeParams,
    rng: R,
    state: PipelineState,
    buffer: Option<PixelBuffer<'a>>,
    working_set: Vec<Rgb>,
    result: Option<ClusteringResult>,
    preview: Option<ReconstructedImage>,
}

impl<'a> Pipeline<'a, StdRng> {
    /// Create a pipeline with entropy-seeded randomness.
    pub fn new(params: QuantizeParams) -> Result<Self, PipelineError> {
        Self::with_rng(params, StdRng::from_entropy())
    }
}

impl<'a, R: Rng> Pipeline<'a, R> {
    /// Create a pipeline with a caller-provided random source.
    pub fn with_rng(params: QuantizeParams, rng: R) -> Result<Self, PipelineError> {
        params.validate()?;
        Ok(Self {
            params,
            rng,
            state: PipelineState::Idle,
            buffer: None,
            working_set: Vec::new(),
            result: None,
            preview: None,
        })
    }

    /// The active configuration.
    #[inline]
    pub fn params(&self) -> &QuantizeParams {
        &self.params
    }

    /// The current lifecycle state.
    #[inline]
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// The sampled (and, when enabled, filtered) working set.
    #[inline]
    pub fn working_set(&self) -> &[Rgb] {
        &self.working_set
    }

    /// The current deduplicated clustering result, once `Ready`.
    #[inline]
    pub fn result(&self) -> Option<&ClusteringResult> {
        self.result.as_ref()
    }

    /// The current preview reconstruction, once `Ready`.
    #[inline]
    pub fn preview(&self) -> Option<&ReconstructedImage> {
        self.preview.as_ref()
    }

    /// Change the requested color count for subsequent runs.
    ///
    /// Does not recluster by itself; call [`recompute`](Self::recompute)
    /// afterwards. Rejected while a run is in flight.
    pub fn set_k(&mut self, k: usize) -> Result<(), PipelineError> {
        if self.state.is_running() {
            return Err(PipelineError::Busy);
        }
        if k == 0 {
            return Err(PipelineError::InvalidParameter("k must be at least 1"));
        }
        self.params.k = k;
        Ok(())
    }

    /// Load an image and run the full pipeline on it.
    ///
    /// Discards all state from any previously loaded image, then runs
    /// sampling, optional stray-pixel filtering, clustering with
    /// deduplication, and a preview reconstruction. On success the
    /// pipeline is `Ready`; an empty working set at any stage moves it
    /// to the terminal `Failed` state and returns the triggering error.
    pub fn load(&mut self, buffer: PixelBuffer<'a>) -> Result<(), PipelineError> {
        if self.state.is_running() {
            return Err(PipelineError::Busy);
        }

        // New image: discard everything from the previous one
        self.state = PipelineState::Idle;
        self.buffer = None;
        self.working_set.clear();
        self.result = None;
        self.preview = None;

        self.state = PipelineState::Sampling;
        let sampled = sample_pixels(&buffer, self.params.pixel_limit, &mut self.rng);
        if sampled.is_empty() {
            return self.fail(PipelineError::EmptyImage);
        }

        let working_set = if self.params.remove_stray_pixels {
            self.state = PipelineState::Filtering;
            let filtered = remove_stray_pixels(&sampled, &self.params.filter);
            if filtered.is_empty() {
                return self.fail(PipelineError::AllPixelsRemoved);
            }
            filtered
        } else {
            sampled
        };

        self.buffer = Some(buffer);
        self.working_set = working_set;
        self.cluster_and_reconstruct()
    }

    /// Re-run clustering with fresh random restarts on the held working
    /// set, then rebuild the preview.
    ///
    /// Never re-samples or re-filters. From `Failed` this re-signals the
    /// original error; while a run is in flight it returns `Busy`.
    pub fn recompute(&mut self) -> Result<(), PipelineError> {
        match self.state {
            PipelineState::Failed(err) => Err(err),
            state if state.is_running() => Err(PipelineError::Busy),
            PipelineState::Idle => Err(PipelineError::InvalidParameter("no image loaded")),
            _ => self.cluster_and_reconstruct(),
        }
    }

    /// Run the independent export sub-pipeline: a one-off clustering of
    /// the held working set and a full-resolution reconstruction.
    ///
    /// The export palette is *not* deduplicated and always holds exactly
    /// `k` colors (padded with random centroids if clustering converged
    /// onto fewer). The displayed `Ready` state -- current result and
    /// preview -- is left untouched. From `Failed` this re-signals the
    /// original error; while a run is in flight it returns `Busy`.
    pub fn export(&mut self) -> Result<ExportOutcome, PipelineError> {
        match self.state {
            PipelineState::Failed(err) => return Err(err),
            state if state.is_running() => return Err(PipelineError::Busy),
            PipelineState::Idle => {
                return Err(PipelineError::InvalidParameter("no image loaded"))
            }
            _ => {}
        }
        let Some(buffer) = self.buffer else {
            return Err(PipelineError::InvalidParameter("no image loaded"));
        };

        self.state = PipelineState::Clustering;
        let runs = self.runs_for_working_set();
        let fresh = kmeans(&self.working_set, self.params.k, runs, &mut self.rng);
        let centroids = exact_k_centroids(fresh.centroids, self.params.k, &mut self.rng);

        self.state = PipelineState::Reconstructing;
        let image = reconstruct(&buffer, &centroids, buffer.width(), buffer.height());
        self.state = PipelineState::Ready;

        tracing::info!(
            k = centroids.len(),
            width = image.width(),
            height = image.height(),
            "Exported full-resolution reconstruction"
        );
        Ok(ExportOutcome { image, centroids })
    }

    /// Clustering + dedup + preview over the held working set.
    fn cluster_and_reconstruct(&mut self) -> Result<(), PipelineError> {
        let Some(buffer) = self.buffer else {
            return Err(PipelineError::InvalidParameter("no image loaded"));
        };

        self.state = PipelineState::Clustering;
        let runs = self.runs_for_working_set();
        let result = kmeans(&self.working_set, self.params.k, runs, &mut self.rng);
        let result = merge_identical_centroids(result);

        self.state = PipelineState::Reconstructing;
        let (width, height) =
            preview_dimensions(buffer.width(), buffer.height(), self.params.max_preview_dim);
        let preview = reconstruct(&buffer, &result.centroids, width, height);

        tracing::info!(
            k = self.params.k,
            centroids = result.centroids.len(),
            pixels = self.working_set.len(),
            inertia = result.inertia,
            "Clustering complete"
        );
        tracing::debug!(
            populations = ?result.population_counts(&self.working_set),
            "Pixels per centroid"
        );

        self.result = Some(result);
        self.preview = Some(preview);
        self.state = PipelineState::Ready;
        Ok(())
    }

    #[inline]
    fn runs_for_working_set(&self) -> usize {
        self.params
            .runs
            .unwrap_or_else(|| default_runs(self.working_set.len()))
    }

    /// Move to the terminal `Failed` state and surface the error.
    fn fail(&mut self, err: PipelineError) -> Result<(), PipelineError> {
        tracing::debug!(error = %err, "Pipeline failed");
        self.state = PipelineState::Failed(err);
        Err(err)
    }
}
