use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use color_cluster::{Pipeline, PixelBuffer, QuantizeParams};
use palquant::codec;
use palquant::report::PaletteReport;

#[derive(Parser)]
#[command(name = "palquant")]
#[command(about = "Palette quantizer - k-means color reduction for raster images")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cluster an image's colors and print the resulting palette
    Palette {
        /// Input image (PNG, JPEG, or WebP)
        input: PathBuf,

        /// Number of colors to cluster into
        #[arg(short, long, default_value_t = 3)]
        k: usize,

        /// Emit the report as JSON instead of text
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        tuning: TuningArgs,
    },
    /// Write a preview-resolution reconstruction (longer side capped)
    Preview {
        /// Input image (PNG, JPEG, or WebP)
        input: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Number of colors to cluster into
        #[arg(short, long, default_value_t = 3)]
        k: usize,

        /// Longer-side cap for the preview, in pixels
        #[arg(long, default_value_t = 800)]
        max_dim: u32,

        #[command(flatten)]
        tuning: TuningArgs,
    },
    /// Write a full-resolution reconstruction with exactly k colors
    Quantize {
        /// Input image (PNG, JPEG, or WebP)
        input: PathBuf,

        /// Output file path (default: <input>_reconstructed_k<k> next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of colors in the exported palette
        #[arg(short, long, default_value_t = 3)]
        k: usize,

        #[command(flatten)]
        tuning: TuningArgs,
    },
}

/// Pipeline tuning flags shared by every subcommand.
#[derive(Args)]
struct TuningArgs {
    /// Clustering restarts (default: 32 for small samples, 8 for large)
    #[arg(long)]
    runs: Option<usize>,

    /// Keep stray pixels instead of filtering low-density outliers
    #[arg(long)]
    keep_stray_pixels: bool,

    /// Stray-filter neighbor distance threshold in normalized RGB space
    #[arg(long, default_value_t = 0.05)]
    neighbor_threshold: f64,

    /// Stray-filter minimum neighbor count
    #[arg(long, default_value_t = 3)]
    min_neighbors: usize,

    /// Maximum number of pixels sampled from the image
    #[arg(long, default_value_t = 200_000)]
    pixel_limit: usize,

    /// Seed the random source for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

impl TuningArgs {
    fn params(&self, k: usize) -> QuantizeParams {
        let mut params = QuantizeParams::new(k)
            .remove_stray_pixels(!self.keep_stray_pixels)
            .neighbor_threshold(self.neighbor_threshold)
            .min_neighbors(self.min_neighbors)
            .pixel_limit(self.pixel_limit);
        if let Some(runs) = self.runs {
            params = params.runs(runs);
        }
        params
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "palquant=info,color_cluster=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Palette {
            input,
            k,
            json,
            tuning,
        } => run_palette_command(&input, k, json, &tuning),
        Commands::Preview {
            input,
            output,
            k,
            max_dim,
            tuning,
        } => run_preview_command(&input, &output, k, max_dim, &tuning),
        Commands::Quantize {
            input,
            output,
            k,
            tuning,
        } => run_quantize_command(&input, output.as_deref(), k, &tuning),
    }
}

/// Cluster and print the palette (text or JSON)
fn run_palette_command(
    input: &Path,
    k: usize,
    json: bool,
    tuning: &TuningArgs,
) -> anyhow::Result<()> {
    let decoded = codec::decode_image(input)?;
    let buffer = PixelBuffer::new(decoded.width, decoded.height, &decoded.rgba);

    let mut pipeline = Pipeline::with_rng(tuning.params(k), tuning.rng())?;
    pipeline.load(buffer)?;

    let result = pipeline
        .result()
        .ok_or_else(|| anyhow::anyhow!("pipeline ready without a result"))?;
    let report = PaletteReport::from_result(k, result, pipeline.working_set());

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}

/// Reconstruct at capped resolution with the deduplicated palette
fn run_preview_command(
    input: &Path,
    output: &Path,
    k: usize,
    max_dim: u32,
    tuning: &TuningArgs,
) -> anyhow::Result<()> {
    let decoded = codec::decode_image(input)?;
    let buffer = PixelBuffer::new(decoded.width, decoded.height, &decoded.rgba);

    let params = tuning.params(k).max_preview_dim(max_dim);
    let mut pipeline = Pipeline::with_rng(params, tuning.rng())?;
    pipeline.load(buffer)?;

    let preview = pipeline
        .preview()
        .ok_or_else(|| anyhow::anyhow!("pipeline ready without a preview"))?;
    codec::encode_image(output, preview)?;

    println!(
        "Wrote {} ({}x{}, {} colors)",
        output.display(),
        preview.width(),
        preview.height(),
        pipeline.result().map(|r| r.centroids.len()).unwrap_or(0),
    );
    Ok(())
}

/// Export a full-resolution reconstruction with exactly k colors
fn run_quantize_command(
    input: &Path,
    output: Option<&Path>,
    k: usize,
    tuning: &TuningArgs,
) -> anyhow::Result<()> {
    let decoded = codec::decode_image(input)?;
    let buffer = PixelBuffer::new(decoded.width, decoded.height, &decoded.rgba);

    let mut pipeline = Pipeline::with_rng(tuning.params(k), tuning.rng())?;
    pipeline.load(buffer)?;
    let outcome = pipeline.export()?;

    let output = match output {
        Some(path) => path.to_path_buf(),
        None => codec::default_export_path(input, decoded.format, k),
    };
    codec::encode_image(&output, &outcome.image)?;

    println!(
        "Wrote {} ({}x{}, exactly {} colors)",
        output.display(),
        outcome.image.width(),
        outcome.image.height(),
        outcome.centroids.len(),
    );
    for (i, centroid) in outcome.centroids.iter().enumerate() {
        let [r, g, b] = centroid.to_bytes();
        println!("  C{}: rgb({r}, {g}, {b})", i + 1);
    }
    Ok(())
}
