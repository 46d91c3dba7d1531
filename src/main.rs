//! celltrack command-line entry point.
//!
//! Loads per-frame centroids, links them into paths and writes the
//! `<output>.txt` listing and `<output>.obj` polyline mesh.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use celltrack_rs::export::{save_frames_listing, save_listing, save_polylines};
use celltrack_rs::tracker::reconstruct;
use celltrack_rs::{
    CentroidSource, FrameDirectory, FrameListing, MatchStrategy, TrackerConfig, TrajectoryPipeline,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Strategy {
    Greedy,
    Optimal,
}

impl From<Strategy> for MatchStrategy {
    fn from(s: Strategy) -> Self {
        match s {
            Strategy::Greedy => MatchStrategy::Greedy,
            Strategy::Optimal => MatchStrategy::Optimal,
        }
    }
}

/// Reconstruct object paths from per-frame centroid lists.
#[derive(Debug, Parser)]
#[command(name = "celltrack", version, about)]
struct Cli {
    /// Multi-frame listing with `ARRAY <i>` headers
    #[arg(long, conflicts_with = "dir")]
    listing: Option<PathBuf>,

    /// Directory holding one centroid file per frame
    #[arg(long, requires_all = ["start", "end"])]
    dir: Option<PathBuf>,

    /// Per-frame file name prefix
    #[arg(long, default_value = "stack-")]
    naming: String,

    /// Per-frame file extension
    #[arg(long, default_value = "txt")]
    extension: String,

    /// First frame file index (inclusive)
    #[arg(long)]
    start: Option<usize>,

    /// Last frame file index (inclusive)
    #[arg(long)]
    end: Option<usize>,

    /// Output path stem; `.txt` and `.obj` are appended
    #[arg(long, short, default_value = "orderedElements")]
    output: PathBuf,

    #[arg(long, value_enum, default_value_t = Strategy::Greedy)]
    strategy: Strategy,

    /// Never link centroids farther apart than this
    #[arg(long)]
    max_distance: Option<f64>,

    /// Also write the unlinked per-frame centroids here
    #[arg(long)]
    dump_frames: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> TrackerConfig {
        TrackerConfig {
            strategy: self.strategy.into(),
            max_distance: self.max_distance,
        }
    }
}

fn run<S>(cli: &Cli, source: S) -> anyhow::Result<()>
where
    S: CentroidSource,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    let mut pipeline = TrajectoryPipeline::new(source, cli.config());

    let paths = match &cli.dump_frames {
        Some(dump) => {
            let frames = pipeline.load_frames().context("loading frames")?;
            save_frames_listing(dump, &frames)?;
            reconstruct(pipeline.config(), &frames)
        }
        None => pipeline.run().context("loading frames")?,
    };

    save_listing(cli.output.with_extension("txt"), &paths)?;
    save_polylines(cli.output.with_extension("obj"), &paths)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    if let Some(max) = cli.max_distance {
        if max.is_nan() || max < 0.0 {
            bail!("--max-distance must be a non-negative number, got {max}");
        }
    }

    match (&cli.listing, &cli.dir) {
        (Some(listing), _) => {
            let source = FrameListing::load(listing)?;
            run(&cli, source)
        }
        (None, Some(dir)) => {
            // clap enforces both bounds whenever --dir is given
            let (Some(start), Some(end)) = (cli.start, cli.end) else {
                bail!("--dir requires --start and --end");
            };
            let source = FrameDirectory::new(dir.clone(), start, end)
                .naming(&cli.naming)
                .extension(&cli.extension);
            run(&cli, source)
        }
        (None, None) => bail!("one of --listing or --dir is required"),
    }
}
