use clap::{Parser, Subcommand};
use cli::{RegionSummary, cutout_image, parse_point};
use color_eyre::eyre::Result;
use image::RgbaImage;
use sam_rest::SamRestClient;
use segment::{Region, SegmentConfig, Segmenter};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment an image into cutout regions
    Segment {
        /// Path to the input image
        #[arg(short, long)]
        input: PathBuf,
        /// Foreground seed point as X,Y (omit for automatic segmentation)
        #[arg(short, long)]
        point: Option<String>,
        /// Base URL of the segmentation service (local flood fill when omitted)
        #[arg(short, long)]
        endpoint: Option<String>,
        /// Directory to write one transparent cutout PNG per region
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
        /// Give up on the service after this many seconds
        #[arg(long, default_value = "3")]
        timeout_secs: u64,
        /// Upper bound on regions in automatic mode
        #[arg(long, default_value = "15")]
        max_regions: usize,
    },
    /// Check whether the segmentation service is up
    Health {
        /// Base URL of the segmentation service
        #[arg(short, long)]
        endpoint: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Commands::Segment { input, point, endpoint, out_dir, timeout_secs, max_regions } => {
            segment_command(input, point, endpoint, out_dir, timeout_secs, max_regions).await
        }
        Commands::Health { endpoint } => {
            let client = SamRestClient::new(endpoint, Duration::from_secs(3))?;
            let status = client.health().await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
            Ok(())
        }
    }
}

async fn segment_command(
    input: PathBuf,
    point: Option<String>,
    endpoint: Option<String>,
    out_dir: Option<PathBuf>,
    timeout_secs: u64,
    max_regions: usize,
) -> Result<()> {
    let seed = point.as_deref().map(parse_point).transpose()?;
    let image = image::open(&input)?.to_rgba8();
    info!(
        path = %input.display(),
        width = image.width(),
        height = image.height(),
        "loaded image"
    );

    let config = SegmentConfig {
        max_auto_regions: max_regions,
        backend_timeout: Duration::from_secs(timeout_secs),
        ..SegmentConfig::default()
    };

    let regions = match endpoint {
        Some(url) => {
            let client = SamRestClient::new(url, config.backend_timeout)?;
            Segmenter::with_backend(client, config).segment(&image, seed).await?
        }
        None => Segmenter::local(config).segment(&image, seed).await?,
    };

    if regions.is_empty() {
        info!("no segments found");
    }
    report(&image, &regions, out_dir.as_deref())
}

fn report(image: &RgbaImage, regions: &[Region], out_dir: Option<&Path>) -> Result<()> {
    let summaries: Vec<RegionSummary> = regions.iter().map(RegionSummary::from).collect();
    println!("{}", serde_json::to_string_pretty(&summaries)?);

    if let Some(dir) = out_dir {
        std::fs::create_dir_all(dir)?;
        for region in regions {
            let cutout = cutout_image(image, region);
            let path = dir.join(format!("{}.png", region.id));
            cutout.save(&path)?;
            info!(path = %path.display(), "wrote cutout");
        }
    }
    Ok(())
}
