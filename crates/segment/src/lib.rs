//! # Image Cutout Segmentation Library
//!
//! Partitions an RGBA image into disjoint labeled regions, each a
//! `{id, bounds, mask}` triple expressed in the source image's coordinate
//! space. Regions come from an external segmentation service when one is
//! configured and reachable, and from a local tolerance-bounded flood fill
//! otherwise; callers never see which path answered.
//!
//! ## Core Features
//!
//! - **Flood-fill extractor**: queue-based region growing with per-call
//!   visited-state, safety caps, and minimum-size filtering
//! - **Auto-segmentation**: deterministic grid sampling over the whole image
//! - **Resilient orchestration**: backend timeouts and malformed payloads
//!   degrade silently to the local algorithm
//! - **Pluggable seams**: color metrics and backends are traits
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use segment::{SegmentConfig, Segmenter, SeedPoint};
//!
//! # async fn run() -> segment::Result<()> {
//! let image = image::open("photo.png")?.to_rgba8();
//!
//! // Local-only segmenter; hosts with a service use Segmenter::with_backend.
//! let segmenter = Segmenter::local(SegmentConfig::default());
//!
//! // Click mode: one region under the point, or none.
//! let clicked = segmenter.segment(&image, Some(SeedPoint { x: 120, y: 80 })).await?;
//!
//! // Auto mode: up to max_auto_regions disjoint regions.
//! let all = segmenter.segment(&image, None).await?;
//! # let _ = (clicked, all);
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod algorithms;
pub mod config;
pub mod error;
pub mod extractor;
pub mod manager;
pub mod orchestrator;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use algorithms::{EuclideanMetric, ManhattanMetric, flood_fill, sample_seeds};
pub use config::SegmentConfig;
pub use error::{BackendError, Result, SegmentError};
pub use extractor::RegionExtractor;
pub use manager::{CutoutManager, SegmentCommand};
pub use orchestrator::Segmenter;
pub use traits::{ColorMetric, NoBackend, SegmentationBackend};
pub use types::{BackendRegion, Bounds, Region, SeedPoint};

/// Segmenter type for hosts running without a configured service.
pub type LocalSegmenter = Segmenter<NoBackend>;
