use image::RgbaImage;

use crate::{
    error::BackendError,
    types::{BackendRegion, SeedPoint},
};

/// Color-distance metric used to grow flood-fill regions.
///
/// Implementations must be deterministic: a fixed metric, tolerance, and
/// image must always produce the same masks and bounds.
pub trait ColorMetric: Send + Sync {
    /// Distance between two RGB triples. Alpha is ignored throughout.
    fn distance(&self, a: [u8; 3], b: [u8; 3]) -> u32;
}

/// Narrow seam in front of the external segmentation service.
///
/// `submit` covers both prompt modes: a foreground seed when one is given,
/// automatic whole-image segmentation otherwise. Transport details stay
/// behind this trait so the orchestrator's fallback decision is a plain
/// two-branch dispatch.
pub trait SegmentationBackend: Send + Sync {
    fn submit(
        &self,
        image: &RgbaImage,
        seed: Option<SeedPoint>,
    ) -> impl Future<Output = Result<Vec<BackendRegion>, BackendError>> + Send;
}

/// Backend stand-in for local-only operation. Every submission reports
/// `BackendError::Unavailable`, sending the orchestrator straight to the
/// flood-fill path.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBackend;

impl SegmentationBackend for NoBackend {
    async fn submit(
        &self,
        _image: &RgbaImage,
        _seed: Option<SeedPoint>,
    ) -> Result<Vec<BackendRegion>, BackendError> {
        Err(BackendError::Unavailable)
    }
}
