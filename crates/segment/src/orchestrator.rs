use image::RgbaImage;
use tracing::{info, warn};

use crate::{
    config::SegmentConfig,
    error::{BackendError, Result, SegmentError},
    extractor::RegionExtractor,
    traits::{NoBackend, SegmentationBackend},
    types::{BackendRegion, Region, SeedPoint},
};

/// Chooses between the external segmentation service and the local
/// flood-fill fallback, and normalizes either result into full-image
/// `Region`s.
///
/// Backend problems are never surfaced: the orchestrator degrades silently
/// to the local extractor, and "nothing found" is an empty list rather than
/// an error.
pub struct Segmenter<B: SegmentationBackend = NoBackend> {
    backend: B,
    extractor: RegionExtractor,
    config: SegmentConfig,
}

impl Segmenter<NoBackend> {
    /// Local-only segmenter; every call goes straight to the flood fill.
    pub fn local(config: SegmentConfig) -> Self {
        Self::with_backend(NoBackend, config)
    }
}

impl Default for Segmenter<NoBackend> {
    fn default() -> Self {
        Self::local(SegmentConfig::default())
    }
}

impl<B: SegmentationBackend> Segmenter<B> {
    pub fn with_backend(backend: B, config: SegmentConfig) -> Self {
        Self {
            extractor: RegionExtractor::new(config.clone()),
            backend,
            config,
        }
    }

    pub fn config(&self) -> &SegmentConfig {
        &self.config
    }

    /// Segment `image`, preferring the external service and falling back to
    /// the local extractor on any backend failure.
    ///
    /// With a seed the service is prompted with that foreground point and
    /// the fallback is a single click-mode fill; without one the service
    /// runs in automatic mode and the fallback is grid-sampled
    /// auto-segmentation. The only error cases are caller bugs such as an
    /// out-of-bounds seed.
    pub async fn segment(
        &self,
        image: &RgbaImage,
        seed: Option<SeedPoint>,
    ) -> Result<Vec<Region>> {
        let (width, height) = image.dimensions();
        if let Some(p) = seed {
            if p.x >= width || p.y >= height {
                return Err(SegmentError::SeedOutOfBounds { x: p.x, y: p.y, width, height });
            }
        }

        match self.submit_with_timeout(image, seed).await {
            Ok(records) => {
                let regions = self.normalize(records, width, height);
                if regions.is_empty() {
                    info!("backend produced no usable regions, running local extraction");
                    Ok(self.local_fallback(image, seed))
                } else {
                    Ok(regions)
                }
            }
            Err(err) => {
                warn!(error = %err, "segmentation backend failed, running local extraction");
                Ok(self.local_fallback(image, seed))
            }
        }
    }

    async fn submit_with_timeout(
        &self,
        image: &RgbaImage,
        seed: Option<SeedPoint>,
    ) -> std::result::Result<Vec<BackendRegion>, BackendError> {
        tokio::time::timeout(self.config.backend_timeout, self.backend.submit(image, seed))
            .await
            .map_err(|_| BackendError::Timeout)?
    }

    fn local_fallback(&self, image: &RgbaImage, seed: Option<SeedPoint>) -> Vec<Region> {
        match seed {
            Some(p) => self.extractor.segment_at(image, p).into_iter().collect(),
            None => self.extractor.auto_segment(image),
        }
    }

    /// Re-express backend records as full-image masks, dropping anything
    /// whose declared shape cannot be aligned to the source image.
    fn normalize(&self, records: Vec<BackendRegion>, width: u32, height: u32) -> Vec<Region> {
        let mut regions = Vec::new();
        for record in records {
            let declared = record.mask_width as usize * record.mask_height as usize;
            if record.mask.len() != declared {
                warn!(
                    id = %record.id,
                    declared,
                    actual = record.mask.len(),
                    "dropping region whose mask length contradicts its declared shape"
                );
                continue;
            }
            if record.mask_width != width || record.mask_height != height {
                warn!(
                    id = %record.id,
                    mask_width = record.mask_width,
                    mask_height = record.mask_height,
                    image_width = width,
                    image_height = height,
                    "dropping region with no defined mapping onto the source image"
                );
                continue;
            }
            let mask = record.mask.iter().map(|&v| if v != 0 { 255 } else { 0 }).collect();
            regions.push(Region { id: record.id, bounds: record.bounds, mask });
        }
        regions
    }
}
