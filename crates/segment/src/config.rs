use std::time::Duration;

/// Tuning parameters for local extraction and backend dispatch.
///
/// The editor originally kept these as module-level constants; they are
/// explicit here and defaulted at the orchestrator boundary so independent
/// extraction calls can carry independent settings.
#[derive(Debug, Clone)]
pub struct SegmentConfig {
    /// Color-distance tolerance for single-seed (click) fills. Tighter than
    /// auto mode for precision around the clicked object.
    pub click_tolerance: u32,
    /// Looser tolerance used by grid-sampled auto-segmentation for broad
    /// object separation.
    pub auto_tolerance: u32,
    /// Fills that claim fewer pixels than this are discarded.
    pub min_region_pixels: usize,
    /// Auto-mode regions must be strictly wider and taller than this.
    pub min_region_dim: u32,
    /// Requested seed count for the uniform sampling grid.
    pub auto_sample_target: u32,
    /// Auto mode stops once this many regions have been accepted.
    pub max_auto_regions: usize,
    /// Safety cap: one fill may claim at most this fraction of the image.
    /// A tunable safety valve, not a segmentation-quality guarantee.
    pub max_region_fraction: f32,
    /// Upper bound on one external-service round trip.
    pub backend_timeout: Duration,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            click_tolerance: 30,
            auto_tolerance: 48,
            min_region_pixels: 100,
            min_region_dim: 20,
            auto_sample_target: 64,
            max_auto_regions: 15,
            max_region_fraction: 0.5,
            backend_timeout: Duration::from_secs(3),
        }
    }
}

impl SegmentConfig {
    /// Absolute pixel cap for a single fill on a width x height image.
    pub(crate) fn region_pixel_cap(&self, width: u32, height: u32) -> usize {
        let total = width as usize * height as usize;
        (((total as f32) * self.max_region_fraction).floor() as usize).max(1)
    }
}
