use image::RgbaImage;
use tracing::debug;

use crate::{
    algorithms::{ManhattanMetric, flood_fill, sample_seeds},
    config::SegmentConfig,
    traits::ColorMetric,
    types::{Region, SeedPoint},
};

/// Local flood-fill segmenter.
///
/// Leaf component with no backend dependencies: the orchestrator runs it
/// whenever the external service cannot answer. Every public call builds a
/// fresh visited set, so independent extractions never share state.
#[derive(Debug, Clone, Default)]
pub struct RegionExtractor<M: ColorMetric = ManhattanMetric> {
    config: SegmentConfig,
    metric: M,
}

impl RegionExtractor<ManhattanMetric> {
    pub fn new(config: SegmentConfig) -> Self {
        Self { config, metric: ManhattanMetric }
    }
}

impl<M: ColorMetric> RegionExtractor<M> {
    /// Swap in a different color metric, keeping the fill semantics.
    pub fn with_metric(config: SegmentConfig, metric: M) -> Self {
        Self { config, metric }
    }

    pub fn config(&self) -> &SegmentConfig {
        &self.config
    }

    /// Single click-mode fill at `click_tolerance` with a fresh visited set.
    pub fn segment_at(&self, image: &RgbaImage, seed: SeedPoint) -> Option<Region> {
        let (width, height) = image.dimensions();
        let mut visited = vec![false; width as usize * height as usize];
        flood_fill(
            image,
            seed,
            &mut visited,
            self.config.click_tolerance,
            self.config.region_pixel_cap(width, height),
            self.config.min_region_pixels,
            &self.metric,
        )
    }

    /// Grid-sampled whole-image segmentation at `auto_tolerance`.
    ///
    /// Seeds are visited in sampling order and a seed inside an
    /// already-claimed region is skipped, so earlier regions win. Kept
    /// regions must be strictly wider and taller than `min_region_dim`;
    /// results come back in discovery order.
    pub fn auto_segment(&self, image: &RgbaImage) -> Vec<Region> {
        let (width, height) = image.dimensions();
        let mut visited = vec![false; width as usize * height as usize];
        let pixel_cap = self.config.region_pixel_cap(width, height);

        let mut regions = Vec::new();
        for seed in sample_seeds(width, height, self.config.auto_sample_target) {
            if regions.len() >= self.config.max_auto_regions {
                break;
            }
            if visited[seed.y as usize * width as usize + seed.x as usize] {
                continue;
            }
            let Some(region) = flood_fill(
                image,
                seed,
                &mut visited,
                self.config.auto_tolerance,
                pixel_cap,
                self.config.min_region_pixels,
                &self.metric,
            ) else {
                continue;
            };
            if region.bounds.width <= self.config.min_region_dim
                || region.bounds.height <= self.config.min_region_dim
            {
                debug!(
                    id = %region.id,
                    width = region.bounds.width,
                    height = region.bounds.height,
                    "dropping sliver region"
                );
                continue;
            }
            regions.push(region);
        }
        regions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Bounds;
    use image::{Rgba, RgbaImage};

    fn split_image(width: u32, height: u32, left: [u8; 4], right: [u8; 4]) -> RgbaImage {
        let mut image = RgbaImage::from_pixel(width, height, Rgba(left));
        for y in 0..height {
            for x in width / 2..width {
                image.put_pixel(x, y, Rgba(right));
            }
        }
        image
    }

    fn roomy_config() -> SegmentConfig {
        // Cap above one half of the image so a clean two-way split is not
        // truncated by the safety valve.
        SegmentConfig { max_region_fraction: 0.6, ..SegmentConfig::default() }
    }

    #[test]
    fn test_two_color_split_partitions_into_two_regions() {
        let image = split_image(100, 60, [255, 0, 0, 255], [0, 0, 255, 255]);
        let extractor = RegionExtractor::new(SegmentConfig {
            auto_tolerance: 10,
            max_auto_regions: 15,
            ..roomy_config()
        });

        let regions = extractor.auto_segment(&image);
        assert_eq!(regions.len(), 2, "one region per color half");
        assert_eq!(regions[0].bounds, Bounds { x: 0, y: 0, width: 50, height: 60 });
        assert_eq!(regions[1].bounds, Bounds { x: 50, y: 0, width: 50, height: 60 });
    }

    #[test]
    fn test_auto_regions_never_overlap() {
        let mut image = RgbaImage::new(90, 90);
        for y in 0..90 {
            for x in 0..90 {
                let color = match (x < 45, y < 45) {
                    (true, true) => [255, 0, 0, 255],
                    (false, true) => [0, 255, 0, 255],
                    (true, false) => [0, 0, 255, 255],
                    (false, false) => [255, 255, 0, 255],
                };
                image.put_pixel(x, y, Rgba(color));
            }
        }

        let extractor = RegionExtractor::new(roomy_config());
        let regions = extractor.auto_segment(&image);
        assert_eq!(regions.len(), 4);

        let mut claimed = vec![false; 90 * 90];
        for region in &regions {
            for (idx, &value) in region.mask.iter().enumerate() {
                if value != 0 {
                    assert!(!claimed[idx], "pixel {idx} claimed by two regions");
                    claimed[idx] = true;
                }
            }
        }
    }

    #[test]
    fn test_auto_regions_exceed_the_minimum_dimension() {
        // A 15px-wide stripe catches grid seeds but must be filtered out.
        let mut image = RgbaImage::from_pixel(100, 100, Rgba([240, 240, 240, 255]));
        for y in 30..60 {
            for x in 12..27 {
                image.put_pixel(x, y, Rgba([5, 5, 5, 255]));
            }
        }

        let extractor = RegionExtractor::new(roomy_config());
        let regions = extractor.auto_segment(&image);
        assert!(!regions.is_empty());
        for region in &regions {
            assert!(region.bounds.width >= 21);
            assert!(region.bounds.height >= 21);
        }
    }

    #[test]
    fn test_auto_mode_stops_at_max_auto_regions() {
        let mut image = RgbaImage::new(120, 120);
        for y in 0..120 {
            for x in 0..120 {
                // 3x3 checkerboard of 40px blocks, each its own color
                let block = (x / 40) + 3 * (y / 40);
                image.put_pixel(x, y, Rgba([block as u8 * 25, 60, 200, 255]));
            }
        }

        let extractor = RegionExtractor::new(SegmentConfig {
            auto_tolerance: 10,
            max_auto_regions: 4,
            ..roomy_config()
        });
        let regions = extractor.auto_segment(&image);
        assert_eq!(regions.len(), 4);
    }

    #[test]
    fn test_click_mode_keeps_the_full_region_when_uncapped() {
        let image = RgbaImage::from_pixel(50, 50, Rgba([20, 180, 20, 255]));
        let extractor = RegionExtractor::new(SegmentConfig {
            max_region_fraction: 1.0,
            ..SegmentConfig::default()
        });

        let region = extractor
            .segment_at(&image, SeedPoint { x: 25, y: 25 })
            .expect("Should cover the uniform image");
        assert_eq!(region.bounds, Bounds { x: 0, y: 0, width: 50, height: 50 });
        assert!(region.mask.iter().all(|&v| v == 255));
    }

    #[test]
    fn test_click_mode_discards_undersized_regions() {
        // An isolated 6x6 patch is below the 100-pixel minimum.
        let mut image = RgbaImage::from_pixel(60, 60, Rgba([255, 255, 255, 255]));
        for y in 10..16 {
            for x in 10..16 {
                image.put_pixel(x, y, Rgba([0, 0, 0, 255]));
            }
        }

        let extractor = RegionExtractor::new(SegmentConfig::default());
        assert!(extractor.segment_at(&image, SeedPoint { x: 12, y: 12 }).is_none());
    }
}
