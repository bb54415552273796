use image::RgbaImage;
use segment::{Bounds, Region, SeedPoint};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CutoutCliError {
    #[error("point must be given as X,Y, got {0:?}")]
    InvalidPoint(String),
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// Summary row printed for each region; the mask itself only leaves the
/// process as cutout PNGs.
#[derive(Debug, Clone, Serialize)]
pub struct RegionSummary {
    pub id: String,
    pub bounds: Bounds,
    pub pixel_count: usize,
}

impl From<&Region> for RegionSummary {
    fn from(region: &Region) -> Self {
        Self {
            id: region.id.clone(),
            bounds: region.bounds,
            pixel_count: region.pixel_count(),
        }
    }
}

/// Parse an `X,Y` command-line argument into a seed point.
pub fn parse_point(arg: &str) -> Result<SeedPoint, CutoutCliError> {
    let invalid = || CutoutCliError::InvalidPoint(arg.to_string());
    let (x, y) = arg.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse().map_err(|_| invalid())?;
    let y = y.trim().parse().map_err(|_| invalid())?;
    Ok(SeedPoint { x, y })
}

/// Render one region as a transparent-background cutout cropped to its
/// bounds. Pixels outside the mask stay fully transparent.
pub fn cutout_image(source: &RgbaImage, region: &Region) -> RgbaImage {
    let b = region.bounds;
    let source_width = source.width() as usize;

    let mut out = RgbaImage::new(b.width, b.height);
    for dy in 0..b.height {
        for dx in 0..b.width {
            let (sx, sy) = (b.x + dx, b.y + dy);
            if region.mask[sy as usize * source_width + sx as usize] != 0 {
                out.put_pixel(dx, dy, *source.get_pixel(sx, sy));
            }
        }
    }
    out
}
