use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in source-image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Bounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A coordinate in source-image space where a flood fill begins, either
/// user-supplied (click mode) or produced by grid sampling (auto mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SeedPoint {
    pub x: u32,
    pub y: u32,
}

/// One labeled cutout region.
///
/// The mask spans the full source image (width x height entries, 0 or 255)
/// and is nonzero only inside `bounds`, so it can be applied to the source
/// pixels without any coordinate translation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub bounds: Bounds,
    /// Inclusion mask over the full source image, base64-encoded when
    /// serialized (the service's `maskData` convention).
    #[serde(with = "mask_bytes")]
    pub mask: Vec<u8>,
}

impl Region {
    /// Number of pixels the region claims (nonzero mask entries).
    pub fn pixel_count(&self) -> usize {
        self.mask.iter().filter(|&&v| v != 0).count()
    }
}

/// Already-decoded record produced by a segmentation backend, before the
/// orchestrator validates its shape against the source image.
#[derive(Debug, Clone)]
pub struct BackendRegion {
    pub id: String,
    pub mask: Vec<u8>,
    pub mask_width: u32,
    pub mask_height: u32,
    pub bounds: Bounds,
}

pub(crate) fn fresh_region_id() -> String {
    format!("segment-{}", uuid::Uuid::new_v4())
}

mod mask_bytes {
    use base64::{Engine, engine::general_purpose::STANDARD};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(mask: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(mask))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}
