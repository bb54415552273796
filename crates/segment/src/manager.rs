use image::RgbaImage;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};

use crate::{
    config::SegmentConfig,
    error::{Result, SegmentError},
    orchestrator::Segmenter,
    traits::{NoBackend, SegmentationBackend},
    types::{Region, SeedPoint},
};

#[derive(
    Debug, Clone,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
    PartialEq
)]
#[serde(tag = "type", content = "params")]
#[strum(serialize_all = "snake_case")]
pub enum SegmentCommand {
    /// Partition the whole image from a uniform seed grid
    #[serde(rename = "segment_auto")]
    SegmentAuto,

    /// Extract the single region under a foreground point
    #[serde(rename = "segment_at_point")]
    SegmentAtPoint { x: u32, y: u32 },
}

impl SegmentCommand {
    /// Get the JSON schema for all commands
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(SegmentCommand)
    }

    /// Get a list of all available command names
    pub fn command_names() -> &'static [&'static str] {
        <Self as VariantNames>::VARIANTS
    }

    /// Get a description of the command
    pub fn description(&self) -> &'static str {
        match self {
            Self::SegmentAuto => "Partition the loaded image into disjoint cutout regions",
            Self::SegmentAtPoint { .. } => "Extract the region under the given image coordinate",
        }
    }
}

/// Stateful session over one loaded image.
///
/// Mirrors the segmentation service's set-image-then-predict shape: hosts
/// load or replace the image once, then issue commands against it.
pub struct CutoutManager<B: SegmentationBackend = NoBackend> {
    image: Option<RgbaImage>,
    segmenter: Segmenter<B>,
}

impl CutoutManager<NoBackend> {
    pub fn new() -> Self {
        Self {
            image: None,
            segmenter: Segmenter::local(SegmentConfig::default()),
        }
    }
}

impl Default for CutoutManager<NoBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: SegmentationBackend> CutoutManager<B> {
    /// Route segmentation through `segmenter`, keeping its backend and
    /// fallback behavior.
    pub fn with_segmenter(segmenter: Segmenter<B>) -> Self {
        Self { image: None, segmenter }
    }

    /// Load the working image from a file
    pub fn load_image(&mut self, path: &str) -> Result<()> {
        let img = image::open(path)?;
        self.image = Some(img.to_rgba8());
        Ok(())
    }

    /// Load the working image from memory
    pub fn load_image_from_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let img = image::load_from_memory(bytes)?;
        self.image = Some(img.to_rgba8());
        Ok(())
    }

    /// Set the working image directly
    pub fn set_image(&mut self, image: RgbaImage) {
        self.image = Some(image);
    }

    pub async fn execute(&self, command: SegmentCommand) -> Result<Vec<Region>> {
        let image = self.image.as_ref().ok_or(SegmentError::NoImageLoaded)?;

        match command {
            SegmentCommand::SegmentAuto => self.segmenter.segment(image, None).await,
            SegmentCommand::SegmentAtPoint { x, y } => {
                self.segmenter.segment(image, Some(SeedPoint { x, y })).await
            }
        }
    }
}
