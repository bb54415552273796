use thiserror::Error;

/// Failures raised by a segmentation backend.
///
/// These never reach `Segmenter::segment` callers: every variant makes the
/// orchestrator fall through to the local flood-fill path.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("backend transport error: {0}")]
    Transport(String),

    #[error("backend returned status {0}")]
    Status(u16),

    #[error("backend request timed out")]
    Timeout,

    #[error("malformed backend payload: {0}")]
    MalformedPayload(String),

    #[error("no backend configured")]
    Unavailable,
}

/// Caller-facing errors. Finding no regions is not one of them; that case is
/// an empty result list.
#[derive(Error, Debug)]
pub enum SegmentError {
    #[error("failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("no image loaded")]
    NoImageLoaded,

    #[error("seed point ({x}, {y}) lies outside the {width}x{height} image")]
    SeedOutOfBounds { x: u32, y: u32, width: u32, height: u32 },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SegmentError>;
