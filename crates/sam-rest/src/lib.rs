//! REST client for a SAM-style segmentation service.
//!
//! Speaks the editor backend's JSON contract: a base64 PNG goes up with
//! optional foreground point prompts, and each returned segment carries a
//! base64 raw mask plus its declared shape and bounding box. Records are
//! decoded here; shape validation against the source image stays with the
//! orchestrator.

use std::time::Duration;

use base64::{Engine, engine::general_purpose::STANDARD};
use image::RgbaImage;
use segment::{BackendError, BackendRegion, Bounds, SeedPoint, SegmentationBackend};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Serialize)]
struct SegmentRequest {
    image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    points: Option<Vec<PointPrompt>>,
}

#[derive(Debug, Clone, Serialize)]
struct PointPrompt {
    x: u32,
    y: u32,
    /// 1 marks a foreground point, 0 background.
    label: u8,
}

#[derive(Debug, Clone, Deserialize)]
struct SegmentResponse {
    #[serde(default)]
    segments: Vec<WireSegment>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSegment {
    id: String,
    mask_data: String,
    mask_shape: MaskShape,
    bounds: Bounds,
}

#[derive(Debug, Clone, Deserialize)]
struct MaskShape {
    width: u32,
    height: u32,
}

/// Service liveness report from `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub model_loaded: bool,
}

/// Client for the service's `/segment` and `/health` endpoints.
#[derive(Debug, Clone)]
pub struct SamRestClient {
    base_url: String,
    http: reqwest::Client,
}

impl SamRestClient {
    /// Build a client with the request timeout baked into the transport.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe `GET /health`.
    pub async fn health(&self) -> Result<HealthStatus, BackendError> {
        let response = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        if !response.status().is_success() {
            return Err(BackendError::Status(response.status().as_u16()));
        }
        response
            .json()
            .await
            .map_err(|e| BackendError::MalformedPayload(e.to_string()))
    }

    fn encode_image(image: &RgbaImage) -> Result<String, BackendError> {
        let mut png = Vec::new();
        image
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|e| BackendError::Transport(format!("image encode: {e}")))?;
        Ok(STANDARD.encode(&png))
    }
}

fn map_reqwest_error(e: reqwest::Error) -> BackendError {
    if e.is_timeout() {
        BackendError::Timeout
    } else {
        BackendError::Transport(e.to_string())
    }
}

fn decode_segment(raw: WireSegment) -> Result<BackendRegion, BackendError> {
    let mask = STANDARD
        .decode(raw.mask_data.as_bytes())
        .map_err(|e| BackendError::MalformedPayload(format!("mask for {}: {e}", raw.id)))?;

    Ok(BackendRegion {
        id: raw.id,
        mask,
        mask_width: raw.mask_shape.width,
        mask_height: raw.mask_shape.height,
        bounds: raw.bounds,
    })
}

impl SegmentationBackend for SamRestClient {
    async fn submit(
        &self,
        image: &RgbaImage,
        seed: Option<SeedPoint>,
    ) -> Result<Vec<BackendRegion>, BackendError> {
        let request = SegmentRequest {
            image: Self::encode_image(image)?,
            points: seed.map(|p| vec![PointPrompt { x: p.x, y: p.y, label: 1 }]),
        };

        let response = self
            .http
            .post(format!("{}/segment", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        if !response.status().is_success() {
            return Err(BackendError::Status(response.status().as_u16()));
        }

        let payload: SegmentResponse = response
            .json()
            .await
            .map_err(|e| BackendError::MalformedPayload(e.to_string()))?;
        if let Some(error) = payload.error {
            return Err(BackendError::MalformedPayload(error));
        }

        let declared = payload.segments.len();
        let mut records = Vec::with_capacity(declared);
        for raw in payload.segments {
            match decode_segment(raw) {
                Ok(record) => records.push(record),
                Err(err) => warn!(error = %err, "skipping undecodable segment record"),
            }
        }
        if records.is_empty() && declared > 0 {
            return Err(BackendError::MalformedPayload(
                "no decodable segment records".to_string(),
            ));
        }
        Ok(records)
    }
}
