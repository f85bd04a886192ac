use crate::{
    config::{DeviceConfig, DEFAULT_CAPTURE_MARGIN_SECS},
    error::{MonitorError, Result},
    models::{CaptureResponse, CapturedImagePair, ResetResponse},
};
use std::time::Duration;

#[derive(Clone)]
pub struct CaptureClient {
    http: reqwest::Client,
    base_url: String,
    capture_margin: Duration,
    min_delay: u32,
    max_delay: u32,
}

impl CaptureClient {
    pub(crate) fn new(http: reqwest::Client, base_url: String, config: &DeviceConfig) -> Self {
        Self {
            http,
            base_url,
            capture_margin: Duration::from_secs(
                config
                    .capture_margin_secs
                    .unwrap_or(DEFAULT_CAPTURE_MARGIN_SECS),
            ),
            min_delay: config.min_delay_secs,
            max_delay: config.max_delay_secs,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the device to take two photos `delay_seconds` apart. The device
    /// blocks for the full delay inside this request, so the per-request
    /// timeout is the delay plus the configured margin.
    pub async fn capture_pair(&self, delay_seconds: u32) -> Result<CapturedImagePair> {
        let delay = delay_seconds.clamp(self.min_delay, self.max_delay);
        if delay != delay_seconds {
            log::warn!(
                "Requested delay {}s is outside the device range, clamped to {}s",
                delay_seconds,
                delay
            );
        }

        let url = format!("{}/capture_images?delay={}", self.base_url, delay);
        let timeout = Duration::from_secs(u64::from(delay)) + self.capture_margin;

        log::info!("Requesting image pair from device ({}s delay)", delay);

        let response = self
            .http
            .get(&url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                log::error!("Capture request failed: {}", e);
                MonitorError::RequestError(e.to_string())
            })?;

        let body: CaptureResponse = response
            .json()
            .await
            .map_err(|e| MonitorError::ResponseError(e.to_string()))?;

        if !body.is_success() {
            let message = body
                .message
                .unwrap_or_else(|| "Unknown error occurred.".to_string());
            log::error!("Device reported capture failure: {}", message);
            return Err(MonitorError::CaptureError(message));
        }

        let (image1, image2) = match (body.image1, body.image2) {
            (Some(image1), Some(image2)) => (image1, image2),
            _ => {
                return Err(MonitorError::ResponseError(
                    "Capture reply is missing image payloads".into(),
                ))
            }
        };

        let pair = CapturedImagePair::new(image1, image2, delay);
        match pair.decoded_sizes() {
            Ok((first, second)) => {
                log::debug!("Captured image pair: {} and {} JPEG bytes", first, second)
            }
            Err(e) => log::warn!("Captured payloads did not decode cleanly: {}", e),
        }

        Ok(pair)
    }

    /// Clear the image buffers on the device.
    pub async fn reset(&self) -> Result<()> {
        let url = format!("{}/reset_data", self.base_url);

        log::info!("Clearing image buffers on device");

        let response = self.http.post(&url).send().await.map_err(|e| {
            log::error!("Reset request failed: {}", e);
            MonitorError::RequestError(e.to_string())
        })?;

        let body: ResetResponse = response
            .json()
            .await
            .map_err(|e| MonitorError::ResponseError(e.to_string()))?;

        if !body.success {
            let message = body
                .message
                .unwrap_or_else(|| "Unknown error occurred.".to_string());
            log::error!("Device reported reset failure: {}", message);
            return Err(MonitorError::CaptureError(message));
        }

        Ok(())
    }
}
