use crate::error::{MonitorError, Result};
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reply from `GET /capture_images`. On success the device inlines both
/// photos as base64 JPEG; otherwise `message` carries its error text.
#[derive(Debug, Clone, Deserialize)]
pub struct CaptureResponse {
    pub status: String,
    #[serde(default)]
    pub image1: Option<String>,
    #[serde(default)]
    pub image2: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl CaptureResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Reply from `POST /reset_data`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResetResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// One successful capture: both photos plus the delay that separated them.
/// Held in memory only; the next capture replaces it.
#[derive(Debug, Clone, Serialize)]
pub struct CapturedImagePair {
    pub image1_base64: String,
    pub image2_base64: String,
    pub delay_seconds: u32,
    pub captured_at: DateTime<Utc>,
}

impl CapturedImagePair {
    pub fn new(image1_base64: String, image2_base64: String, delay_seconds: u32) -> Self {
        Self {
            image1_base64,
            image2_base64,
            delay_seconds,
            captured_at: Utc::now(),
        }
    }

    /// `data:` URL for the first photo, ready for an `<img>` source.
    pub fn first_data_url(&self) -> String {
        format!("data:image/jpeg;base64,{}", self.image1_base64)
    }

    pub fn second_data_url(&self) -> String {
        format!("data:image/jpeg;base64,{}", self.image2_base64)
    }

    /// Decoded JPEG sizes of both photos in bytes.
    pub fn decoded_sizes(&self) -> Result<(usize, usize)> {
        let engine = base64::engine::general_purpose::STANDARD;
        let first = engine
            .decode(&self.image1_base64)
            .map_err(|e| MonitorError::ResponseError(format!("image1 is not valid base64: {}", e)))?;
        let second = engine
            .decode(&self.image2_base64)
            .map_err(|e| MonitorError::ResponseError(format!("image2 is not valid base64: {}", e)))?;
        Ok((first.len(), second.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_response_success_shape() {
        let body = r#"{"status":"success","image1":"aGVsbG8=","image2":"d29ybGQ="}"#;
        let response: CaptureResponse = serde_json::from_str(body).unwrap();
        assert!(response.is_success());
        assert_eq!(response.image1.as_deref(), Some("aGVsbG8="));
        assert_eq!(response.image2.as_deref(), Some("d29ybGQ="));
        assert!(response.message.is_none());
    }

    #[test]
    fn test_capture_response_error_shape() {
        let body = r#"{"status":"error","message":"Failed to capture first image"}"#;
        let response: CaptureResponse = serde_json::from_str(body).unwrap();
        assert!(!response.is_success());
        assert_eq!(response.message.as_deref(), Some("Failed to capture first image"));
    }

    #[test]
    fn test_data_urls_and_decoded_sizes() {
        let pair = CapturedImagePair::new("aGVsbG8=".to_string(), "d29ybGQ=".to_string(), 5);
        assert_eq!(pair.first_data_url(), "data:image/jpeg;base64,aGVsbG8=");
        assert_eq!(pair.second_data_url(), "data:image/jpeg;base64,d29ybGQ=");
        assert_eq!(pair.decoded_sizes().unwrap(), (5, 5));
    }

    #[test]
    fn test_decoded_sizes_rejects_bad_payload() {
        let pair = CapturedImagePair::new("not base64!!".to_string(), "d29ybGQ=".to_string(), 5);
        assert!(pair.decoded_sizes().is_err());
    }

    #[test]
    fn test_reset_response_shape() {
        let body = r#"{"success":true,"message":"Data reset successfully"}"#;
        let response: ResetResponse = serde_json::from_str(body).unwrap();
        assert!(response.success);
    }
}
