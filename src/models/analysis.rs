use crate::models::CapturedImagePair;
use serde::{Deserialize, Serialize};

/// Body of `POST /analyze_gpt`: both photos plus the composed prompt.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRequest {
    pub image1: String,
    pub image2: String,
    pub prompt: String,
}

impl AnalysisRequest {
    pub fn from_pair(pair: &CapturedImagePair, prompt: impl Into<String>) -> Self {
        Self {
            image1: pair.image1_base64.clone(),
            image2: pair.image2_base64.clone(),
            prompt: prompt.into(),
        }
    }
}

/// Reply from `POST /analyze_gpt`. On success `gpt_response` carries the
/// model's change report; otherwise `message` carries the error text.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisResponse {
    pub status: String,
    #[serde(default)]
    pub gpt_response: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AnalysisResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_with_wire_field_names() {
        let pair = CapturedImagePair::new("aW1nMQ==".to_string(), "aW1nMg==".to_string(), 5);
        let request = AnalysisRequest::from_pair(&pair, "What changed?");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["image1"], "aW1nMQ==");
        assert_eq!(json["image2"], "aW1nMg==");
        assert_eq!(json["prompt"], "What changed?");
    }

    #[test]
    fn test_response_success_shape() {
        let body = r#"{"status":"success","gpt_response":"A lamp turned on."}"#;
        let response: AnalysisResponse = serde_json::from_str(body).unwrap();
        assert!(response.is_success());
        assert_eq!(response.gpt_response.as_deref(), Some("A lamp turned on."));
    }

    #[test]
    fn test_response_error_shape() {
        let body = r#"{"status":"error","message":"Upstream model unavailable"}"#;
        let response: AnalysisResponse = serde_json::from_str(body).unwrap();
        assert!(!response.is_success());
        assert_eq!(response.message.as_deref(), Some("Upstream model unavailable"));
        assert!(response.gpt_response.is_none());
    }
}
