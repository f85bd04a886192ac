use crate::{
    error::{MonitorError, Result},
    models::{AnalysisRequest, AnalysisResponse, CapturedImagePair},
};

#[derive(Clone)]
pub struct AnalysisClient {
    http: reqwest::Client,
    base_url: String,
}

impl AnalysisClient {
    pub(crate) fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    /// Submit both photos and the prompt for analysis; returns the model's
    /// textual change report. An empty prompt is rejected before any I/O.
    pub async fn analyze(&self, pair: &CapturedImagePair, prompt: &str) -> Result<String> {
        if prompt.trim().is_empty() {
            return Err(MonitorError::RequestError(
                "Analysis prompt must not be empty".into(),
            ));
        }

        let request = AnalysisRequest::from_pair(pair, prompt);
        let url = format!("{}/analyze_gpt", self.base_url);

        log::info!("Submitting image pair and prompt for analysis");
        log::debug!(
            "Prompt: {} chars, images: {} + {} base64 chars",
            request.prompt.len(),
            request.image1.len(),
            request.image2.len()
        );

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                log::error!("Analysis request failed: {}", e);
                MonitorError::RequestError(e.to_string())
            })?;

        let body: AnalysisResponse = response
            .json()
            .await
            .map_err(|e| MonitorError::ResponseError(e.to_string()))?;

        if !body.is_success() {
            let message = body
                .message
                .unwrap_or_else(|| "Unknown error occurred.".to_string());
            log::error!("Device reported analysis failure: {}", message);
            return Err(MonitorError::AnalysisError(message));
        }

        body.gpt_response.ok_or_else(|| {
            MonitorError::ResponseError("Analysis reply is missing gpt_response".into())
        })
    }
}
