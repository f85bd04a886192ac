pub mod analysis_client;
pub mod capture_client;

use crate::{
    config::{DeviceConfig, DEFAULT_TIMEOUT_SECS},
    error::{MonitorError, Result},
    models::CapturedImagePair,
    prompt::PromptSelection,
};
use std::time::Duration;

pub use analysis_client::AnalysisClient;
pub use capture_client::CaptureClient;

/// Client facade for one camera device. Sub-clients share a single
/// `reqwest::Client` and the device's base URL.
#[derive(Clone)]
pub struct DeviceClient {
    capture_client: CaptureClient,
    analysis_client: AnalysisClient,
}

impl DeviceClient {
    pub fn new(config: DeviceConfig) -> Result<Self> {
        let base_url = config
            .base_url
            .as_deref()
            .ok_or_else(|| MonitorError::ConfigError("Device base URL is required".into()))?
            .trim_end_matches('/')
            .to_string();

        let timeout = Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MonitorError::ConfigError(e.to_string()))?;

        Ok(Self {
            capture_client: CaptureClient::new(http.clone(), base_url.clone(), &config),
            analysis_client: AnalysisClient::new(http, base_url),
        })
    }

    pub fn capture(&self) -> &CaptureClient {
        &self.capture_client
    }

    pub fn analysis(&self) -> &AnalysisClient {
        &self.analysis_client
    }

    /// Run the whole workflow in one call: capture a pair, compose the prompt
    /// for the given selection, analyze. The two round-trips stay sequential.
    pub async fn watch(
        &self,
        delay_seconds: u32,
        selection: &PromptSelection,
    ) -> Result<(CapturedImagePair, String)> {
        let pair = self.capture_client.capture_pair(delay_seconds).await?;
        let prompt = selection.compose(pair.delay_seconds);
        let report = self.analysis_client.analyze(&pair, &prompt).await?;
        Ok((pair, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_base_url() {
        let result = DeviceClient::new(DeviceConfig::default());
        assert!(matches!(result, Err(MonitorError::ConfigError(_))));
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let config = DeviceConfig::new().with_base_url("http://192.168.1.42/");
        let client = DeviceClient::new(config).unwrap();
        assert_eq!(client.capture().base_url(), "http://192.168.1.42");
    }
}
