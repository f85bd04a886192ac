use std::env;

pub const DEFAULT_TIMEOUT_SECS: u64 = 90;
pub const DEFAULT_CAPTURE_MARGIN_SECS: u64 = 30;

/// Delay range the device firmware accepts for `/capture_images`.
pub const DEVICE_MIN_DELAY_SECS: u32 = 1;
pub const DEVICE_MAX_DELAY_SECS: u32 = 60;

#[derive(Debug, Clone)]
pub struct DeviceConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub capture_margin_secs: Option<u64>,
    pub min_delay_secs: u32,
    pub max_delay_secs: u32,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        DeviceConfig {
            base_url: None,
            timeout_secs: None,
            capture_margin_secs: None,
            min_delay_secs: DEVICE_MIN_DELAY_SECS,
            max_delay_secs: DEVICE_MAX_DELAY_SECS,
        }
    }
}

impl DeviceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let base_url = env::var("CAMSENTRY_DEVICE_URL").ok();
        let timeout_secs = env::var("CAMSENTRY_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok());
        let capture_margin_secs = env::var("CAMSENTRY_CAPTURE_MARGIN_SECS")
            .ok()
            .and_then(|s| s.parse().ok());

        DeviceConfig {
            base_url,
            timeout_secs,
            capture_margin_secs,
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Extra time allowed for a capture call on top of the inter-photo delay,
    /// which the device spends blocked inside the request.
    pub fn with_capture_margin(mut self, margin_secs: u64) -> Self {
        self.capture_margin_secs = Some(margin_secs);
        self
    }

    pub fn with_delay_bounds(mut self, min_secs: u32, max_secs: u32) -> Self {
        self.min_delay_secs = min_secs;
        self.max_delay_secs = max_secs;
        self
    }
}
