pub mod config;
pub mod device;
pub mod error;
pub mod logger;
pub mod models;
pub mod prompt;
pub mod session;

pub use config::DeviceConfig;
pub use device::{AnalysisClient, CaptureClient, DeviceClient};
pub use error::{MonitorError, Result};
pub use models::{
    AnalysisRequest, AnalysisResponse, CaptureResponse, CapturedImagePair, ResetResponse,
};
pub use prompt::{compose, compose_named, OutputFormat, PromptSelection, TemplateKey};
pub use session::{MonitorSession, SessionState};
