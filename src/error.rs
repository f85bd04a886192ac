use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Response error: {0}")]
    ResponseError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Capture error: {0}")]
    CaptureError(String),
    #[error("Analysis error: {0}")]
    AnalysisError(String),
    #[error("Session state error: {0}")]
    StateError(String),
}

pub type Result<T> = std::result::Result<T, MonitorError>;
