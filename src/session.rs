use crate::{
    device::DeviceClient,
    error::{MonitorError, Result},
    models::CapturedImagePair,
    prompt::{OutputFormat, PromptSelection, TemplateKey},
};
use std::fmt;
use uuid::Uuid;

/// Where the workflow currently stands. `Analyzing` is passed through during
/// an analyze call and settles to `Done` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingDelay,
    AwaitingPrompt,
    Analyzing,
    Done,
    Failed,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::AwaitingDelay => "awaiting delay",
            SessionState::AwaitingPrompt => "awaiting prompt",
            SessionState::Analyzing => "analyzing",
            SessionState::Done => "done",
            SessionState::Failed => "failed",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One capture-then-analyze workflow against a device.
///
/// Holds the pieces the original UI kept in page state: the current template
/// and format selection, the captured pair, and the last report. Out-of-order
/// operations fail with a state error before any network I/O.
pub struct MonitorSession {
    id: Uuid,
    client: DeviceClient,
    state: SessionState,
    selection: PromptSelection,
    images: Option<CapturedImagePair>,
    last_report: Option<String>,
}

impl MonitorSession {
    pub fn new(client: DeviceClient) -> Self {
        Self {
            id: Uuid::new_v4(),
            client,
            state: SessionState::AwaitingDelay,
            selection: PromptSelection::new(),
            images: None,
            last_report: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn selection(&self) -> &PromptSelection {
        &self.selection
    }

    pub fn set_template(&mut self, template: TemplateKey) {
        self.selection.template = template;
    }

    pub fn toggle_format(&mut self, format: OutputFormat) {
        self.selection.toggle_format(format);
    }

    pub fn images(&self) -> Option<&CapturedImagePair> {
        self.images.as_ref()
    }

    pub fn last_report(&self) -> Option<&str> {
        self.last_report.as_deref()
    }

    /// The prompt that `analyze` would submit, once images are held.
    pub fn current_prompt(&self) -> Option<String> {
        self.images
            .as_ref()
            .map(|pair| self.selection.compose(pair.delay_seconds))
    }

    /// Capture a new image pair, replacing any previous one.
    pub async fn capture(&mut self, delay_seconds: u32) -> Result<&CapturedImagePair> {
        match self.state {
            SessionState::AwaitingDelay | SessionState::Done | SessionState::Failed => {}
            state => {
                return Err(MonitorError::StateError(format!(
                    "cannot capture while {}",
                    state
                )))
            }
        }

        log::info!(
            "[session {}] capturing image pair ({}s delay)",
            self.id,
            delay_seconds
        );
        self.last_report = None;

        match self.client.capture().capture_pair(delay_seconds).await {
            Ok(pair) => {
                self.state = SessionState::AwaitingPrompt;
                Ok(self.images.insert(pair))
            }
            Err(e) => {
                self.state = SessionState::Failed;
                Err(e)
            }
        }
    }

    /// Analyze the held pair with the prompt composed from the current
    /// selection.
    pub async fn analyze(&mut self) -> Result<&str> {
        let prompt = self.current_prompt().ok_or_else(|| {
            MonitorError::StateError("no captured images to analyze".into())
        })?;
        self.analyze_with(&prompt).await
    }

    /// Analyze the held pair with a caller-edited prompt.
    pub async fn analyze_with(&mut self, prompt: &str) -> Result<&str> {
        match self.state {
            SessionState::AwaitingPrompt | SessionState::Done | SessionState::Failed => {}
            state => {
                return Err(MonitorError::StateError(format!(
                    "cannot analyze while {}",
                    state
                )))
            }
        }

        let pair = match self.images.clone() {
            Some(pair) => pair,
            None => {
                return Err(MonitorError::StateError(
                    "no captured images to analyze".into(),
                ))
            }
        };

        self.state = SessionState::Analyzing;
        log::info!("[session {}] analyzing image pair", self.id);

        match self.client.analysis().analyze(&pair, prompt).await {
            Ok(report) => {
                self.state = SessionState::Done;
                log::info!("[session {}] analysis complete", self.id);
                Ok(self.last_report.insert(report).as_str())
            }
            Err(e) => {
                self.state = SessionState::Failed;
                Err(e)
            }
        }
    }

    /// Drop the held images and report, clear the device's buffers, and go
    /// back to the start of the workflow.
    pub async fn reset(&mut self) -> Result<()> {
        self.client.capture().reset().await?;
        self.images = None;
        self.last_report = None;
        self.state = SessionState::AwaitingDelay;
        log::info!("[session {}] reset, ready for a new capture", self.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeviceConfig;

    fn offline_session() -> MonitorSession {
        // Unroutable base URL: state guards must reject before any I/O, so
        // these tests never touch the network.
        let config = DeviceConfig::new().with_base_url("http://127.0.0.1:9");
        MonitorSession::new(DeviceClient::new(config).unwrap())
    }

    #[test]
    fn test_new_session_awaits_delay() {
        let session = offline_session();
        assert_eq!(session.state(), SessionState::AwaitingDelay);
        assert!(session.images().is_none());
        assert!(session.last_report().is_none());
        assert!(session.current_prompt().is_none());
    }

    #[tokio::test]
    async fn test_analyze_before_capture_is_a_state_error() {
        let mut session = offline_session();
        let result = session.analyze().await;
        assert!(matches!(result, Err(MonitorError::StateError(_))));
        assert_eq!(session.state(), SessionState::AwaitingDelay);
    }

    #[tokio::test]
    async fn test_analyze_with_before_capture_is_a_state_error() {
        let mut session = offline_session();
        let result = session.analyze_with("What changed?").await;
        assert!(matches!(result, Err(MonitorError::StateError(_))));
        assert_eq!(session.state(), SessionState::AwaitingDelay);
    }

    #[test]
    fn test_selection_edits_change_nothing_but_selection() {
        let mut session = offline_session();
        session.set_template(TemplateKey::FormalReport);
        session.toggle_format(OutputFormat::ShortAlert);

        assert_eq!(session.selection().template, TemplateKey::FormalReport);
        assert!(session.selection().formats.contains(&OutputFormat::ShortAlert));
        assert_eq!(session.state(), SessionState::AwaitingDelay);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(SessionState::AwaitingDelay.to_string(), "awaiting delay");
        assert_eq!(SessionState::Analyzing.to_string(), "analyzing");
        assert_eq!(SessionState::Failed.to_string(), "failed");
    }
}
