use std::time::Duration;

use spotwatch_core::{JobId, UploadRules, NAVIGATION_DELAY};
use thiserror::Error;
use url::Url;

/// Time a notification banner stays up unless dismissed first.
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(5000);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("server url cannot carry a path: {0}")]
    InvalidServerUrl(String),
    #[error("unsupported server url scheme: {0}")]
    UnsupportedScheme(String),
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Base address of the spot-detection web application.
    pub server_url: Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Pause between push-channel reconnect attempts.
    pub reconnect_delay: Duration,
    pub navigation_delay: Duration,
    pub notification_ttl: Duration,
    pub upload: UploadRules,
}

impl ClientSettings {
    pub fn default_with_server(server_url: Url) -> Self {
        Self {
            server_url,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            reconnect_delay: Duration::from_secs(5),
            navigation_delay: NAVIGATION_DELAY,
            notification_ttl: NOTIFICATION_TTL,
            upload: UploadRules::default(),
        }
    }

    /// `{server}/results/{job_id}`
    pub fn results_url(&self, job_id: &JobId) -> Result<Url, SettingsError> {
        self.endpoint(&["results", job_id.as_str()])
    }

    /// `{server}/api/job/{job_id}/status`
    pub fn status_url(&self, job_id: &JobId) -> Result<Url, SettingsError> {
        self.endpoint(&["api", "job", job_id.as_str(), "status"])
    }

    /// `{server}/api/job/{job_id}/cancel`
    pub fn cancel_url(&self, job_id: &JobId) -> Result<Url, SettingsError> {
        self.endpoint(&["api", "job", job_id.as_str(), "cancel"])
    }

    /// Push channel address: the server url with a ws/wss scheme and `/ws` appended.
    pub fn ws_url(&self) -> Result<Url, SettingsError> {
        let mut url = self.endpoint(&["ws"])?;
        let scheme = match url.scheme() {
            "http" | "ws" => "ws",
            "https" | "wss" => "wss",
            other => return Err(SettingsError::UnsupportedScheme(other.to_string())),
        };
        url.set_scheme(scheme)
            .map_err(|()| SettingsError::UnsupportedScheme(url.scheme().to_string()))?;
        Ok(url)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, SettingsError> {
        let mut url = self.server_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|()| SettingsError::InvalidServerUrl(self.server_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}
