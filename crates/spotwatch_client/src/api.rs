use serde::Deserialize;
use spotwatch_core::{JobId, ProgressEvent, Status};
use spotwatch_logging::sw_debug;
use thiserror::Error;
use url::Url;

use crate::settings::{ClientSettings, SettingsError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("job {0} not found")]
    NotFound(JobId),
    #[error("server error: {0}")]
    Server(String),
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Latest server-side view of a job, as returned by the status endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobStatusSnapshot {
    pub job_id: JobId,
    pub status: Status,
    pub progress: u8,
}

impl JobStatusSnapshot {
    pub fn into_event(self) -> ProgressEvent {
        ProgressEvent::new(self.job_id, i64::from(self.progress), self.status)
    }
}

#[async_trait::async_trait]
pub trait JobStatusSource: Send + Sync {
    async fn fetch_status(&self, job_id: &JobId) -> Result<JobStatusSnapshot, ApiError>;

    /// Returns the server's `success` flag.
    async fn cancel(&self, job_id: &JobId) -> Result<bool, ApiError>;
}

#[derive(Debug, Deserialize)]
struct StatusBody {
    status: String,
    #[serde(default)]
    progress: f64,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CancelBody {
    success: bool,
}

/// Shape shared by the failure bodies of both endpoints.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        match (self.error, self.status.as_deref()) {
            (Some(message), _) => Some(message),
            (None, Some("error")) => Some(String::new()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReqwestJobApi {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestJobApi {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        Ok(Self { settings, client })
    }

    async fn read_body(
        &self,
        job_id: &JobId,
        request: reqwest::RequestBuilder,
        url: &Url,
    ) -> Result<bytes::Bytes, ApiError> {
        sw_debug!("Requesting {}", url);
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(job_id.clone()));
        }
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(error_from_body(&body).unwrap_or(ApiError::HttpStatus(status.as_u16())));
        }
        response.bytes().await.map_err(map_reqwest_error)
    }
}

#[async_trait::async_trait]
impl JobStatusSource for ReqwestJobApi {
    async fn fetch_status(&self, job_id: &JobId) -> Result<JobStatusSnapshot, ApiError> {
        let url = self.settings.status_url(job_id)?;
        let body = self
            .read_body(job_id, self.client.get(url.clone()), &url)
            .await?;
        let body: StatusBody = serde_json::from_slice(&body)?;

        match body.status.as_str() {
            "not_found" => Err(ApiError::NotFound(job_id.clone())),
            "error" => Err(ApiError::Server(body.error.unwrap_or_default())),
            raw => Ok(JobStatusSnapshot {
                job_id: job_id.clone(),
                status: Status::parse(raw),
                progress: body.progress.round().clamp(0.0, 100.0) as u8,
            }),
        }
    }

    async fn cancel(&self, job_id: &JobId) -> Result<bool, ApiError> {
        let url = self.settings.cancel_url(job_id)?;
        let body = self
            .read_body(job_id, self.client.post(url.clone()), &url)
            .await?;
        let body: CancelBody = serde_json::from_slice(&body)?;
        Ok(body.success)
    }
}

/// The server reports pipeline failures as JSON with a 5xx status; keep its message.
fn error_from_body(body: &[u8]) -> Option<ApiError> {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()?
        .into_message()?;
    Some(ApiError::Server(message))
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout(err.to_string());
    }
    ApiError::Network(err.to_string())
}
