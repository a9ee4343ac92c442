use serde::Deserialize;
use spotwatch_core::{JobId, ProgressEvent, Status};

use super::ChannelError;

pub const EVENT_JOB_PROGRESS: &str = "job_progress";
pub const EVENT_JOIN_JOB: &str = "join_job";

/// `{"event": "<name>", "data": {...}}`
#[derive(Debug, Deserialize)]
struct Frame {
    event: String,
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct WireProgress {
    job_id: WireJobId,
    #[serde(default)]
    progress: f64,
    status: String,
    #[serde(default)]
    seq: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireJobId {
    Text(String),
    Number(u64),
}

impl From<WireJobId> for JobId {
    fn from(raw: WireJobId) -> Self {
        match raw {
            WireJobId::Text(text) => JobId::from(text),
            WireJobId::Number(number) => JobId::from(number),
        }
    }
}

/// Decodes one text frame. Events other than job progress yield `Ok(None)`.
pub fn decode_frame(text: &str) -> Result<Option<ProgressEvent>, ChannelError> {
    let frame: Frame = serde_json::from_str(text)?;
    if frame.event != EVENT_JOB_PROGRESS {
        return Ok(None);
    }

    let wire: WireProgress = serde_json::from_value(frame.data)?;
    let mut event = ProgressEvent::new(
        wire.job_id,
        wire.progress.round() as i64,
        Status::parse(&wire.status),
    );
    event.seq = wire.seq;
    Ok(Some(event))
}

/// Frame asking the server to route a job's updates to this connection.
pub fn encode_join(job_id: &JobId) -> String {
    serde_json::json!({
        "event": EVENT_JOIN_JOB,
        "data": { "job_id": job_id.as_str() },
    })
    .to_string()
}
