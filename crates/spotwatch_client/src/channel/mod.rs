//! Push channel: lifecycle and job-progress events delivered to a handler.
//!
//! A [`ProgressChannel`] is the receiving end of an mpsc queue of
//! [`ChannelEvent`]s. The WebSocket transport ([`WsTransport`]) feeds one from
//! a live server; tests feed one by hand through [`ProgressChannel::pair`].

mod codec;
mod ws;

use spotwatch_core::ProgressEvent;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::settings::SettingsError;

pub use codec::{decode_frame, encode_join, EVENT_JOB_PROGRESS, EVENT_JOIN_JOB};
pub use ws::WsTransport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    Connected,
    Disconnected,
    JobProgress(ProgressEvent),
}

/// Callbacks invoked for each channel event, one at a time.
pub trait ChannelHandler {
    fn on_connect(&mut self);
    fn on_disconnect(&mut self);
    fn on_job_progress(&mut self, event: ProgressEvent);
}

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("failed to connect to {url}: {message}")]
    Connect { url: String, message: String },
    #[error("malformed frame: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

pub struct ProgressChannel {
    rx: mpsc::Receiver<ChannelEvent>,
}

impl ProgressChannel {
    pub fn new(rx: mpsc::Receiver<ChannelEvent>) -> Self {
        Self { rx }
    }

    /// A channel plus the sender that feeds it.
    pub fn pair(buffer: usize) -> (mpsc::Sender<ChannelEvent>, Self) {
        let (tx, rx) = mpsc::channel(buffer);
        (tx, Self::new(rx))
    }

    pub async fn next_event(&mut self) -> Option<ChannelEvent> {
        self.rx.recv().await
    }

    /// Dispatches every event to `handler` until all senders are gone.
    pub async fn run<H: ChannelHandler + ?Sized>(mut self, handler: &mut H) {
        while let Some(event) = self.rx.recv().await {
            dispatch(handler, event);
        }
    }
}

pub fn dispatch<H: ChannelHandler + ?Sized>(handler: &mut H, event: ChannelEvent) {
    match event {
        ChannelEvent::Connected => handler.on_connect(),
        ChannelEvent::Disconnected => handler.on_disconnect(),
        ChannelEvent::JobProgress(progress) => handler.on_job_progress(progress),
    }
}
