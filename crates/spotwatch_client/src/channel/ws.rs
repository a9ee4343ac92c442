use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use spotwatch_core::JobId;
use spotwatch_logging::{sw_debug, sw_error, sw_info, sw_trace, sw_warn};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use url::Url;

use super::codec::{decode_frame, encode_join};
use super::{ChannelError, ChannelEvent, ProgressChannel};
use crate::settings::ClientSettings;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

enum SessionEnd {
    /// Connection went away; reconnect.
    Lost,
    /// Nobody is listening any more; stop for good.
    ReceiverGone,
}

/// WebSocket push transport with a fixed-delay reconnect loop.
#[derive(Debug, Clone)]
pub struct WsTransport {
    url: Url,
    join_jobs: Vec<JobId>,
    connect_timeout: Duration,
    reconnect_delay: Duration,
}

impl WsTransport {
    pub fn new(settings: &ClientSettings, join_jobs: Vec<JobId>) -> Result<Self, ChannelError> {
        Ok(Self {
            url: settings.ws_url()?,
            join_jobs,
            connect_timeout: settings.connect_timeout,
            reconnect_delay: settings.reconnect_delay,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Starts the connection loop. It runs until the returned channel is
    /// dropped or the handle is aborted.
    pub fn spawn(self, buffer: usize) -> (ProgressChannel, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(buffer);
        let handle = tokio::spawn(self.run(tx));
        (ProgressChannel::new(rx), handle)
    }

    async fn run(self, tx: mpsc::Sender<ChannelEvent>) {
        loop {
            sw_info!("Connecting push channel to {}", self.url);

            let connected =
                tokio::time::timeout(self.connect_timeout, connect_async(self.url.as_str())).await;
            match connected {
                Ok(Ok((ws_stream, _response))) => {
                    if tx.send(ChannelEvent::Connected).await.is_err() {
                        return;
                    }
                    match self.run_session(ws_stream, &tx).await {
                        SessionEnd::ReceiverGone => return,
                        SessionEnd::Lost => {
                            sw_warn!("Push channel to {} lost", self.url);
                            if tx.send(ChannelEvent::Disconnected).await.is_err() {
                                return;
                            }
                        }
                    }
                }
                Ok(Err(err)) => self.report_connect_failure(err.to_string()),
                Err(_elapsed) => self.report_connect_failure(format!(
                    "no handshake within {:?}",
                    self.connect_timeout
                )),
            }

            tokio::select! {
                _ = tokio::time::sleep(self.reconnect_delay) => {}
                _ = tx.closed() => return,
            }
        }
    }

    fn report_connect_failure(&self, message: String) {
        let err = ChannelError::Connect {
            url: self.url.to_string(),
            message,
        };
        sw_error!("{}", err);
    }

    async fn run_session(&self, ws_stream: WsStream, tx: &mpsc::Sender<ChannelEvent>) -> SessionEnd {
        let (mut sink, mut stream) = ws_stream.split();

        for job_id in &self.join_jobs {
            if let Err(err) = sink.send(Message::Text(encode_join(job_id))).await {
                sw_error!("Failed to join job {}: {}", job_id, err);
                return SessionEnd::Lost;
            }
            sw_debug!("Joined job {}", job_id);
        }

        loop {
            let msg = tokio::select! {
                msg = stream.next() => msg,
                _ = tx.closed() => return SessionEnd::ReceiverGone,
            };

            match msg {
                Some(Ok(Message::Text(text))) => match decode_frame(&text) {
                    Ok(Some(event)) => {
                        if tx.send(ChannelEvent::JobProgress(event)).await.is_err() {
                            return SessionEnd::ReceiverGone;
                        }
                    }
                    Ok(None) => sw_trace!("Ignoring frame {}", text),
                    Err(err) => sw_warn!("Skipping frame: {}", err),
                },
                Some(Ok(Message::Close(frame))) => {
                    sw_info!("Server closed push channel: {:?}", frame);
                    return SessionEnd::Lost;
                }
                Some(Ok(_)) => {
                    // Ping/pong are answered by tungstenite; binary frames are not used.
                }
                Some(Err(err)) => {
                    sw_error!("Push channel receive error: {}", err);
                    return SessionEnd::Lost;
                }
                None => return SessionEnd::Lost,
            }
        }
    }
}
