//! Spotwatch client: push channel, status API and the effect-running controller.
mod api;
mod channel;
mod controller;
mod notifier;
mod settings;
mod timer;
mod upload;
mod widgets;

pub use api::{ApiError, JobStatusSnapshot, JobStatusSource, ReqwestJobApi};
pub use channel::{
    decode_frame, dispatch, encode_join, ChannelError, ChannelEvent, ChannelHandler,
    ProgressChannel, WsTransport, EVENT_JOB_PROGRESS, EVENT_JOIN_JOB,
};
pub use controller::JobProgressController;
pub use notifier::{Banner, BannerId, Notifier, Severity, TransientNotifier};
pub use settings::{ClientSettings, SettingsError, NOTIFICATION_TTL};
pub use timer::{TimerHandle, TimerScope};
pub use upload::{candidate_from_path, mime_type_for_path, UploadGate};
pub use widgets::{Navigator, PercentText, ProgressFill, StatusBadge, WidgetBindings};
