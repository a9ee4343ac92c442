//! Spotwatch core: pure job-progress state machine and view-model helpers.
mod effect;
mod format;
mod msg;
mod presentation;
mod state;
mod types;
mod update;
mod upload;
mod view_model;

pub use effect::Effect;
pub use format::{format_duration, format_file_size};
pub use msg::Msg;
pub use presentation::PresentationState;
pub use state::{AppState, NAVIGATION_DELAY};
pub use types::{ConnectionState, JobId, ProgressEvent, Status};
pub use update::update;
pub use upload::{FileCandidate, UploadRejection, UploadRules, MAX_UPLOAD_BYTES};
pub use view_model::{AppViewModel, JobView};
