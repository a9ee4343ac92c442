use std::time::Duration;

use spotwatch_logging::sw_debug;

use crate::view_model::{AppViewModel, JobView};
use crate::{ConnectionState, JobId, ProgressEvent, Status};

/// Delay between a job reaching `completed` and the results navigation.
pub const NAVIGATION_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq, Eq)]
struct JobRecord {
    job_id: JobId,
    progress: u8,
    status: Status,
    last_seq: Option<u64>,
}

/// Outcome of feeding one progress event into the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Applied {
    Accepted(JobView),
    IgnoredTerminal,
    IgnoredStale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    connection: ConnectionState,
    jobs: Vec<JobRecord>,
    navigation_delay: Duration,
    torn_down: bool,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_navigation_delay(NAVIGATION_DELAY)
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_navigation_delay(navigation_delay: Duration) -> Self {
        Self {
            connection: ConnectionState::default(),
            jobs: Vec::new(),
            navigation_delay,
            torn_down: false,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            connection: self.connection,
            jobs: self
                .jobs
                .iter()
                .map(|job| JobView::new(job.job_id.clone(), job.progress, job.status.clone()))
                .collect(),
        }
    }

    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    pub fn navigation_delay(&self) -> Duration {
        self.navigation_delay
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_connection(&mut self, connection: ConnectionState) {
        if self.connection != connection {
            self.connection = connection;
            self.dirty = true;
        }
    }

    pub(crate) fn tear_down(&mut self) {
        self.torn_down = true;
    }

    pub(crate) fn apply_progress(&mut self, event: ProgressEvent) -> Applied {
        let ProgressEvent {
            job_id,
            progress,
            status,
            seq,
        } = event;

        let Some(index) = self.jobs.iter().position(|job| job.job_id == job_id) else {
            // First sighting creates the record implicitly.
            self.jobs.push(JobRecord {
                job_id: job_id.clone(),
                progress,
                status: status.clone(),
                last_seq: seq,
            });
            self.dirty = true;
            return Applied::Accepted(JobView::new(job_id, progress, status));
        };
        let record = &mut self.jobs[index];

        if record.status.is_terminal() {
            sw_debug!(
                "Ignoring {} event for job {} already {}",
                status,
                job_id,
                record.status
            );
            return Applied::IgnoredTerminal;
        }

        if let (Some(last), Some(next)) = (record.last_seq, seq) {
            if next <= last {
                sw_debug!(
                    "Dropping stale event for job {} (seq {} <= {})",
                    job_id,
                    next,
                    last
                );
                return Applied::IgnoredStale;
            }
        }

        record.progress = progress;
        record.status = status;
        if seq.is_some() {
            record.last_seq = seq;
        }
        self.dirty = true;
        Applied::Accepted(JobView::new(
            job_id,
            record.progress,
            record.status.clone(),
        ))
    }
}
