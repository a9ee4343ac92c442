use crate::{ConnectionState, JobId, PresentationState, Status};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub connection: ConnectionState,
    /// Jobs in the order they were first seen.
    pub jobs: Vec<JobView>,
}

impl AppViewModel {
    pub fn job(&self, job_id: &JobId) -> Option<&JobView> {
        self.jobs.iter().find(|job| &job.job_id == job_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobView {
    pub job_id: JobId,
    pub progress: u8,
    pub status: Status,
    pub presentation: PresentationState,
    /// `"{progress}% complete"`.
    pub percent_text: String,
}

impl JobView {
    pub(crate) fn new(job_id: JobId, progress: u8, status: Status) -> Self {
        Self {
            presentation: PresentationState::for_status(&status),
            percent_text: format!("{progress}% complete"),
            job_id,
            progress,
            status,
        }
    }
}
