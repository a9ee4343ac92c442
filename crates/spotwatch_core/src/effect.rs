use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Push the job's latest presentation to the bound widgets.
    Render(crate::JobView),
    /// One-shot navigation to the job's results view after `delay`.
    ScheduleNavigation {
        job_id: crate::JobId,
        delay: Duration,
    },
    /// Drop every pending deferred effect.
    CancelScheduled,
}
