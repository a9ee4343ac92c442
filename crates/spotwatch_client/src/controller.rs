use std::sync::Arc;
use std::time::Duration;

use spotwatch_core::{update, AppState, AppViewModel, Effect, JobId, Msg, ProgressEvent};
use spotwatch_logging::{sw_debug, sw_error, sw_info, sw_trace, sw_warn};

use crate::api::JobStatusSnapshot;
use crate::channel::ChannelHandler;
use crate::settings::ClientSettings;
use crate::timer::TimerScope;
use crate::widgets::{Navigator, WidgetBindings};

/// Turns channel events into widget updates and the post-completion navigation.
///
/// Pending navigations belong to the controller: [`teardown`](Self::teardown)
/// or dropping the controller cancels them.
pub struct JobProgressController {
    state: AppState,
    settings: ClientSettings,
    widgets: WidgetBindings,
    navigator: Arc<dyn Navigator>,
    focus: Option<JobId>,
    timers: TimerScope,
}

impl JobProgressController {
    pub fn new(
        settings: ClientSettings,
        widgets: WidgetBindings,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            state: AppState::with_navigation_delay(settings.navigation_delay),
            settings,
            widgets,
            navigator,
            focus: None,
            timers: TimerScope::new(),
        }
    }

    /// Only react to events for `job_id`; the server broadcasts every job's
    /// progress to every connection.
    pub fn with_focus(mut self, job_id: JobId) -> Self {
        self.focus = Some(job_id);
        self
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    /// Whether any job or the connection changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    /// Feeds a status snapshot through the same path as a pushed event.
    pub fn seed(&mut self, snapshot: JobStatusSnapshot) {
        self.on_job_progress(snapshot.into_event());
    }

    pub fn teardown(&mut self) {
        self.dispatch(Msg::Teardown);
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Render(view) => {
                sw_trace!("Render job {} {}", view.job_id, view.percent_text);
                self.widgets.apply(&view);
            }
            Effect::ScheduleNavigation { job_id, delay } => {
                self.schedule_navigation(&job_id, delay);
            }
            Effect::CancelScheduled => {
                sw_debug!("Cancelling pending navigations");
                self.timers.cancel_all();
            }
        }
    }

    fn schedule_navigation(&self, job_id: &JobId, delay: Duration) {
        let target = match self.settings.results_url(job_id) {
            Ok(target) => target,
            Err(err) => {
                sw_error!("No results address for job {}: {}", job_id, err);
                return;
            }
        };
        sw_info!(
            "Job {} completed; opening {} in {:?}",
            job_id,
            target,
            delay
        );
        let navigator = self.navigator.clone();
        self.timers
            .schedule(delay, move || navigator.navigate(&target));
    }
}

impl ChannelHandler for JobProgressController {
    fn on_connect(&mut self) {
        sw_info!("Connected to server");
        self.dispatch(Msg::Connected);
    }

    fn on_disconnect(&mut self) {
        sw_warn!("Disconnected from server");
        self.dispatch(Msg::Disconnected);
    }

    fn on_job_progress(&mut self, event: ProgressEvent) {
        if let Some(focus) = &self.focus {
            if &event.job_id != focus {
                sw_trace!("Ignoring progress for unrelated job {}", event.job_id);
                return;
            }
        }
        self.dispatch(Msg::JobProgress(event));
    }
}
