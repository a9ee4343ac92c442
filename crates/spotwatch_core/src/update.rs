use crate::state::Applied;
use crate::{AppState, ConnectionState, Effect, Msg, Status};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    if state.is_torn_down() {
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::Connected => {
            state.set_connection(ConnectionState::Connected);
            Vec::new()
        }
        Msg::Disconnected => {
            state.set_connection(ConnectionState::Disconnected);
            Vec::new()
        }
        Msg::JobProgress(event) => match state.apply_progress(event) {
            Applied::Accepted(view) => {
                // Terminal records are frozen, so this fires once per job.
                let navigate = view.status == Status::Completed;
                let job_id = view.job_id.clone();
                let mut effects = vec![Effect::Render(view)];
                if navigate {
                    effects.push(Effect::ScheduleNavigation {
                        job_id,
                        delay: state.navigation_delay(),
                    });
                }
                effects
            }
            Applied::IgnoredTerminal | Applied::IgnoredStale => Vec::new(),
        },
        Msg::Teardown => {
            state.tear_down();
            vec![Effect::CancelScheduled]
        }
    };

    (state, effects)
}
