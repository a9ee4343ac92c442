use std::sync::Once;
use std::time::Duration;

use pretty_assertions::assert_eq;
use spotwatch_core::{
    update, AppState, ConnectionState, Effect, JobId, Msg, ProgressEvent, Status, NAVIGATION_DELAY,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(spotwatch_logging::initialize_for_tests);
}

fn progress(state: AppState, job_id: &str, percent: i64, status: Status) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::JobProgress(ProgressEvent::new(job_id, percent, status)),
    )
}

fn navigations(effects: &[Effect]) -> Vec<(JobId, Duration)> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::ScheduleNavigation { job_id, delay } => Some((job_id.clone(), *delay)),
            _ => None,
        })
        .collect()
}

#[test]
fn lifecycle_callbacks_toggle_connection_state() {
    init_logging();
    let mut state = AppState::new();
    assert_eq!(state.view().connection, ConnectionState::Disconnected);
    assert!(!state.consume_dirty());

    let (mut state, effects) = update(state, Msg::Connected);
    assert!(effects.is_empty());
    assert_eq!(state.connection(), ConnectionState::Connected);
    assert!(state.consume_dirty());

    // Repeating the same state is not a change.
    let (mut state, _) = update(state, Msg::Connected);
    assert!(!state.consume_dirty());

    let (state, effects) = update(state, Msg::Disconnected);
    assert!(effects.is_empty());
    assert_eq!(state.connection(), ConnectionState::Disconnected);
}

#[test]
fn full_lifecycle_schedules_navigation_once_on_completion() {
    init_logging();
    let state = AppState::new();

    let (state, effects) = progress(state, "job-7", 0, Status::Pending);
    assert!(navigations(&effects).is_empty());
    assert_eq!(state.view().jobs[0].percent_text, "0% complete");

    let (state, effects) = progress(state, "job-7", 40, Status::Processing);
    assert!(navigations(&effects).is_empty());
    assert_eq!(state.view().jobs[0].percent_text, "40% complete");

    let (state, effects) = progress(state, "job-7", 85, Status::Processing);
    assert!(navigations(&effects).is_empty());
    assert_eq!(state.view().jobs[0].percent_text, "85% complete");

    let (state, effects) = progress(state, "job-7", 100, Status::Completed);
    assert_eq!(
        navigations(&effects),
        vec![(JobId::from("job-7"), NAVIGATION_DELAY)]
    );
    let view = state.view();
    assert_eq!(view.jobs.len(), 1);
    assert_eq!(view.jobs[0].percent_text, "100% complete");
    assert_eq!(view.jobs[0].presentation.label, "Completed");
}

#[test]
fn render_effect_carries_the_latest_presentation() {
    init_logging();
    let (_state, effects) = progress(AppState::new(), "12", 55, Status::Processing);

    match effects.as_slice() {
        [Effect::Render(view)] => {
            assert_eq!(view.job_id, JobId::from(12u64));
            assert_eq!(view.progress, 55);
            assert_eq!(view.presentation.badge_class, "bg-primary");
            assert_eq!(view.presentation.icon, "fa-spinner fa-spin");
            assert_eq!(view.presentation.label, "Processing");
            assert_eq!(view.percent_text, "55% complete");
        }
        other => panic!("unexpected effects: {other:?}"),
    }
}

#[test]
fn custom_navigation_delay_is_used() {
    init_logging();
    let state = AppState::with_navigation_delay(Duration::from_millis(250));
    let (_state, effects) = progress(state, "a", 100, Status::Completed);

    assert_eq!(
        navigations(&effects),
        vec![(JobId::from("a"), Duration::from_millis(250))]
    );
}

#[test]
fn failed_and_cancelled_never_navigate() {
    init_logging();
    let state = AppState::new();
    let (state, effects) = progress(state, "f", 30, Status::Failed);
    assert!(navigations(&effects).is_empty());
    let (state, effects) = progress(state, "c", 10, Status::Cancelled);
    assert!(navigations(&effects).is_empty());

    let view = state.view();
    assert_eq!(view.jobs[0].presentation.badge_class, "bg-danger");
    assert_eq!(view.jobs[1].presentation.badge_class, "bg-warning");
}

#[test]
fn teardown_cancels_and_ignores_later_messages() {
    init_logging();
    let (state, _) = progress(AppState::new(), "a", 10, Status::Processing);

    let (state, effects) = update(state, Msg::Teardown);
    assert_eq!(effects, vec![Effect::CancelScheduled]);

    let before = state.view();
    let (state, effects) = progress(state, "a", 100, Status::Completed);
    assert!(effects.is_empty());
    assert_eq!(state.view(), before);
}
