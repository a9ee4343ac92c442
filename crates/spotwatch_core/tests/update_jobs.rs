use spotwatch_core::{update, AppState, Effect, JobId, Msg, ProgressEvent, Status};

fn apply(state: AppState, event: ProgressEvent) -> (AppState, Vec<Effect>) {
    update(state, Msg::JobProgress(event))
}

#[test]
fn jobs_are_tracked_independently_in_first_seen_order() {
    let state = AppState::new();
    let (state, _) = apply(state, ProgressEvent::new("b", 5, Status::Processing));
    let (state, _) = apply(state, ProgressEvent::new("a", 70, Status::Processing));
    let (mut state, _) = apply(state, ProgressEvent::new("b", 15, Status::Processing));

    let view = state.view();
    let ids: Vec<_> = view.jobs.iter().map(|j| j.job_id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);
    assert_eq!(view.job(&JobId::from("b")).unwrap().progress, 15);
    assert_eq!(view.job(&JobId::from("a")).unwrap().progress, 70);
    assert!(state.consume_dirty());
}

#[test]
fn events_after_terminal_state_are_noops() {
    let state = AppState::new();
    let (mut state, effects) = apply(state, ProgressEvent::new("x", 100, Status::Completed));
    assert_eq!(effects.len(), 2);
    assert!(state.consume_dirty());

    // A duplicate completion must not schedule a second navigation.
    let (mut state, effects) = apply(state, ProgressEvent::new("x", 100, Status::Completed));
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());

    let (state, effects) = apply(state, ProgressEvent::new("x", 20, Status::Processing));
    assert!(effects.is_empty());
    let job = state.view().jobs[0].clone();
    assert_eq!(job.status, Status::Completed);
    assert_eq!(job.progress, 100);
}

#[test]
fn stale_sequence_numbers_are_dropped() {
    let state = AppState::new();
    let (state, _) = apply(
        state,
        ProgressEvent::new("s", 10, Status::Processing).with_seq(3),
    );
    let (state, effects) = apply(
        state,
        ProgressEvent::new("s", 5, Status::Processing).with_seq(2),
    );
    assert!(effects.is_empty());
    let (state, effects) = apply(
        state,
        ProgressEvent::new("s", 8, Status::Processing).with_seq(3),
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().jobs[0].progress, 10);

    let (state, effects) = apply(
        state,
        ProgressEvent::new("s", 30, Status::Processing).with_seq(4),
    );
    assert_eq!(effects.len(), 1);
    assert_eq!(state.view().jobs[0].progress, 30);
}

#[test]
fn unsequenced_events_are_taken_in_arrival_order() {
    let state = AppState::new();
    let (state, _) = apply(
        state,
        ProgressEvent::new("u", 50, Status::Processing).with_seq(9),
    );
    // Regression is displayed as-is; monotonicity is not enforced.
    let (state, effects) = apply(state, ProgressEvent::new("u", 45, Status::Processing));
    assert_eq!(effects.len(), 1);
    assert_eq!(state.view().jobs[0].percent_text, "45% complete");
}

#[test]
fn progress_is_clamped_to_percent_range() {
    assert_eq!(ProgressEvent::new("c", 140, Status::Processing).progress, 100);
    assert_eq!(ProgressEvent::new("c", -3, Status::Processing).progress, 0);
}

#[test]
fn unknown_status_is_kept_and_not_terminal() {
    let state = AppState::new();
    let (state, _) = apply(state, ProgressEvent::new("q", 0, Status::parse("queued")));
    let (state, effects) = apply(state, ProgressEvent::new("q", 10, Status::Processing));

    assert_eq!(effects.len(), 1);
    assert_eq!(state.view().jobs[0].status, Status::Processing);
    assert!(!Status::parse("queued").is_terminal());
    assert_eq!(Status::parse("queued").label(), "Queued");
}
