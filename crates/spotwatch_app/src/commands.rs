use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, bail, Context, Result};
use spotwatch_client::{
    candidate_from_path, dispatch, ApiError, ClientSettings, JobProgressController,
    JobStatusSource, ReqwestJobApi, TransientNotifier, UploadGate, WidgetBindings, WsTransport,
};
use spotwatch_core::{format_duration, format_file_size, JobId, Status};
use spotwatch_logging::{sw_info, sw_warn};

use crate::terminal::{
    TerminalNavigator, TerminalPercentText, TerminalProgressBar, TerminalStatusBadge,
};

const CHANNEL_BUFFER: usize = 64;

/// Follows `job_id` until it reaches a terminal state and returns that state.
/// A completed job returns once its results navigation has fired.
pub async fn watch(settings: ClientSettings, job_id: JobId, seed: bool) -> Result<Status> {
    let started = Instant::now();
    let (navigator, mut navigated) = TerminalNavigator::new();
    let widgets = WidgetBindings::new()
        .with_progress_fill(TerminalProgressBar)
        .with_status_badge(TerminalStatusBadge)
        .with_percent_text(TerminalPercentText);
    let mut controller =
        JobProgressController::new(settings.clone(), widgets, Arc::new(navigator))
            .with_focus(job_id.clone());

    let transport = WsTransport::new(&settings, vec![job_id.clone()])?;
    let (mut channel, transport_task) = transport.spawn(CHANNEL_BUFFER);

    if seed {
        let api = ReqwestJobApi::new(settings.clone())?;
        match api.fetch_status(&job_id).await {
            Ok(snapshot) => controller.seed(snapshot),
            Err(ApiError::NotFound(id)) => {
                transport_task.abort();
                bail!("Job {id} not found");
            }
            Err(err) => sw_warn!("Could not load initial status for job {}: {}", job_id, err),
        }
    }

    let outcome = loop {
        if controller.consume_dirty() {
            if let Some(status) = finished_without_results(&controller, &job_id) {
                break Ok(status);
            }
        }
        tokio::select! {
            event = channel.next_event() => match event {
                Some(event) => dispatch(&mut controller, event),
                None => break Err(anyhow!("Push channel closed")),
            },
            target = navigated.recv() => {
                sw_info!("Navigated to {:?}", target);
                break Ok(Status::Completed);
            }
        }
    };

    controller.teardown();
    transport_task.abort();
    if outcome.is_ok() {
        println!("Finished in {}", format_duration(started.elapsed().as_secs()));
    }
    outcome
}

/// Failed and cancelled jobs end the watch right away; completed ones wait
/// for the navigation.
fn finished_without_results(controller: &JobProgressController, job_id: &JobId) -> Option<Status> {
    let view = controller.view();
    let job = view.job(job_id)?;
    match job.status {
        Status::Failed | Status::Cancelled => Some(job.status.clone()),
        _ => None,
    }
}

/// Returns `true` when every file passes the upload gate.
pub fn check(settings: &ClientSettings, files: &[PathBuf]) -> Result<bool> {
    let notifier = Arc::new(TransientNotifier::new(settings.notification_ttl));
    let gate = UploadGate::new(settings.upload.clone(), notifier.clone());

    let mut all_ok = true;
    for path in files {
        let candidate = candidate_from_path(path)
            .with_context(|| format!("Failed to inspect {:?}", path))?;
        if gate.validate(&candidate) {
            println!(
                "{}: ok ({}, {})",
                path.display(),
                candidate.mime_type,
                format_file_size(candidate.size)
            );
        } else {
            all_ok = false;
            let reason = notifier
                .banners()
                .into_iter()
                .next()
                .map(|banner| banner.message)
                .unwrap_or_default();
            println!("{}: {}", path.display(), reason);
        }
    }
    Ok(all_ok)
}

/// Returns the server's verdict on the cancellation.
pub async fn cancel(settings: ClientSettings, job_id: JobId) -> Result<bool> {
    let api = ReqwestJobApi::new(settings)?;
    let cancelled = api.cancel(&job_id).await?;
    if cancelled {
        println!("Job {job_id} cancelled");
    } else {
        println!("Job {job_id} could not be cancelled");
    }
    Ok(cancelled)
}
