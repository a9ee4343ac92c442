mod cli;
mod commands;
mod config;
mod terminal;

use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;
use spotwatch_core::{JobId, Status};
use spotwatch_logging::sw_debug;

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let loaded = config::load(cli.config.as_deref())?;
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    spotwatch_logging::initialize(cli.log.into(), &loaded.file.log_path(), level);
    loaded.log_source();

    let settings = config::build_settings(&loaded.file, cli.server.as_deref())?;
    sw_debug!("Using server {}", settings.server_url);

    let success = match cli.command {
        Command::Watch {
            job_id,
            no_snapshot,
        } => {
            let status = commands::watch(settings, JobId::from(job_id), !no_snapshot).await?;
            status == Status::Completed
        }
        Command::Check { files } => commands::check(&settings, &files)?,
        Command::Cancel { job_id } => commands::cancel(settings, JobId::from(job_id)).await?,
    };

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
