mod cli;
mod config;
mod logging;
mod report;

use std::fs;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use chrono::Utc;
use clap::Parser;
use engine_logging::{engine_info, engine_warn};
use screening_core::{ScreeningRequest, ScreeningResult};
use screening_engine::{EngineEvent, EngineHandle};

use crate::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = config::load(&cli.config)?.with_overrides(&cli);
    logging::initialize(config.log, cli.verbose);

    let settings = config.client_settings()?;
    let credential = config.credential()?;
    // Covers the whole poll budget plus a few slow requests.
    let deadline = settings.poll.budget() + settings.request_timeout * 3;
    let max_attempts = settings.poll.max_attempts;

    let content =
        fs::read(&cli.file).with_context(|| format!("failed to read {:?}", cli.file))?;
    let file_name = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.tle".to_string());
    let mut request = ScreeningRequest::new(file_name, content);
    request.catalog_limit = cli.limit;
    request.profile = cli.profile;

    let engine = EngineHandle::new(settings, Arc::new(credential))?;
    engine.submit(request);

    let result = wait_for(&engine, deadline, |event| match event {
        EngineEvent::Submitted { job_id } => {
            eprintln!("Queued as job {job_id}");
            None
        }
        EngineEvent::Progress(progress) => {
            eprintln!(
                "Job {} {} (attempt {}/{})",
                progress.job_id, progress.status, progress.attempt, max_attempts
            );
            None
        }
        EngineEvent::Completed { result, .. } => Some(result),
        EngineEvent::Cancelled { .. } | EngineEvent::Summary(_) => None,
    })
    .context("screening service did not answer in time")?;

    let result = match result {
        Ok(result) => result,
        Err(err) => bail!("{err}"),
    };
    print!("{}", report::render(&result, &Utc::now().to_rfc3339()));

    if cli.summary {
        engine.request_summary();
        let summary = wait_for(&engine, Duration::from_secs(120), |event| match event {
            EngineEvent::Summary(summary) => Some(summary),
            _ => None,
        })
        .context("summary request did not answer in time")?;
        match summary {
            Ok(url) => println!("Summary report: {url}"),
            Err(err) => engine_warn!("Summary unavailable: {}", err),
        }
    }

    if matches!(result, ScreeningResult::Failed { .. } | ScreeningResult::Error { .. }) {
        bail!("screening did not complete");
    }
    engine_info!("Screening finished: {}", result.kind());
    Ok(())
}

/// Pumps engine events through `select` until it yields a value or `timeout` passes.
fn wait_for<T>(
    engine: &EngineHandle,
    timeout: Duration,
    mut select: impl FnMut(EngineEvent) -> Option<T>,
) -> Option<T> {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if let Some(event) = engine.recv_timeout(Duration::from_millis(200)) {
            if let Some(value) = select(event) {
                return Some(value);
            }
        }
    }
    None
}
