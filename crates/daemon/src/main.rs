// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! droverd: host agent entry point.
//!
//! Exit code 0 means a clean shutdown; [`AGENT_RESTART_EXIT_CODE`] asks
//! the supervisor to start a fresh process.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use drover_agent::{
    AgentPaths, HeartbeatController, HttpController, SessionOutcome, AGENT_RESTART_EXIT_CODE,
};
use drover_core::AgentConfig;
use drover_engine::{run_worker, ActionQueue, QueueTuning};

#[tokio::main]
async fn main() {
    std::process::exit(run().await);
}

async fn run() -> i32 {
    let paths = match AgentPaths::load() {
        Ok(paths) => paths,
        Err(err) => {
            eprintln!("droverd: {err}");
            return 1;
        }
    };
    let _lock = match paths.acquire_lock() {
        Ok(file) => file,
        Err(err) => {
            eprintln!("droverd: {err}");
            return 1;
        }
    };
    let _log_guard = init_logging(&paths);

    let config = match AgentConfig::load(&paths.config_path) {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "failed to load config");
            return 1;
        }
    };
    let hostname = detect_hostname(&config);
    info!(
        hostname,
        controller_host = config.controller_host,
        controller_port = config.controller_port,
        "agent starting"
    );

    let queue = Arc::new(ActionQueue::new(QueueTuning {
        max_retries: config.max_retries,
        sleep_between_retries: Duration::from_secs(config.sleep_between_retries),
        poll_interval: Duration::from_secs(config.queue_poll_interval),
        command_timeout: (config.command_timeout > 0)
            .then(|| Duration::from_secs(config.command_timeout)),
        driver_script: config.driver_script.clone(),
    }));

    let cancel = CancellationToken::new();
    spawn_signal_handlers(cancel.clone());
    let worker = {
        let queue = Arc::clone(&queue);
        let cancel = cancel.clone();
        tokio::spawn(async move { run_worker(&queue, cancel).await })
    };

    let transport = HttpController::new(&config.controller_host, config.controller_port);
    let mut session =
        HeartbeatController::new(transport, Arc::clone(&queue), config, hostname, cancel.clone());
    let outcome = session.run().await;

    cancel.cancel();
    let _ = worker.await;

    match outcome {
        SessionOutcome::Restart => {
            info!("exiting for restart");
            AGENT_RESTART_EXIT_CODE
        }
        SessionOutcome::Stopped => {
            info!("agent stopped");
            0
        }
    }
}

fn detect_hostname(config: &AgentConfig) -> String {
    if let Some(name) = &config.hostname {
        return name.clone();
    }
    nix::unistd::gethostname()
        .ok()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_else(|| "localhost".to_string())
}

/// Log to the agent log file; RUST_LOG overrides the default level.
fn init_logging(paths: &AgentPaths) -> tracing_appender::non_blocking::WorkerGuard {
    let file = tracing_appender::rolling::never(
        &paths.state_dir,
        paths
            .log_path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("droverd.log")),
    );
    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    guard
}

fn spawn_signal_handlers(cancel: CancellationToken) {
    tokio::spawn(async move {
        use tokio::signal::unix::{signal, SignalKind};
        let mut term = match signal(SignalKind::terminate()) {
            Ok(term) => term,
            Err(err) => {
                error!(error = %err, "failed to install SIGTERM handler");
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = term.recv() => {}
        }
        info!("shutdown signal received");
        cancel.cancel();
    });
}
