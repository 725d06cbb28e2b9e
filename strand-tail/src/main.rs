//! Strand Tail
//!
//! Follows one file in a task's sandbox on a remote agent and prints every new
//! line to stdout, prefixed with the agent host and the task's endpoint port.
//!
//! The task and agent are described through environment variables (see
//! `Config::from_env`). Logs go to stderr so stdout carries only the tailed lines.
//! Ctrl-C stops the tail cooperatively.

mod config;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use strand_tail::{Listener, Shutdown, TailOutcome};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "strand_tail=info,strand_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate()?;
    info!(
        "Loaded configuration: task={}, agent={}:{}, file={}",
        config.task_id, config.agent_hostname, config.agent_port, config.file_name
    );

    let listener = Listener::new(config.file_name.clone(), config.task(), config.agent())
        .context("Invalid task/agent configuration")?
        .with_settings(config.settings());

    let (tx, mut rx) = mpsc::channel::<String>(config.sink_capacity);
    let shutdown = Shutdown::new();

    let printer = tokio::spawn(async move {
        while let Some(record) = rx.recv().await {
            println!("{}", record);
        }
    });

    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Received Ctrl-C, stopping tail");
                shutdown.trigger();
            }
        });
    }

    let result = listener.run(tx, shutdown).await;

    // The sender was moved into `run`; the printer drains what is left and exits.
    if let Err(e) = printer.await {
        warn!("Printer task panicked: {}", e);
    }

    match result {
        Ok(TailOutcome::Cancelled) => {
            info!("Tail cancelled");
            Ok(())
        }
        Ok(TailOutcome::SinkClosed) => {
            warn!("Output closed, tail stopped");
            Ok(())
        }
        Err(e) => {
            error!("Tail failed ({:?}): {}", e.kind(), e);
            Err(e).context("Tail stopped")
        }
    }
}
