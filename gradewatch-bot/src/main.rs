//! Gradewatch Bot
//!
//! Watches the review status of a homework submission and relays every
//! change to a Telegram chat.
//!
//! Architecture:
//! - Configuration: flags and environment variables, `.env` supported
//! - Repositories: grading API and Telegram behind small traits
//! - Services: response validation and status translation
//! - Scheduler: the poll loop with failure-report deduplication
//!
//! The bot runs until killed. Missing credentials are the only reason it
//! stops on its own, and that happens before any network activity.

mod config;
mod error;
mod repository;
mod scheduler;
mod service;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Args, Config};
use crate::repository::{HttpHomeworkRepository, TelegramNotifier};
use crate::scheduler::StatusPoller;
use gradewatch_client::{PracticumClient, TelegramClient};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    init_logging(args.log_file.as_deref())?;

    info!("Starting Gradewatch bot");

    let config = Config::from_args(args).context("Cannot start without credentials")?;
    config.validate()?;
    info!(
        "Loaded configuration: endpoint={}, chat_id={}",
        config.endpoint_url, config.credentials.telegram_chat_id
    );

    let http = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .context("Failed to build HTTP client")?;

    let practicum = PracticumClient::with_client(
        &config.endpoint_url,
        &config.credentials.practicum_token,
        http.clone(),
    );
    let telegram = TelegramClient::with_client(
        &config.telegram_api_url,
        &config.credentials.telegram_token,
        http,
    );

    info!("Clients initialized");

    let poller = StatusPoller::new(
        Arc::new(HttpHomeworkRepository::new(practicum)),
        Arc::new(TelegramNotifier::new(
            telegram,
            config.credentials.telegram_chat_id.clone(),
        )),
        config.retry_interval,
    );

    poller.run(config.initial_timestamp()).await;

    Ok(())
}

/// Installs the stdout logger and, when requested, an append-only file logger
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gradewatch_bot=debug,gradewatch_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    Ok(())
}
