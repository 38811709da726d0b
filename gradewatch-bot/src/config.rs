//! Bot configuration
//!
//! Settings come from command line flags or environment variables (a `.env`
//! file is loaded into the environment beforehand). Credentials are optional
//! at the parser level so the bot itself can report every missing one.

use crate::error::CredentialMissing;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::error;

/// Homework status endpoint of the grading API
pub const DEFAULT_ENDPOINT_URL: &str =
    "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "gradewatch")]
#[command(about = "Relays homework review status changes to a Telegram chat", long_about = None)]
pub struct Args {
    /// OAuth token for the grading API
    #[arg(long, env = "PRACTICUM_TOKEN", hide_env_values = true)]
    pub practicum_token: Option<String>,

    /// Telegram bot token
    #[arg(long, env = "TELEGRAM_TOKEN", hide_env_values = true)]
    pub telegram_token: Option<String>,

    /// Chat that receives the notifications
    #[arg(long, env = "TELEGRAM_CHAT_ID")]
    pub telegram_chat_id: Option<String>,

    /// Homework status endpoint
    #[arg(long, env = "ENDPOINT_URL", default_value = DEFAULT_ENDPOINT_URL)]
    pub endpoint_url: String,

    /// Telegram Bot API base URL
    #[arg(long, env = "TELEGRAM_API_URL", default_value = gradewatch_client::TELEGRAM_API_URL)]
    pub telegram_api_url: String,

    /// Seconds to wait after every poll cycle
    #[arg(long, env = "RETRY_INTERVAL", default_value_t = 600)]
    pub retry_interval: u64,

    /// Timeout in seconds for each outbound HTTP request
    #[arg(long, env = "REQUEST_TIMEOUT", default_value_t = 30)]
    pub request_timeout: u64,

    /// Unix timestamp to start polling from (defaults to now)
    #[arg(long, env = "FROM_DATE")]
    pub from_date: Option<i64>,

    /// Also append logs to this file
    #[arg(long, env = "LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

/// The three secrets the bot cannot run without
#[derive(Clone)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl Credentials {
    /// Checks that every credential is present and non-blank
    ///
    /// Logs at critical severity and names every missing variable on failure.
    pub fn check(
        practicum_token: Option<String>,
        telegram_token: Option<String>,
        telegram_chat_id: Option<String>,
    ) -> Result<Self, CredentialMissing> {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        let practicum_token = present(practicum_token);
        let telegram_token = present(telegram_token);
        let telegram_chat_id = present(telegram_chat_id);

        match (practicum_token, telegram_token, telegram_chat_id) {
            (Some(practicum_token), Some(telegram_token), Some(telegram_chat_id)) => Ok(Self {
                practicum_token,
                telegram_token,
                telegram_chat_id,
            }),
            (practicum_token, telegram_token, telegram_chat_id) => {
                let missing: Vec<&'static str> = [
                    ("PRACTICUM_TOKEN", practicum_token.is_none()),
                    ("TELEGRAM_TOKEN", telegram_token.is_none()),
                    ("TELEGRAM_CHAT_ID", telegram_chat_id.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, missing)| missing.then_some(name))
                .collect();

                let err = CredentialMissing(missing);
                error!(critical = true, "{}", err);
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

/// Bot configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,

    /// Homework status endpoint
    pub endpoint_url: String,

    /// Telegram Bot API base URL
    pub telegram_api_url: String,

    /// Fixed pause after every cycle, whatever its outcome
    pub retry_interval: Duration,

    /// Per-request timeout for both HTTP clients
    pub request_timeout: Duration,

    /// Starting `from_date`; `None` means the wall clock at startup
    pub from_date: Option<i64>,
}

impl Config {
    /// Builds the configuration from parsed arguments
    ///
    /// Fails before anything else when a credential is missing.
    pub fn from_args(args: Args) -> Result<Self, CredentialMissing> {
        let credentials = Credentials::check(
            args.practicum_token,
            args.telegram_token,
            args.telegram_chat_id,
        )?;

        Ok(Self {
            credentials,
            endpoint_url: args.endpoint_url,
            telegram_api_url: args.telegram_api_url,
            retry_interval: Duration::from_secs(args.retry_interval),
            request_timeout: Duration::from_secs(args.request_timeout),
            from_date: args.from_date,
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, url) in [
            ("endpoint_url", &self.endpoint_url),
            ("telegram_api_url", &self.telegram_api_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{} must start with http:// or https://", name);
            }
        }

        if self.retry_interval.is_zero() {
            anyhow::bail!("retry_interval must be greater than 0");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        Ok(())
    }

    /// Timestamp the first poll starts from
    pub fn initial_timestamp(&self) -> i64 {
        self.from_date
            .unwrap_or_else(|| chrono::Utc::now().timestamp())
    }
}
