//! Homework status poller
//!
//! Polls the grading API for status changes and relays them to the chat.
//! A cycle never aborts the loop: every failure becomes one failure report,
//! and identical reports in a row are sent only once.

use std::sync::Arc;
use tokio::time::{self, Duration};
use tracing::{debug, error, info, warn};

use crate::error::PollError;
use crate::repository::{HomeworkRepository, Notifier};
use crate::service::{check_response, current_time, parse_status, work_item};

/// Prefix of every failure report sent to the chat
const FAILURE_PREFIX: &str = "Program failure";

/// State carried from one cycle to the next
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    /// `from_date` for the next request; never decreases
    pub current_timestamp: i64,

    /// Last failure report, empty when the last cycle succeeded
    pub last_error_message: String,
}

impl PollState {
    /// Creates the state for a fresh loop
    pub fn new(current_timestamp: i64) -> Self {
        Self {
            current_timestamp,
            last_error_message: String::new(),
        }
    }

    /// Moves the window to the server-reported time
    ///
    /// An absent value keeps the current window.
    fn advance_to(&mut self, current_time: Option<i64>) {
        match current_time {
            Some(time) if time >= self.current_timestamp => self.current_timestamp = time,
            Some(time) => warn!(
                "Server time {} is older than {}, keeping the current window",
                time, self.current_timestamp
            ),
            None => warn!(
                "Response has no current_time, polling from {} again",
                self.current_timestamp
            ),
        }
    }
}

/// What a single cycle ended with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A status change was found and its message handed to the notifier
    Delivered(String),

    /// The API reported no changes
    NoChange,

    /// The cycle failed; `reported` is false when the same report was
    /// already sent by an earlier cycle
    Failed { report: String, reported: bool },
}

/// Result of a successful fetch-and-validate step
struct Update {
    message: Option<String>,
    current_time: Option<i64>,
}

/// Poller that relays homework status changes
pub struct StatusPoller {
    repository: Arc<dyn HomeworkRepository>,
    notifier: Arc<dyn Notifier>,
    retry_interval: Duration,
}

impl StatusPoller {
    /// Creates a new status poller
    ///
    /// # Arguments
    /// * `repository` - Source of homework status responses
    /// * `notifier` - Destination for status and failure messages
    /// * `retry_interval` - Pause after every cycle
    pub fn new(
        repository: Arc<dyn HomeworkRepository>,
        notifier: Arc<dyn Notifier>,
        retry_interval: Duration,
    ) -> Self {
        Self {
            repository,
            notifier,
            retry_interval,
        }
    }

    /// Runs the polling loop forever
    ///
    /// The loop state lives in this call frame only.
    pub async fn run(&self, initial_timestamp: i64) {
        info!(
            "Starting status poller (from_date: {}, interval: {:?})",
            initial_timestamp, self.retry_interval
        );

        let mut state = PollState::new(initial_timestamp);

        loop {
            debug!("Polling for status changes since {}", state.current_timestamp);

            match self.poll_once(&mut state).await {
                CycleOutcome::Delivered(message) => debug!("Relayed: {}", message),
                CycleOutcome::NoChange => debug!("Idle until next poll"),
                CycleOutcome::Failed { report, reported } => {
                    debug!("Waiting after failed cycle: {} (reported: {})", report, reported)
                }
            }

            time::sleep(self.retry_interval).await;
        }
    }

    /// Performs a single poll cycle without waiting
    pub async fn poll_once(&self, state: &mut PollState) -> CycleOutcome {
        match self.check_for_update(state.current_timestamp).await {
            Ok(update) => {
                let outcome = match update.message {
                    Some(message) => {
                        self.deliver(&message).await;
                        CycleOutcome::Delivered(message)
                    }
                    None => {
                        debug!("No status changes");
                        CycleOutcome::NoChange
                    }
                };

                state.advance_to(update.current_time);
                state.last_error_message.clear();
                outcome
            }
            Err(e) => self.report_failure(state, e).await,
        }
    }

    /// Fetches, validates and translates one response
    ///
    /// Only the first homework record is read and translated; the API lists
    /// the most recent change first, and later records in the same response
    /// are neither relayed nor checked.
    async fn check_for_update(&self, from_date: i64) -> Result<Update, PollError> {
        let raw = self
            .repository
            .fetch_statuses(from_date)
            .await
            .map_err(|e| {
                let err = PollError::Transport(e);
                err.log();
                err
            })?;

        if !raw.is_ok() {
            let err = PollError::ApiStatusNotOk { status: raw.status };
            err.log();
            return Err(err);
        }

        let response = raw.json().map_err(|e| {
            let err = PollError::MalformedResponse(e.to_string());
            err.log();
            err
        })?;

        let homeworks = check_response(&response)?;

        if homeworks.len() > 1 {
            debug!(
                "{} homework records in response, relaying only the first",
                homeworks.len()
            );
        }

        let message = homeworks
            .first()
            .map(|record| work_item(record).and_then(|item| parse_status(&item)))
            .transpose()?;

        Ok(Update {
            message,
            current_time: current_time(&response),
        })
    }

    /// Reports a failed cycle, once per distinct report
    async fn report_failure(&self, state: &mut PollState, failure: PollError) -> CycleOutcome {
        error!(kind = failure.kind(), "Poll cycle failed: {}", failure);

        let report = format!("{}: {}", FAILURE_PREFIX, failure);
        let reported = report != state.last_error_message;

        if reported {
            self.deliver(&report).await;
        } else {
            debug!("Failure already reported, not notifying again");
        }

        state.last_error_message = report.clone();

        CycleOutcome::Failed { report, reported }
    }

    /// Best-effort delivery: failures are logged and dropped
    async fn deliver(&self, text: &str) {
        info!("Sending message: {}", text);

        match self.notifier.notify(text).await {
            Ok(()) => info!("Message sent"),
            Err(e) => error!("Message not sent: {}", e),
        }
    }
}
