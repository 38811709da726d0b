//! Gradewatch HTTP Clients
//!
//! Small, typed HTTP clients for the two remote services the bot talks to:
//! - [`PracticumClient`] queries the homework status endpoint of the grading API
//! - [`TelegramClient`] delivers chat messages through the Telegram Bot API
//!
//! # Example
//!
//! ```no_run
//! use gradewatch_client::PracticumClient;
//!
//! #[tokio::main]
//! async fn main() -> gradewatch_client::Result<()> {
//!     let client = PracticumClient::new(
//!         "https://practicum.yandex.ru/api/user_api/homework_statuses/",
//!         "my-oauth-token",
//!     );
//!
//!     let response = client.fetch_statuses(0).await?;
//!     println!("status {}: {}", response.status, response.json()?);
//!     Ok(())
//! }
//! ```

pub mod error;
mod practicum;
mod telegram;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use practicum::{PracticumClient, RawResponse};
pub use telegram::TelegramClient;

/// Default Telegram Bot API base URL
pub const TELEGRAM_API_URL: &str = "https://api.telegram.org";
