//! Notification repository
//!
//! Delivers text messages to the configured chat.

use async_trait::async_trait;
use gradewatch_client::{ClientError, TelegramClient};

/// Repository trait for message delivery
///
/// Implementations report failures; deciding to swallow them is up to the
/// caller.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends `text` to the chat this notifier is bound to
    async fn notify(&self, text: &str) -> Result<(), ClientError>;
}

/// Telegram implementation of Notifier
pub struct TelegramNotifier {
    client: TelegramClient,
    chat_id: String,
}

impl TelegramNotifier {
    /// Creates a notifier bound to one chat
    ///
    /// # Arguments
    /// * `client` - Telegram Bot API client
    /// * `chat_id` - Chat that receives every message
    pub fn new(client: TelegramClient, chat_id: String) -> Self {
        Self { client, chat_id }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, text: &str) -> Result<(), ClientError> {
        self.client.send_message(&self.chat_id, text).await
    }
}
