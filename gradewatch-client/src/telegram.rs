//! Telegram Bot API client

use crate::error::{ClientError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// HTTP client for the Telegram Bot API
///
/// Only `sendMessage` is used; the bot never reads updates.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    /// API base URL without trailing slash
    base_url: String,
    /// Bot token, part of every method URL
    token: String,
    /// HTTP client instance
    client: Client,
}

impl TelegramClient {
    /// Create a new client with a custom base URL and HTTP client
    pub fn with_client(base_url: impl Into<String>, token: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            client,
        }
    }

    /// Get the base URL of the Bot API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a plain text message to a chat
    ///
    /// # Arguments
    /// * `chat_id` - Target chat identifier
    /// * `text` - Message text
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<()> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.token);

        // The method URL embeds the bot token; keep it out of error messages.
        let response = self
            .client
            .post(&url)
            .json(&SendMessage { chat_id, text })
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::RequestFailed(e.without_url()))?;

        let reply: Option<BotApiReply> = serde_json::from_str(&body).ok();

        match reply {
            Some(reply) if status.is_success() && reply.ok => Ok(()),
            Some(reply) => Err(ClientError::api_error(
                status.as_u16(),
                reply
                    .description
                    .unwrap_or_else(|| "Unknown error".to_string()),
            )),
            None if status.is_success() => Err(ClientError::ParseError(format!(
                "Unexpected sendMessage reply: {}",
                body
            ))),
            None => Err(ClientError::api_error(status.as_u16(), body)),
        }
    }
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct BotApiReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> TelegramClient {
        TelegramClient::with_client(server.uri(), "123:ABC", Client::new())
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = TelegramClient::with_client("https://api.telegram.org/", "t", Client::new());
        assert_eq!(client.base_url(), "https://api.telegram.org");
    }

    #[tokio::test]
    async fn test_send_message_posts_chat_and_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:ABC/sendMessage"))
            .and(body_json(json!({ "chat_id": "42", "text": "hello" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "ok": true, "result": { "message_id": 1 } })),
            )
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).send_message("42", "hello").await.unwrap();
    }

    #[tokio::test]
    async fn test_send_message_reports_api_description() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: chat not found",
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .send_message("0", "hello")
            .await
            .unwrap_err();

        match err {
            ClientError::ApiError { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Bad Request: chat not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_message_error_hides_token() {
        let client = TelegramClient::with_client("http://127.0.0.1:1", "123:ABC", Client::new());

        let err = client.send_message("42", "hello").await.unwrap_err();
        assert!(!err.to_string().contains("123:ABC"));
    }
}
