//! Grading API client

use crate::error::{ClientError, Result};
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;

/// HTTP client for the homework status endpoint
///
/// The client never judges the response: a non-200 status is returned to the
/// caller as-is inside [`RawResponse`], so the caller decides how to report it.
#[derive(Debug, Clone)]
pub struct PracticumClient {
    /// Full endpoint URL
    endpoint: String,
    /// OAuth token sent in the `Authorization` header
    token: String,
    /// HTTP client instance
    client: Client,
}

impl PracticumClient {
    /// Create a new client for the given endpoint and OAuth token
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(endpoint, token, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            client,
        }
    }

    /// Fetch homework statuses changed since `from_date`
    ///
    /// # Arguments
    /// * `from_date` - Unix timestamp (seconds) of the start of the window
    ///
    /// # Returns
    /// The HTTP status and raw body of the response. Only transport failures
    /// are reported as errors.
    pub async fn fetch_statuses(&self, from_date: i64) -> Result<RawResponse> {
        tracing::debug!("GET {} from_date={}", self.endpoint, from_date);

        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await?;

        RawResponse::read(response).await
    }
}

/// Status code and body of a grading API response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Undecoded response body
    pub body: String,
}

impl RawResponse {
    async fn read(response: reqwest::Response) -> Result<Self> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(Self { status, body })
    }

    /// Whether the server answered 200 OK
    pub fn is_ok(&self) -> bool {
        self.status == reqwest::StatusCode::OK.as_u16()
    }

    /// Decode the body as JSON
    pub fn json(&self) -> Result<Value> {
        serde_json::from_str(&self.body)
            .map_err(|e| ClientError::ParseError(format!("invalid JSON body: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const STATUS_PATH: &str = "/api/user_api/homework_statuses/";

    fn client_for(server: &MockServer) -> PracticumClient {
        PracticumClient::new(format!("{}{}", server.uri(), STATUS_PATH), "secret")
    }

    #[tokio::test]
    async fn test_fetch_statuses_sends_token_and_from_date() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(STATUS_PATH))
            .and(header("Authorization", "OAuth secret"))
            .and(query_param("from_date", "1000"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "homeworks": [], "current_time": 1100 })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server).fetch_statuses(1000).await.unwrap();

        assert!(response.is_ok());
        assert_eq!(
            response.json().unwrap(),
            json!({ "homeworks": [], "current_time": 1100 })
        );
    }

    #[tokio::test]
    async fn test_fetch_statuses_returns_non_ok_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(STATUS_PATH))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let response = client_for(&server).fetch_statuses(0).await.unwrap();

        assert_eq!(response.status, 503);
        assert!(!response.is_ok());
        assert_eq!(response.body, "maintenance");
    }

    #[tokio::test]
    async fn test_fetch_statuses_unreachable_server() {
        let client = PracticumClient::new(format!("http://127.0.0.1:1{}", STATUS_PATH), "secret");

        let err = client.fetch_statuses(0).await.unwrap_err();
        assert!(matches!(err, ClientError::RequestFailed(_)));
    }

    #[test]
    fn test_json_rejects_invalid_body() {
        let response = RawResponse {
            status: 200,
            body: "<html>".to_string(),
        };
        assert!(matches!(response.json(), Err(ClientError::ParseError(_))));
    }
}
