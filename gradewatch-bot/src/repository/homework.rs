//! Homework status repository
//!
//! Fetches raw homework status responses from the grading API.

use async_trait::async_trait;
use gradewatch_client::{ClientError, PracticumClient, RawResponse};

/// Repository trait for the homework status endpoint
#[async_trait]
pub trait HomeworkRepository: Send + Sync {
    /// Fetches statuses changed since `from_date`
    ///
    /// A non-200 answer is not an error here; the caller inspects
    /// `RawResponse::status`. Errors mean no response was obtained.
    ///
    /// # Arguments
    /// * `from_date` - Unix timestamp (seconds) of the start of the window
    async fn fetch_statuses(&self, from_date: i64) -> Result<RawResponse, ClientError>;
}

/// HTTP implementation of HomeworkRepository
pub struct HttpHomeworkRepository {
    client: PracticumClient,
}

impl HttpHomeworkRepository {
    /// Creates a new HTTP homework repository
    pub fn new(client: PracticumClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HomeworkRepository for HttpHomeworkRepository {
    async fn fetch_statuses(&self, from_date: i64) -> Result<RawResponse, ClientError> {
        self.client.fetch_statuses(from_date).await
    }
}
