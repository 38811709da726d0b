//! Homework domain types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Review status of a homework submission
///
/// The set is closed: any other code reported by the API is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeworkStatus {
    /// Reviewed and accepted
    Approved,
    /// Taken for review
    Reviewing,
    /// Reviewed with remarks
    Rejected,
}

impl HomeworkStatus {
    /// All known statuses, in API order
    pub const ALL: [HomeworkStatus; 3] = [
        HomeworkStatus::Approved,
        HomeworkStatus::Reviewing,
        HomeworkStatus::Rejected,
    ];

    /// Looks up a status by its wire code
    ///
    /// Returns `None` for codes outside the known set.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }

    /// Wire code as sent by the grading API
    pub fn code(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    /// Human-readable verdict for this status
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "The work has been reviewed: the reviewer liked everything. Hooray!",
            HomeworkStatus::Reviewing => "The work has been taken for review.",
            HomeworkStatus::Rejected => "The work has been reviewed: the reviewer has remarks.",
        }
    }
}

impl std::fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// One homework record from the `homeworks` list
///
/// Both fields the bot relies on are optional here so that a record missing
/// one of them still deserializes and can be reported precisely.
/// Everything else the API sends (id, lesson name, reviewer comment, dates)
/// is kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homework_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WorkItem {
    /// Creates a work item with both required fields set
    pub fn new(homework_name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            homework_name: Some(homework_name.into()),
            status: Some(status.into()),
            extra: Map::new(),
        }
    }
}

/// Formats the notification sent when a homework changes status
pub fn status_change_message(homework_name: &str, status: HomeworkStatus) -> String {
    format!(
        "Review status changed for \"{}\". {}",
        homework_name,
        status.verdict()
    )
}
