//! Status translation

use gradewatch_core::domain::homework::{HomeworkStatus, WorkItem, status_change_message};

use crate::error::PollError;

/// Builds the notification message for one homework record
///
/// # Errors
/// * `MissingField` - `homework_name` or `status` is absent
/// * `UnknownStatus` - `status` is not a known code
pub fn parse_status(item: &WorkItem) -> Result<String, PollError> {
    let result = translate(item);
    if let Err(err) = &result {
        err.log();
    }
    result
}

fn translate(item: &WorkItem) -> Result<String, PollError> {
    let name = item
        .homework_name
        .as_deref()
        .ok_or(PollError::MissingField("homework_name"))?;

    let code = item
        .status
        .as_deref()
        .ok_or(PollError::MissingField("status"))?;

    let status = HomeworkStatus::from_code(code)
        .ok_or_else(|| PollError::UnknownStatus(code.to_string()))?;

    Ok(status_change_message(name, status))
}
