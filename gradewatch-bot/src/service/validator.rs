//! Response validation
//!
//! Checks the structure of a decoded homework status response and extracts
//! the list of homework records.

use gradewatch_core::domain::homework::WorkItem;
use serde::Deserialize;
use serde_json::Value;

use crate::error::PollError;

/// Keys whose presence means the API refused the request
const REJECTION_KEYS: [&str; 2] = ["code", "error"];

/// Validates a decoded response and returns its homework records
///
/// The records are returned as sent, in the order the API sent them in;
/// their contents are not inspected here. An empty list means nothing
/// changed since the requested timestamp.
///
/// # Errors
/// * `AuthOrDate` - the response carries a `code` or `error` key
/// * `MalformedResponse` - not an object, or no `homeworks` list
pub fn check_response(response: &Value) -> Result<&[Value], PollError> {
    let Some(fields) = response.as_object() else {
        return Err(logged(PollError::MalformedResponse(format!(
            "expected a JSON object, got {}",
            type_name(response)
        ))));
    };

    if REJECTION_KEYS.iter().any(|key| fields.contains_key(*key)) {
        return Err(logged(rejection(fields)));
    }

    let homeworks = fields.get("homeworks").ok_or_else(|| {
        logged(PollError::MalformedResponse(
            "no `homeworks` key in response".to_string(),
        ))
    })?;

    let Some(homeworks) = homeworks.as_array() else {
        return Err(logged(PollError::MalformedResponse(format!(
            "`homeworks` is {}, expected a list",
            type_name(homeworks)
        ))));
    };

    Ok(homeworks.as_slice())
}

/// Reads one homework record
///
/// Absent fields are left for the translator to report; a record that is
/// not an object, or whose `homework_name`/`status` is not a string, is
/// malformed.
pub fn work_item(record: &Value) -> Result<WorkItem, PollError> {
    WorkItem::deserialize(record).map_err(|e| {
        logged(PollError::MalformedResponse(format!(
            "homework record is not valid: {}",
            e
        )))
    })
}

/// Server time reported alongside the homework list
///
/// `None` when the field is absent or not an integer.
pub fn current_time(response: &Value) -> Option<i64> {
    response.get("current_time").and_then(Value::as_i64)
}

fn rejection(fields: &serde_json::Map<String, Value>) -> PollError {
    let code = match fields.get("code") {
        Some(Value::String(code)) => code.clone(),
        Some(other) => other.to_string(),
        None => "error".to_string(),
    };

    let message = fields
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| {
            fields
                .get("error")
                .and_then(|e| e.get("error").or(Some(e)))
                .and_then(Value::as_str)
        })
        .map(str::to_string);

    PollError::AuthOrDate { code, message }
}

fn logged(err: PollError) -> PollError {
    err.log();
    err
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_homeworks() {
        let response = json!({ "homeworks": [], "current_time": 1000 });
        assert!(check_response(&response).unwrap().is_empty());
        assert_eq!(current_time(&response), Some(1000));
    }

    #[test]
    fn test_homeworks_returned_in_order() {
        let response = json!({
            "homeworks": [
                { "homework_name": "second", "status": "reviewing" },
                { "homework_name": "first", "status": "approved" },
            ],
            "current_time": 1100,
        });

        let items = check_response(&response).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(work_item(&items[0]).unwrap(), WorkItem::new("second", "reviewing"));
        assert_eq!(work_item(&items[1]).unwrap(), WorkItem::new("first", "approved"));
    }

    #[test]
    fn test_records_returned_unchanged() {
        let response = json!({
            "homeworks": [
                { "homework_name": "task1", "status": "approved" },
                "garbage",
                { "homework_name": 7 },
            ],
        });

        let items = check_response(&response).unwrap();
        assert_eq!(items, response["homeworks"].as_array().unwrap().as_slice());
    }

    #[test]
    fn test_missing_homeworks_key() {
        for response in [json!({}), json!({ "current_time": 5 }), json!({ "homework": [] })] {
            assert!(matches!(
                check_response(&response),
                Err(PollError::MalformedResponse(_))
            ));
        }
    }

    #[test]
    fn test_code_key_wins_over_other_content() {
        let responses = [
            json!({ "code": "invalid_token" }),
            json!({ "code": "not_authenticated", "message": "Invalid token", "homeworks": [] }),
            json!({ "code": 42, "homeworks": [{ "homework_name": "x", "status": "approved" }] }),
            json!({ "error": { "error": "Wrong from_date format" }, "code": "UnknownError" }),
        ];

        for response in responses {
            assert!(matches!(
                check_response(&response),
                Err(PollError::AuthOrDate { .. })
            ));
        }
    }

    #[test]
    fn test_rejection_details() {
        let err = check_response(&json!({
            "error": { "error": "Wrong from_date format" },
            "code": "UnknownError",
        }))
        .unwrap_err();

        match err {
            PollError::AuthOrDate { code, message } => {
                assert_eq!(code, "UnknownError");
                assert_eq!(message.as_deref(), Some("Wrong from_date format"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_not_an_object() {
        for response in [json!([]), json!("homeworks"), json!(null)] {
            assert!(matches!(
                check_response(&response),
                Err(PollError::MalformedResponse(_))
            ));
        }
    }

    #[test]
    fn test_homeworks_not_a_list() {
        let response = json!({ "homeworks": { "homework_name": "x" } });
        assert!(matches!(
            check_response(&response),
            Err(PollError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_record_with_wrong_shape() {
        for record in [json!("task1"), json!({ "homework_name": 7, "status": "approved" })] {
            assert!(matches!(
                work_item(&record),
                Err(PollError::MalformedResponse(_))
            ));
        }
    }

    #[test]
    fn test_record_with_absent_fields_is_readable() {
        let item = work_item(&json!({ "status": "approved" })).unwrap();
        assert_eq!(item.homework_name, None);
    }

    #[test]
    fn test_current_time_absent_or_invalid() {
        assert_eq!(current_time(&json!({ "homeworks": [] })), None);
        assert_eq!(current_time(&json!({ "current_time": "soon" })), None);
    }
}
