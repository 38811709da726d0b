//! Service layer
//!
//! Pure business logic for a poll cycle: validating the shape of an API
//! response and turning a homework record into a notification message.
//! Every failure is logged here before it is returned.

mod translator;
mod validator;

pub use translator::parse_status;
pub use validator::{check_response, current_time, work_item};
