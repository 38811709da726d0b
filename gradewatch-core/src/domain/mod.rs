//! Core domain types
//!
//! These types describe what the grading API reports about a submission.
//! They are used by the bot for validation and message formatting.

pub mod homework;
