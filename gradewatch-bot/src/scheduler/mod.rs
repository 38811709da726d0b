//! Scheduler layer for the bot
//!
//! This layer drives the poll cycle: it asks the grading API for changes,
//! relays them to the chat, reports failures once, and waits between
//! cycles. It owns the only mutable state the bot has.

pub mod poller;

pub use poller::StatusPoller;
