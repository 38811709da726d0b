//! Repository layer
//!
//! Repositories are thin, stateless wrappers over the HTTP clients. They
//! give the poller focused interfaces to the grading API and the chat
//! without any business logic.
//!
//! All repositories are trait-based to enable testing and mocking.

mod homework;
mod notifier;

// Re-export traits
pub use homework::HomeworkRepository;
pub use notifier::Notifier;

// Re-export implementations
pub use homework::HttpHomeworkRepository;
pub use notifier::TelegramNotifier;
