//! Gradewatch Core
//!
//! Core types shared by the Gradewatch client and bot.
//!
//! This crate contains:
//! - Domain types: homework records and the review status codes they carry
//! - The verdict table mapping every known status code to a sentence

pub mod domain;
