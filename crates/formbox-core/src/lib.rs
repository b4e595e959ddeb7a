//! Core types and trait definitions for Formbox.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The store and web crates depend on it; it depends on nothing proprietary.

pub mod entry;
pub mod error;
pub mod sanitize;
pub mod store;
pub mod submission;

pub use error::{Field, SubmissionError};
pub use submission::Submission;
