//! Common utilities module
//!
//! Shared error type used across the colorization stages.

pub mod error;

pub use error::{ColorizeError, Result};
