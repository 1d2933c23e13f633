//! Terminal output helpers for the watermark client
//!
//! Provides shared CLI functionality:
//! - Status messages and view panels
//! - Loading spinners

#![warn(missing_docs)]

pub mod output;
pub mod progress;
