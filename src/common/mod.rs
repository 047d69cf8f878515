//! Common utilities shared across the validation pipeline

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

pub use error::{Error, Result};
