//! Shared configuration and error handling for Artmart
//!
//! This crate provides common functionality used across the Artmart client:
//! - Configuration management following 12-factor principles
//! - The error type shared by the API client and its callers

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{Error, Result};
