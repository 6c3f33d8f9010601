//! Core types and shared functionality for tubex.
//!
//! This crate provides:
//! - Unified error types
//! - Layered configuration

pub mod config;
pub mod error;

pub use config::{AppConfig, ConfigError};
pub use error::Error;
