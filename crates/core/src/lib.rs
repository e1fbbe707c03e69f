//! Core types and configuration for the recession study.
//!
//! This crate provides shared types used across all other crates:
//! - Quarter and month labels
//! - GDP, housing and hypothesis-test records
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
