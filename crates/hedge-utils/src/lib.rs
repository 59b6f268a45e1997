//! Shared utilities for hedge-rs
//!
//! This crate provides common functionality used across the hedge-rs workspace,
//! including logging setup and process-wide environment bootstrap.

pub mod env;
pub mod logging;

pub use env::load_env;
pub use logging::init_tracing;
