//! Core abstractions for hedge-rs
//!
//! This crate defines the fundamental traits and types shared by every node
//! in a trading workflow: the [`Node`] trait, the [`FundState`] record that
//! flows through a run, and the closed set of analyst identifiers.

pub mod analyst;
pub mod error;
pub mod node;
pub mod state;

pub use analyst::AnalystKey;
pub use error::{Error, Result};
pub use node::Node;
pub use state::{FundData, FundState, Message, MessageRole, Portfolio, RunMetadata};
