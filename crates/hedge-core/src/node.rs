//! Core Node trait definition

use crate::{FundState, Result};
use async_trait::async_trait;

/// Core trait implemented by every unit of work in a workflow
///
/// A node reads the shared [`FundState`], appends to its signal map or
/// message list, and returns. Nodes must never remove keys another node has
/// already written.
#[async_trait]
pub trait Node: Send + Sync {
    /// Process the shared state in place
    async fn process(&self, state: &mut FundState) -> Result<()>;

    /// Get the node's name
    fn name(&self) -> &str;
}
