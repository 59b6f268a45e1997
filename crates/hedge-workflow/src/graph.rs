//! Directed acyclic workflow graphs
//!
//! A graph is assembled with [`GraphBuilder`] and turned into an executable
//! [`CompiledGraph`] by [`GraphBuilder::compile`]. Compilation is pure and
//! validates the whole structure up front — entry point, edge endpoints,
//! acyclicity, reachability, a single terminal — so an invalid graph never
//! executes partially.
//!
//! # Example
//!
//! ```no_run
//! use hedge_workflow::{END, GraphBuilder};
//! use std::sync::Arc;
//!
//! # async fn example(analyst: Arc<dyn hedge_core::Node>, state: hedge_core::FundState)
//! # -> hedge_workflow::Result<()> {
//! let graph = GraphBuilder::new()
//!     .add_node("analyst", analyst)
//!     .add_edge("analyst", END)
//!     .set_entry_point("analyst")
//!     .compile()?;
//!
//! let final_state = graph.invoke(state).await?;
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, WorkflowError};
use hedge_core::{FundState, Node};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Reserved edge target marking the end of the workflow
pub const END: &str = "__end__";

/// Builder for workflow graphs
#[derive(Default)]
pub struct GraphBuilder {
    nodes: Vec<(String, Arc<dyn Node>)>,
    edges: Vec<(String, String)>,
    entry: Option<String>,
}

impl GraphBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node under `name`
    ///
    /// Registration order is preserved and breaks ties in the execution
    /// order, so building the same graph twice executes identically.
    pub fn add_node(mut self, name: impl Into<String>, node: Arc<dyn Node>) -> Self {
        self.nodes.push((name.into(), node));
        self
    }

    /// Wire a directed edge from `from` to `to` (`to` may be [`END`])
    pub fn add_edge(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.edges.push((from.into(), to.into()));
        self
    }

    /// Mark the node execution starts from
    pub fn set_entry_point(mut self, name: impl Into<String>) -> Self {
        self.entry = Some(name.into());
        self
    }

    /// Validate the graph and fix its execution order
    pub fn compile(self) -> Result<CompiledGraph> {
        let mut names = HashSet::new();
        for (name, _) in &self.nodes {
            if !names.insert(name.as_str()) {
                return Err(WorkflowError::DuplicateNode { name: name.clone() });
            }
        }

        let entry = self.entry.ok_or(WorkflowError::MissingEntryPoint)?;
        if !names.contains(entry.as_str()) {
            return Err(WorkflowError::UnknownNode { name: entry });
        }

        // Repeated add_edge calls collapse to one edge.
        let mut edges: Vec<(String, String)> = Vec::new();
        for edge in self.edges {
            if !names.contains(edge.0.as_str()) {
                return Err(WorkflowError::UnknownNode { name: edge.0 });
            }
            if edge.1 != END && !names.contains(edge.1.as_str()) {
                return Err(WorkflowError::UnknownNode { name: edge.1 });
            }
            if !edges.contains(&edge) {
                edges.push(edge);
            }
        }

        let terminals = edges.iter().filter(|(_, to)| to == END).count();
        if terminals != 1 {
            return Err(WorkflowError::TerminalCount { found: terminals });
        }

        let order = topological_order(&self.nodes, &edges)?;

        // Every node must sit on a path from the entry point.
        let mut reachable = HashSet::new();
        reachable.insert(entry.as_str());
        let mut frontier = vec![entry.as_str()];
        while let Some(current) = frontier.pop() {
            for (from, to) in &edges {
                if from == current && to != END && reachable.insert(to.as_str()) {
                    frontier.push(to.as_str());
                }
            }
        }
        if let Some((name, _)) = self.nodes.iter().find(|(n, _)| !reachable.contains(n.as_str()))
        {
            return Err(WorkflowError::Unreachable { name: name.clone() });
        }

        let nodes: HashMap<String, Arc<dyn Node>> = self.nodes.into_iter().collect();
        let order_nodes = order
            .iter()
            .map(|name| {
                let node = nodes.get(name).cloned();
                debug_assert!(node.is_some());
                node.ok_or_else(|| WorkflowError::UnknownNode { name: name.clone() })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(CompiledGraph {
            order,
            nodes: order_nodes,
            edges,
        })
    }
}

/// Kahn topological sort; ties resolve by node registration order
fn topological_order(
    nodes: &[(String, Arc<dyn Node>)],
    edges: &[(String, String)],
) -> Result<Vec<String>> {
    let mut indegree: HashMap<&str, usize> =
        nodes.iter().map(|(name, _)| (name.as_str(), 0)).collect();
    for (_, to) in edges {
        if to != END {
            if let Some(count) = indegree.get_mut(to.as_str()) {
                *count += 1;
            }
        }
    }

    let mut order = Vec::with_capacity(nodes.len());
    let mut remaining: Vec<&str> = nodes.iter().map(|(name, _)| name.as_str()).collect();
    while !remaining.is_empty() {
        let Some(position) = remaining.iter().position(|name| indegree[name] == 0) else {
            return Err(WorkflowError::CyclicGraph);
        };
        let ready = remaining.remove(position);
        order.push(ready.to_string());
        for (from, to) in edges {
            if from == ready && to != END {
                if let Some(count) = indegree.get_mut(to.as_str()) {
                    *count -= 1;
                }
            }
        }
    }
    Ok(order)
}

/// An executable workflow graph
///
/// Invocation runs every node to completion in a deterministic topological
/// order; there is no partial-results contract — either the whole graph
/// runs or the invocation fails.
pub struct CompiledGraph {
    order: Vec<String>,
    nodes: Vec<Arc<dyn Node>>,
    edges: Vec<(String, String)>,
}

impl std::fmt::Debug for CompiledGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledGraph")
            .field("order", &self.order)
            .field("nodes", &format_args!("<{} nodes>", self.nodes.len()))
            .field("edges", &self.edges)
            .finish()
    }
}

impl CompiledGraph {
    /// Execute the graph over `state`, returning the final state
    pub async fn invoke(&self, mut state: FundState) -> Result<FundState> {
        for (name, node) in self.order.iter().zip(&self.nodes) {
            debug!(node = %name, "executing node");
            node.process(&mut state)
                .await
                .map_err(|source| WorkflowError::NodeFailed {
                    node: name.clone(),
                    source,
                })?;
        }
        Ok(state)
    }

    /// Node names in execution order
    pub fn execution_order(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// The graph's deduplicated edge list
    pub fn edges(&self) -> &[(String, String)] {
        &self.edges
    }
}
