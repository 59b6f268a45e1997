//! Workflow graph assembly and execution for hedge-rs
//!
//! This crate wires analyst, risk and portfolio nodes into a directed
//! acyclic graph and executes it once per ticker: a generic
//! [`GraphBuilder`]/[`CompiledGraph`] pair, the trading-specific assembly in
//! [`build_trading_workflow`], and the per-ticker [`run_fund`] entry point.

pub mod builder;
pub mod error;
pub mod graph;
pub mod runner;

pub use builder::{PORTFOLIO_NODE, RISK_NODE, START_NODE, build_trading_workflow, parse_selection};
pub use error::{Result, WorkflowError};
pub use graph::{CompiledGraph, END, GraphBuilder};
pub use runner::{FundOutcome, RunRequest, run_fund};
