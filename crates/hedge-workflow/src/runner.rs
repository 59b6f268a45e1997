//! Per-ticker workflow execution
//!
//! [`run_fund`] seeds a fresh state, invokes a compiled graph to completion
//! and parses the final message into a decision. The runner never retries:
//! an unparseable final message is logged and reported as "no decision" for
//! that ticker, permanently.

use chrono::NaiveDate;
use hedge_core::{FundState, Message, Portfolio};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

use crate::error::Result;
use crate::graph::CompiledGraph;
use hedge_agents::signal::TradingDecision;

/// Instruction message every run starts from
const INSTRUCTION: &str = "Make a trading decision based on the provided data.";

/// Inputs for one ticker invocation
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub ticker: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub portfolio: Portfolio,
    pub show_reasoning: bool,
}

/// Result of one ticker invocation
#[derive(Debug)]
pub struct FundOutcome {
    pub ticker: String,
    /// Parsed final decision; `None` when the final message was not a
    /// valid decision payload
    pub decision: Option<TradingDecision>,
    /// Whatever signals the nodes accumulated, even on a parse failure
    pub analyst_signals: BTreeMap<String, Value>,
}

/// Run the workflow once for one ticker with fresh state
pub async fn run_fund(graph: &CompiledGraph, request: RunRequest) -> Result<FundOutcome> {
    let mut state = FundState::new(
        request.ticker.clone(),
        request.start_date,
        request.end_date,
        request.portfolio,
    )
    .with_show_reasoning(request.show_reasoning);
    state.push_message(Message::human(INSTRUCTION));

    let final_state = graph.invoke(state).await?;

    Ok(FundOutcome {
        ticker: request.ticker,
        decision: parse_decision(final_state.last_message()),
        analyst_signals: final_state.data.analyst_signals,
    })
}

/// Parse the final message content as a decision; failures yield `None`
fn parse_decision(message: Option<&Message>) -> Option<TradingDecision> {
    let message = message?;
    match serde_json::from_str(&message.content) {
        Ok(decision) => Some(decision),
        Err(error) => {
            warn!(%error, content = %message.content, "final message is not a parseable decision");
            None
        }
    }
}
