//! Trading workflow assembly
//!
//! Wires the selected analysts between a passthrough `start` node and the
//! unconditional risk-management → portfolio-management tail:
//!
//! ```text
//! start ─┬─► technical_analyst ───┐
//!        ├─► fundamentals_analyst ┼─► risk_management ─► portfolio_management ─► END
//!        ├─► sentiment_analyst ───┤
//!        └─► valuation_analyst ───┘
//! ```
//!
//! Assembly is pure: compile once per distinct selection, invoke the
//! compiled graph once per ticker.

use async_trait::async_trait;
use hedge_core::{AnalystKey, FundState, Node};
use std::sync::Arc;

use crate::error::{Result, WorkflowError};
use crate::graph::{CompiledGraph, END, GraphBuilder};
use hedge_agents::data::MarketDataSource;
use hedge_agents::nodes::{PortfolioManagementNode, RiskManagementNode};
use hedge_agents::registry::analyst_node;

/// Entry node name
pub const START_NODE: &str = "start";
/// Risk-management node name
pub const RISK_NODE: &str = "risk_management";
/// Portfolio-management node name
pub const PORTFOLIO_NODE: &str = "portfolio_management";

/// Passthrough entry node; the workflow fans out from here
struct StartNode;

#[async_trait]
impl Node for StartNode {
    async fn process(&self, _state: &mut FundState) -> hedge_core::Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        START_NODE
    }
}

/// Resolve CLI-style analyst words against the closed registry
///
/// Fails with [`WorkflowError::UnknownAnalyst`] on the first word outside
/// the fixed set; no partial selection escapes.
pub fn parse_selection(keys: &[String]) -> Result<Vec<AnalystKey>> {
    keys.iter()
        .map(|word| {
            word.parse::<AnalystKey>()
                .map_err(|_| WorkflowError::UnknownAnalyst { key: word.clone() })
        })
        .collect()
}

/// Build and compile the trading workflow for a selection of analysts
///
/// An empty or absent selection defaults to all four analysts. Duplicate
/// keys collapse to one node with one fan-in edge. Selected analysts are
/// always inserted in [`AnalystKey::ALL`] order, so the same selection set
/// yields the same execution order regardless of how it was spelled. Risk
/// and portfolio management are appended unconditionally.
pub fn build_trading_workflow(
    selection: Option<&[AnalystKey]>,
    source: Arc<dyn MarketDataSource>,
) -> Result<CompiledGraph> {
    let selected: Vec<AnalystKey> = match selection {
        None | Some([]) => AnalystKey::ALL.to_vec(),
        Some(keys) => AnalystKey::ALL
            .into_iter()
            .filter(|key| keys.contains(key))
            .collect(),
    };

    let mut builder = GraphBuilder::new().add_node(START_NODE, Arc::new(StartNode) as Arc<dyn Node>);
    for key in &selected {
        builder = builder
            .add_node(key.as_str(), analyst_node(*key, Arc::clone(&source)))
            .add_edge(START_NODE, key.as_str());
    }

    builder = builder
        .add_node(RISK_NODE, Arc::new(RiskManagementNode::new(Arc::clone(&source))) as Arc<dyn Node>)
        .add_node(
            PORTFOLIO_NODE,
            Arc::new(PortfolioManagementNode::new(Arc::clone(&source))) as Arc<dyn Node>,
        );

    for key in &selected {
        builder = builder.add_edge(key.as_str(), RISK_NODE);
    }

    builder
        .add_edge(RISK_NODE, PORTFOLIO_NODE)
        .add_edge(PORTFOLIO_NODE, END)
        .set_entry_point(START_NODE)
        .compile()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hedge_agents::data::StaticDataSource;

    fn source() -> Arc<dyn MarketDataSource> {
        Arc::new(StaticDataSource::new())
    }

    fn position(graph: &CompiledGraph, name: &str) -> usize {
        graph
            .execution_order()
            .position(|n| n == name)
            .unwrap_or_else(|| panic!("node '{name}' not in execution order"))
    }

    #[test]
    fn test_default_selection_is_all_analysts() {
        let graph = build_trading_workflow(None, source()).unwrap();
        let order: Vec<&str> = graph.execution_order().collect();
        assert_eq!(
            order,
            vec![
                "start",
                "technical_analyst",
                "fundamentals_analyst",
                "sentiment_analyst",
                "valuation_analyst",
                "risk_management",
                "portfolio_management",
            ]
        );
    }

    #[test]
    fn test_empty_selection_defaults_to_all() {
        let graph = build_trading_workflow(Some(&[]), source()).unwrap();
        assert_eq!(graph.execution_order().count(), 7);
    }

    #[test]
    fn test_subset_selection_wires_fan_in() {
        let selection = [AnalystKey::Technical, AnalystKey::Sentiment];
        let graph = build_trading_workflow(Some(&selection), source()).unwrap();

        let order: Vec<&str> = graph.execution_order().collect();
        assert!(!order.contains(&"fundamentals_analyst"));
        assert!(!order.contains(&"valuation_analyst"));

        // Every selected analyst feeds risk management.
        for key in selection {
            assert!(
                graph
                    .edges()
                    .iter()
                    .any(|(from, to)| from == key.as_str() && to == RISK_NODE)
            );
        }
    }

    #[test]
    fn test_risk_precedes_portfolio() {
        for selection in [
            None,
            Some(&[AnalystKey::Valuation][..]),
            Some(&[AnalystKey::Technical, AnalystKey::Fundamentals][..]),
        ] {
            let graph = build_trading_workflow(selection, source()).unwrap();
            assert!(position(&graph, RISK_NODE) < position(&graph, PORTFOLIO_NODE));
            assert_eq!(position(&graph, START_NODE), 0);
        }
    }

    #[test]
    fn test_duplicate_keys_deduplicated() {
        let selection = [AnalystKey::Technical, AnalystKey::Technical];
        let graph = build_trading_workflow(Some(&selection), source()).unwrap();

        let analysts: Vec<&str> = graph
            .execution_order()
            .filter(|n| *n == "technical_analyst")
            .collect();
        assert_eq!(analysts.len(), 1);

        let fan_in = graph
            .edges()
            .iter()
            .filter(|(from, to)| from == "technical_analyst" && to == RISK_NODE)
            .count();
        assert_eq!(fan_in, 1);
    }

    #[test]
    fn test_selection_order_does_not_change_execution_order() {
        let forward = [AnalystKey::Technical, AnalystKey::Valuation];
        let backward = [AnalystKey::Valuation, AnalystKey::Technical];

        let a: Vec<String> = build_trading_workflow(Some(&forward), source())
            .unwrap()
            .execution_order()
            .map(String::from)
            .collect();
        let b: Vec<String> = build_trading_workflow(Some(&backward), source())
            .unwrap()
            .execution_order()
            .map(String::from)
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_selection_word_fails() {
        let err = parse_selection(&["technical_analyst".to_string(), "astrology_analyst".to_string()])
            .unwrap_err();
        assert!(matches!(err, WorkflowError::UnknownAnalyst { key } if key == "astrology_analyst"));
    }
}
