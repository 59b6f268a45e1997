//! Closed dispatch table from analyst keys to node implementations
//!
//! The mapping is an exhaustive `match` over [`AnalystKey`], so adding an
//! analyst forces this table (and only this table) to change.

use hedge_core::{AnalystKey, Node};
use std::sync::Arc;

use crate::data::MarketDataSource;
use crate::nodes::{
    FundamentalsAnalystNode, SentimentAnalystNode, TechnicalAnalystNode, ValuationAnalystNode,
};

pub use crate::nodes::risk::RISK_SIGNAL_KEY;

/// Construct the node implementation for one analyst key
pub fn analyst_node(key: AnalystKey, source: Arc<dyn MarketDataSource>) -> Arc<dyn Node> {
    match key {
        AnalystKey::Technical => Arc::new(TechnicalAnalystNode::new(source)),
        AnalystKey::Fundamentals => Arc::new(FundamentalsAnalystNode::new(source)),
        AnalystKey::Sentiment => Arc::new(SentimentAnalystNode::new(source)),
        AnalystKey::Valuation => Arc::new(ValuationAnalystNode::new(source)),
    }
}
