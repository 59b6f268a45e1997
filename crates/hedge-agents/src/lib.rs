//! Analyst, risk and portfolio nodes for hedge-rs
//!
//! Each analyst inspects market data for one ticker and records an
//! opinionated signal under its own key; risk management aggregates the
//! accumulated signals into an assessment, and portfolio management turns
//! the assessment into the final trading decision message.

pub mod data;
pub mod nodes;
pub mod registry;
pub mod signal;

pub use data::{Candle, FundamentalReport, Headline, MarketDataSource, StaticDataSource};
pub use nodes::{
    FundamentalsAnalystNode, PortfolioManagementNode, RiskManagementNode, SentimentAnalystNode,
    TechnicalAnalystNode, ValuationAnalystNode,
};
pub use registry::{RISK_SIGNAL_KEY, analyst_node};
pub use signal::{RiskAssessment, Signal, SignalDirection, TradeAction, TradingDecision};
