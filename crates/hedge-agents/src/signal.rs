//! Signal and decision types
//!
//! Signals are recorded into the shared state as opaque JSON under the
//! producing node's key; the concrete types here define the payloads this
//! crate's nodes write and read back.

use serde::{Deserialize, Serialize};

/// Direction of an analyst's opinion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalDirection {
    Bullish,
    Bearish,
    Neutral,
}

/// One analyst's opinion on a ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub direction: SignalDirection,
    /// Confidence in [0.0, 1.0]
    pub confidence: f64,
    pub reasoning: String,
}

impl Signal {
    pub fn new(
        direction: SignalDirection,
        confidence: f64,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            direction,
            confidence: confidence.clamp(0.0, 1.0),
            reasoning: reasoning.into(),
        }
    }

    /// Neutral signal for when an analyst has nothing to work with
    pub fn neutral(reasoning: impl Into<String>) -> Self {
        Self::new(SignalDirection::Neutral, 0.0, reasoning)
    }
}

/// Output of risk management, recorded under its own signal key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Largest position value (in cash terms) the fund may take
    pub max_position_size: f64,
    /// Annualized-ish daily return volatility; falls back to a default
    /// when no price history is available
    pub volatility: f64,
    pub bullish: usize,
    pub bearish: usize,
    pub neutral: usize,
    pub reasoning: String,
}

/// Final action for one ticker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeAction {
    Buy,
    Sell,
    Hold,
}

/// The structured payload carried by the final workflow message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingDecision {
    pub action: TradeAction,
    pub quantity: i64,
    /// Confidence in [0.0, 1.0]
    pub confidence: f64,
    pub reasoning: String,
}
