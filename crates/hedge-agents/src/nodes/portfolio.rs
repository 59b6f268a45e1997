//! Portfolio management node
//!
//! Consumes the risk assessment plus the analyst signals and appends the
//! final decision message. The message content is the JSON-serialized
//! [`TradingDecision`], which the runner parses back out of the state.

use async_trait::async_trait;
use hedge_core::{AnalystKey, Error, FundState, Message, Node, Result};
use std::sync::Arc;
use tracing::debug;

use crate::data::MarketDataSource;
use crate::nodes::risk::RISK_SIGNAL_KEY;
use crate::signal::{RiskAssessment, Signal, SignalDirection, TradeAction, TradingDecision};

/// Mean signed confidence beyond this magnitude triggers a trade
const DECISION_THRESHOLD: f64 = 0.2;

/// Node that turns signals and risk limits into the final decision
pub struct PortfolioManagementNode {
    source: Arc<dyn MarketDataSource>,
}

impl PortfolioManagementNode {
    pub fn new(source: Arc<dyn MarketDataSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Node for PortfolioManagementNode {
    async fn process(&self, state: &mut FundState) -> Result<()> {
        let assessment: RiskAssessment = state
            .signal_typed(RISK_SIGNAL_KEY)?
            .ok_or_else(|| {
                Error::ProcessingFailed("risk assessment missing from state".to_string())
            })?;

        let mut score = 0.0;
        let mut counted = 0;
        for key in AnalystKey::ALL {
            if let Some(signal) = state.signal_typed::<Signal>(key.as_str())? {
                match signal.direction {
                    SignalDirection::Bullish => score += signal.confidence,
                    SignalDirection::Bearish => score -= signal.confidence,
                    SignalDirection::Neutral => {}
                }
                counted += 1;
            }
        }
        let consensus = if counted == 0 { 0.0 } else { score / counted as f64 };

        let last_close = self
            .source
            .candles(&state.data.ticker, state.data.start_date, state.data.end_date)
            .await?
            .last()
            .map(|c| c.close);

        let decision = decide(consensus, &assessment, &state.data.portfolio, last_close);
        debug!(
            ticker = %state.data.ticker,
            action = ?decision.action,
            quantity = decision.quantity,
            consensus,
            "trading decision"
        );

        let content = serde_json::to_string(&decision)
            .map_err(|e| Error::ProcessingFailed(format!("Failed to encode decision: {e}")))?;
        state.push_message(Message::assistant(self.name(), content));
        Ok(())
    }

    fn name(&self) -> &str {
        "portfolio_management"
    }
}

fn decide(
    consensus: f64,
    assessment: &RiskAssessment,
    portfolio: &hedge_core::Portfolio,
    last_close: Option<f64>,
) -> TradingDecision {
    if consensus > DECISION_THRESHOLD {
        let budget = assessment.max_position_size.min(portfolio.cash);
        let quantity = match last_close {
            Some(price) if price > 0.0 => (budget / price).floor() as i64,
            _ => 0,
        };
        if quantity > 0 {
            return TradingDecision {
                action: TradeAction::Buy,
                quantity,
                confidence: consensus.min(1.0),
                reasoning: format!(
                    "consensus {consensus:+.2} above entry threshold; buying within limit {:.0}",
                    assessment.max_position_size
                ),
            };
        }
        return TradingDecision {
            action: TradeAction::Hold,
            quantity: 0,
            confidence: consensus.min(1.0),
            reasoning: "bullish consensus but no price or budget for a position".to_string(),
        };
    }

    if consensus < -DECISION_THRESHOLD {
        if portfolio.stock > 0 {
            return TradingDecision {
                action: TradeAction::Sell,
                quantity: portfolio.stock,
                confidence: consensus.abs().min(1.0),
                reasoning: format!(
                    "consensus {consensus:+.2} below exit threshold; closing {} shares",
                    portfolio.stock
                ),
            };
        }
        return TradingDecision {
            action: TradeAction::Hold,
            quantity: 0,
            confidence: consensus.abs().min(1.0),
            reasoning: "bearish consensus with no position to close".to_string(),
        };
    }

    TradingDecision {
        action: TradeAction::Hold,
        quantity: 0,
        confidence: (1.0 - consensus.abs()).clamp(0.0, 1.0),
        reasoning: format!("consensus {consensus:+.2} inside hold band"),
    }
}
