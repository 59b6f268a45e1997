//! Risk management node
//!
//! Aggregates every analyst signal already present in the state into a risk
//! assessment: a position-size ceiling scaled by realized volatility, cut
//! further when the analysts disagree.

use async_trait::async_trait;
use hedge_core::{AnalystKey, FundState, Node, Result};
use std::sync::Arc;
use tracing::debug;

use crate::data::MarketDataSource;
use crate::signal::{RiskAssessment, Signal, SignalDirection};

/// Signal key the risk assessment is recorded under
pub const RISK_SIGNAL_KEY: &str = "risk_management_agent";

/// Fraction of cash a single position may consume before risk scaling
const BASE_POSITION_FRACTION: f64 = 0.25;

/// Daily-return volatility assumed when no price history is available
const DEFAULT_VOLATILITY: f64 = 0.02;

/// Node that turns accumulated analyst signals into position limits
pub struct RiskManagementNode {
    source: Arc<dyn MarketDataSource>,
}

impl RiskManagementNode {
    pub fn new(source: Arc<dyn MarketDataSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Node for RiskManagementNode {
    async fn process(&self, state: &mut FundState) -> Result<()> {
        let mut bullish = 0;
        let mut bearish = 0;
        let mut neutral = 0;
        for key in AnalystKey::ALL {
            if let Some(signal) = state.signal_typed::<Signal>(key.as_str())? {
                match signal.direction {
                    SignalDirection::Bullish => bullish += 1,
                    SignalDirection::Bearish => bearish += 1,
                    SignalDirection::Neutral => neutral += 1,
                }
            }
        }

        let candles = self
            .source
            .candles(&state.data.ticker, state.data.start_date, state.data.end_date)
            .await?;
        let volatility = realized_volatility(&candles).unwrap_or(DEFAULT_VOLATILITY);

        // Calm markets keep the full base allocation; rough ones shrink it.
        let volatility_scale = (DEFAULT_VOLATILITY / volatility).clamp(0.5, 1.0);
        // Open disagreement among analysts trims the limit again.
        let consensus_scale = if bullish > 0 && bearish > 0 { 0.8 } else { 1.0 };
        let max_position_size =
            state.data.portfolio.cash * BASE_POSITION_FRACTION * volatility_scale * consensus_scale;

        let assessment = RiskAssessment {
            max_position_size,
            volatility,
            bullish,
            bearish,
            neutral,
            reasoning: format!(
                "{bullish} bullish / {bearish} bearish / {neutral} neutral; \
                 daily volatility {:.2}%; position limit {max_position_size:.0}",
                volatility * 100.0
            ),
        };
        debug!(
            ticker = %state.data.ticker,
            max_position_size,
            volatility,
            "risk assessment"
        );
        state.record_signal_typed(RISK_SIGNAL_KEY, &assessment)
    }

    fn name(&self) -> &str {
        "risk_management"
    }
}

/// Standard deviation of daily returns; None with fewer than two closes
fn realized_volatility(candles: &[crate::data::Candle]) -> Option<f64> {
    if candles.len() < 2 {
        return None;
    }
    let returns: Vec<f64> = candles
        .windows(2)
        .map(|pair| pair[1].close / pair[0].close - 1.0)
        .collect();
    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let variance =
        returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / returns.len() as f64;
    Some(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{StaticDataSource, fixtures};
    use crate::signal::Signal;
    use chrono::NaiveDate;
    use hedge_core::Portfolio;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn state() -> FundState {
        FundState::new(
            "AAPL",
            date("2024-01-01"),
            date("2024-04-01"),
            Portfolio::new(100_000.0, 0),
        )
    }

    #[tokio::test]
    async fn test_aggregates_signal_counts() {
        let mut state = state();
        state
            .record_signal_typed(
                "technical_analyst",
                &Signal::new(SignalDirection::Bullish, 0.8, "up"),
            )
            .unwrap();
        state
            .record_signal_typed(
                "fundamentals_analyst",
                &Signal::new(SignalDirection::Bearish, 0.6, "down"),
            )
            .unwrap();

        let node = RiskManagementNode::new(Arc::new(StaticDataSource::new()));
        node.process(&mut state).await.unwrap();

        let assessment: RiskAssessment = state.signal_typed(RISK_SIGNAL_KEY).unwrap().unwrap();
        assert_eq!(assessment.bullish, 1);
        assert_eq!(assessment.bearish, 1);
        assert_eq!(assessment.neutral, 0);
        // Disagreement trims the base 25% allocation.
        assert!(assessment.max_position_size < 100_000.0 * BASE_POSITION_FRACTION);
    }

    #[tokio::test]
    async fn test_limit_without_data_uses_default_volatility() {
        let mut state = state();
        state
            .record_signal_typed(
                "technical_analyst",
                &Signal::new(SignalDirection::Bullish, 0.8, "up"),
            )
            .unwrap();

        let node = RiskManagementNode::new(Arc::new(StaticDataSource::new()));
        node.process(&mut state).await.unwrap();

        let assessment: RiskAssessment = state.signal_typed(RISK_SIGNAL_KEY).unwrap().unwrap();
        assert_eq!(assessment.volatility, DEFAULT_VOLATILITY);
        assert_eq!(assessment.max_position_size, 25_000.0);
    }

    #[tokio::test]
    async fn test_smooth_ramp_keeps_full_allocation() {
        let mut state = state();
        let node = RiskManagementNode::new(Arc::new(StaticDataSource::new().with_candles(
            "AAPL",
            fixtures::ramp_candles(date("2024-01-01"), 60, 100.0, 0.1),
        )));
        node.process(&mut state).await.unwrap();

        let assessment: RiskAssessment = state.signal_typed(RISK_SIGNAL_KEY).unwrap().unwrap();
        // A gentle ramp has near-zero return dispersion.
        assert!(assessment.volatility < DEFAULT_VOLATILITY);
        assert_eq!(assessment.max_position_size, 25_000.0);
    }
}
