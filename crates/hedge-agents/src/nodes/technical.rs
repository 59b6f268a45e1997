//! Technical analysis node
//!
//! Derives a signal from the ticker's price history: a short/long moving
//! average spread for trend, confirmed by momentum over the whole window.

use async_trait::async_trait;
use hedge_core::{AnalystKey, FundState, Node, Result};
use std::sync::Arc;
use tracing::debug;

use crate::data::{Candle, MarketDataSource};
use crate::signal::{Signal, SignalDirection};

const SHORT_WINDOW: usize = 10;
const LONG_WINDOW: usize = 30;

/// Trend spread below this magnitude counts as no trend
const TREND_THRESHOLD: f64 = 0.01;

/// Analyst node producing trend/momentum signals
pub struct TechnicalAnalystNode {
    source: Arc<dyn MarketDataSource>,
}

impl TechnicalAnalystNode {
    pub fn new(source: Arc<dyn MarketDataSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Node for TechnicalAnalystNode {
    async fn process(&self, state: &mut FundState) -> Result<()> {
        let candles = self
            .source
            .candles(&state.data.ticker, state.data.start_date, state.data.end_date)
            .await?;

        let signal = evaluate(&candles);
        debug!(
            ticker = %state.data.ticker,
            direction = ?signal.direction,
            confidence = signal.confidence,
            "technical signal"
        );
        state.record_signal_typed(AnalystKey::Technical.as_str(), &signal)
    }

    fn name(&self) -> &str {
        AnalystKey::Technical.as_str()
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Score a candle series into a signal
fn evaluate(candles: &[Candle]) -> Signal {
    if candles.len() < LONG_WINDOW {
        return Signal::neutral(format!(
            "insufficient price history ({} of {LONG_WINDOW} sessions)",
            candles.len()
        ));
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let sma_short = mean(&closes[closes.len() - SHORT_WINDOW..]);
    let sma_long = mean(&closes[closes.len() - LONG_WINDOW..]);
    let trend = sma_short / sma_long - 1.0;
    let momentum = closes[closes.len() - 1] / closes[0] - 1.0;

    let reasoning = format!(
        "SMA{SHORT_WINDOW}/SMA{LONG_WINDOW} spread {:.2}%, momentum {:.2}% over {} sessions",
        trend * 100.0,
        momentum * 100.0,
        closes.len()
    );

    if trend > TREND_THRESHOLD && momentum > 0.0 {
        let confidence = trend.abs() * 8.0 + momentum.abs() * 2.0;
        Signal::new(SignalDirection::Bullish, confidence.min(0.95), reasoning)
    } else if trend < -TREND_THRESHOLD && momentum < 0.0 {
        let confidence = trend.abs() * 8.0 + momentum.abs() * 2.0;
        Signal::new(SignalDirection::Bearish, confidence.min(0.95), reasoning)
    } else {
        Signal::new(SignalDirection::Neutral, 0.25, reasoning)
    }
}
