//! Valuation analysis node
//!
//! Compares an owner-earnings valuation against the current market cap and
//! signals on the gap.

use async_trait::async_trait;
use hedge_core::{AnalystKey, FundState, Node, Result};
use std::sync::Arc;
use tracing::debug;

use crate::data::{FundamentalReport, MarketDataSource};
use crate::signal::{Signal, SignalDirection};

/// Valuation gap beyond this magnitude reads directional
const GAP_THRESHOLD: f64 = 0.15;

/// Analyst node estimating intrinsic value from owner earnings
pub struct ValuationAnalystNode {
    source: Arc<dyn MarketDataSource>,
}

impl ValuationAnalystNode {
    pub fn new(source: Arc<dyn MarketDataSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Node for ValuationAnalystNode {
    async fn process(&self, state: &mut FundState) -> Result<()> {
        let signal = match self.source.fundamentals(&state.data.ticker).await? {
            Some(report) => evaluate(&report),
            None => Signal::neutral(format!("no fundamental data for {}", state.data.ticker)),
        };
        debug!(
            ticker = %state.data.ticker,
            direction = ?signal.direction,
            "valuation signal"
        );
        state.record_signal_typed(AnalystKey::Valuation.as_str(), &signal)
    }

    fn name(&self) -> &str {
        AnalystKey::Valuation.as_str()
    }
}

fn evaluate(report: &FundamentalReport) -> Signal {
    if report.market_cap <= 0.0 {
        return Signal::neutral("market cap unavailable");
    }

    let owner_earnings =
        report.net_income + report.depreciation - report.capital_expenditure;
    // Growth-adjusted multiple, bounded to keep outliers honest.
    let multiple = (12.0 + report.revenue_growth * 50.0).clamp(8.0, 25.0);
    let intrinsic = owner_earnings * multiple;
    let gap = intrinsic / report.market_cap - 1.0;

    let reasoning = format!(
        "owner earnings {owner_earnings:.0} at {multiple:.1}x vs market cap {:.0} ({:+.1}% gap)",
        report.market_cap,
        gap * 100.0
    );

    if gap > GAP_THRESHOLD {
        Signal::new(SignalDirection::Bullish, gap.abs().min(0.95), reasoning)
    } else if gap < -GAP_THRESHOLD {
        Signal::new(SignalDirection::Bearish, gap.abs().min(0.95), reasoning)
    } else {
        Signal::new(SignalDirection::Neutral, 0.25, reasoning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{StaticDataSource, fixtures};
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
    async fn test_undervalued_is_bullish() {
        // Owner earnings 95M at 18x = 1.71B intrinsic vs 1.0B market cap.
        let source = Arc::new(
            StaticDataSource::new().with_fundamentals("AAPL", fixtures::healthy_fundamentals()),
        );
        let node = ValuationAnalystNode::new(source);

        let mut state = state();
        node.process(&mut state).await.unwrap();

        let signal: Signal = state.signal_typed("valuation_analyst").unwrap().unwrap();
        assert_eq!(signal.direction, SignalDirection::Bullish);
    }

    #[tokio::test]
    async fn test_overvalued_is_bearish() {
        let report = FundamentalReport {
            market_cap: 5.0e9,
            ..fixtures::healthy_fundamentals()
        };
        let node =
            ValuationAnalystNode::new(Arc::new(StaticDataSource::new().with_fundamentals("AAPL", report)));

        let mut state = state();
        node.process(&mut state).await.unwrap();

        let signal: Signal = state.signal_typed("valuation_analyst").unwrap().unwrap();
        assert_eq!(signal.direction, SignalDirection::Bearish);
    }

    #[tokio::test]
    async fn test_missing_report_is_neutral() {
        let node = ValuationAnalystNode::new(Arc::new(StaticDataSource::new()));

        let mut state = state();
        node.process(&mut state).await.unwrap();

        let signal: Signal = state.signal_typed("valuation_analyst").unwrap().unwrap();
        assert_eq!(signal.direction, SignalDirection::Neutral);
    }
}
