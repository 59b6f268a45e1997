//! Fundamentals analysis node

use async_trait::async_trait;
use hedge_core::{AnalystKey, FundState, Node, Result};
use std::sync::Arc;
use tracing::debug;

use crate::data::{FundamentalReport, MarketDataSource};
use crate::signal::{Signal, SignalDirection};

/// Analyst node scoring profitability, growth and balance-sheet health
pub struct FundamentalsAnalystNode {
    source: Arc<dyn MarketDataSource>,
}

impl FundamentalsAnalystNode {
    pub fn new(source: Arc<dyn MarketDataSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Node for FundamentalsAnalystNode {
    async fn process(&self, state: &mut FundState) -> Result<()> {
        let signal = match self.source.fundamentals(&state.data.ticker).await? {
            Some(report) => evaluate(&report),
            None => Signal::neutral(format!("no fundamental data for {}", state.data.ticker)),
        };
        debug!(
            ticker = %state.data.ticker,
            direction = ?signal.direction,
            "fundamentals signal"
        );
        state.record_signal_typed(AnalystKey::Fundamentals.as_str(), &signal)
    }

    fn name(&self) -> &str {
        AnalystKey::Fundamentals.as_str()
    }
}

/// Four pass/fail checks; 3+ passes reads bullish, 0-1 bearish.
fn evaluate(report: &FundamentalReport) -> Signal {
    let checks = [
        report.net_margin > 0.15,
        report.revenue_growth > 0.08,
        report.return_on_equity > 0.12,
        report.debt_to_equity < 1.0,
    ];
    let passed = checks.iter().filter(|&&c| c).count();

    let reasoning = format!(
        "{passed}/4 fundamental checks favorable (margin {:.1}%, growth {:.1}%, ROE {:.1}%, D/E {:.2})",
        report.net_margin * 100.0,
        report.revenue_growth * 100.0,
        report.return_on_equity * 100.0,
        report.debt_to_equity
    );

    match passed {
        3 | 4 => Signal::new(SignalDirection::Bullish, passed as f64 / 4.0, reasoning),
        0 | 1 => Signal::new(
            SignalDirection::Bearish,
            (4 - passed) as f64 / 4.0,
            reasoning,
        ),
        _ => Signal::new(SignalDirection::Neutral, 0.25, reasoning),
    }
}
