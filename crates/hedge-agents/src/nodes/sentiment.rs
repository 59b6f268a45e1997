//! Sentiment analysis node

use async_trait::async_trait;
use hedge_core::{AnalystKey, FundState, Node, Result};
use std::sync::Arc;
use tracing::debug;

use crate::data::{Headline, MarketDataSource};
use crate::signal::{Signal, SignalDirection};

/// Mean headline score beyond this magnitude reads directional
const SENTIMENT_THRESHOLD: f64 = 0.15;

/// Analyst node scoring news sentiment over the run's date range
pub struct SentimentAnalystNode {
    source: Arc<dyn MarketDataSource>,
}

impl SentimentAnalystNode {
    pub fn new(source: Arc<dyn MarketDataSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Node for SentimentAnalystNode {
    async fn process(&self, state: &mut FundState) -> Result<()> {
        let headlines = self
            .source
            .headlines(&state.data.ticker, state.data.start_date, state.data.end_date)
            .await?;

        let signal = evaluate(&headlines, &state.data.ticker);
        debug!(
            ticker = %state.data.ticker,
            headlines = headlines.len(),
            direction = ?signal.direction,
            "sentiment signal"
        );
        state.record_signal_typed(AnalystKey::Sentiment.as_str(), &signal)
    }

    fn name(&self) -> &str {
        AnalystKey::Sentiment.as_str()
    }
}

fn evaluate(headlines: &[Headline], ticker: &str) -> Signal {
    if headlines.is_empty() {
        return Signal::neutral(format!("no headlines for {ticker} in range"));
    }

    let mean: f64 =
        headlines.iter().map(|h| h.sentiment).sum::<f64>() / headlines.len() as f64;
    // Few headlines carry little weight, whatever their score.
    let sample_weight = headlines.len() as f64 / (headlines.len() as f64 + 5.0);
    let confidence = (mean.abs() * sample_weight).min(0.95);

    let reasoning = format!(
        "mean sentiment {mean:+.2} across {} headlines",
        headlines.len()
    );

    if mean > SENTIMENT_THRESHOLD {
        Signal::new(SignalDirection::Bullish, confidence, reasoning)
    } else if mean < -SENTIMENT_THRESHOLD {
        Signal::new(SignalDirection::Bearish, confidence, reasoning)
    } else {
        Signal::new(SignalDirection::Neutral, 0.2, reasoning)
    }
}
