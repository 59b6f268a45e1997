//! Market data access for analyst nodes
//!
//! Live market-data retrieval is outside this workspace; analysts reach
//! their inputs through the [`MarketDataSource`] trait so a real provider
//! can be attached at the seam. [`StaticDataSource`] is the in-memory
//! implementation used by tests and offline runs. A source that has no data
//! for a ticker answers with an empty result, never an error — analysts
//! degrade to neutral signals instead of failing the run.

use async_trait::async_trait;
use chrono::NaiveDate;
use hedge_core::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One daily price bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Point-in-time fundamental snapshot for a ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundamentalReport {
    pub market_cap: f64,
    pub net_income: f64,
    pub depreciation: f64,
    pub capital_expenditure: f64,
    /// Trailing revenue growth as a fraction (0.08 = 8%)
    pub revenue_growth: f64,
    pub net_margin: f64,
    pub return_on_equity: f64,
    pub debt_to_equity: f64,
}

/// A scored news headline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Headline {
    pub date: NaiveDate,
    pub title: String,
    /// Sentiment score in [-1.0, 1.0]
    pub sentiment: f64,
}

/// Read-only access to market data for one ticker and date range
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Daily candles within `[start, end]`, oldest first
    async fn candles(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Candle>>;

    /// Latest fundamental snapshot, if the source has one
    async fn fundamentals(&self, ticker: &str) -> Result<Option<FundamentalReport>>;

    /// Scored headlines within `[start, end]`
    async fn headlines(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Headline>>;
}

/// In-memory market data, keyed by ticker
#[derive(Debug, Default)]
pub struct StaticDataSource {
    candles: HashMap<String, Vec<Candle>>,
    fundamentals: HashMap<String, FundamentalReport>,
    headlines: HashMap<String, Vec<Headline>>,
}

impl StaticDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed candles for a ticker (kept sorted by date)
    pub fn with_candles(mut self, ticker: impl Into<String>, mut candles: Vec<Candle>) -> Self {
        candles.sort_by_key(|c| c.date);
        self.candles.insert(ticker.into(), candles);
        self
    }

    /// Seed a fundamental snapshot for a ticker
    pub fn with_fundamentals(
        mut self,
        ticker: impl Into<String>,
        report: FundamentalReport,
    ) -> Self {
        self.fundamentals.insert(ticker.into(), report);
        self
    }

    /// Seed headlines for a ticker
    pub fn with_headlines(mut self, ticker: impl Into<String>, headlines: Vec<Headline>) -> Self {
        self.headlines.insert(ticker.into(), headlines);
        self
    }
}

#[async_trait]
impl MarketDataSource for StaticDataSource {
    async fn candles(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Candle>> {
        Ok(self
            .candles
            .get(ticker)
            .map(|candles| {
                candles
                    .iter()
                    .filter(|c| c.date >= start && c.date <= end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn fundamentals(&self, ticker: &str) -> Result<Option<FundamentalReport>> {
        Ok(self.fundamentals.get(ticker).cloned())
    }

    async fn headlines(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Headline>> {
        Ok(self
            .headlines
            .get(ticker)
            .map(|headlines| {
                headlines
                    .iter()
                    .filter(|h| h.date >= start && h.date <= end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Linear price ramp from `start_price`, one candle per day
    pub fn ramp_candles(from: NaiveDate, days: usize, start_price: f64, step: f64) -> Vec<Candle> {
        (0..days)
            .map(|i| {
                let close = start_price + step * i as f64;
                Candle {
                    date: from + chrono::Days::new(i as u64),
                    open: close - step / 2.0,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                    volume: 1_000_000,
                }
            })
            .collect()
    }

    pub fn healthy_fundamentals() -> FundamentalReport {
        FundamentalReport {
            market_cap: 1.0e9,
            net_income: 9.0e7,
            depreciation: 1.5e7,
            capital_expenditure: 1.0e7,
            revenue_growth: 0.12,
            net_margin: 0.22,
            return_on_equity: 0.18,
            debt_to_equity: 0.6,
        }
    }
}
