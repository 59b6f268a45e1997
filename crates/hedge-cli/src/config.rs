//! Ticker and portfolio resolution
//!
//! Two mutually exclusive input modes: an explicit ticker list (every
//! ticker starts flat with the default cash balance) or a YAML document
//! naming positions and a shared cash balance:
//!
//! ```yaml
//! portfolio:
//!   cash: 50000.0
//! positions:
//!   AAPL:
//!     stock: 10
//!   MSFT: {}
//! ```

use hedge_core::Portfolio;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Cash balance used when the config does not specify one
pub const DEFAULT_CASH: f64 = 100_000.0;

/// Configuration errors; all of them are fatal before any ticker runs
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// One ticker's run inputs
#[derive(Debug, Clone, PartialEq)]
pub struct TickerPlan {
    pub ticker: String,
    pub portfolio: Portfolio,
}

#[derive(Debug, Default, Deserialize)]
struct PortfolioSection {
    cash: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct PositionSection {
    #[serde(default)]
    stock: i64,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    portfolio: PortfolioSection,
    /// Kept as a raw mapping so tickers run in document order
    #[serde(default)]
    positions: serde_yaml::Mapping,
}

/// Parsed and validated fund configuration
#[derive(Debug, Clone, PartialEq)]
pub struct FundConfig {
    pub cash: f64,
    pub positions: Vec<(String, i64)>,
}

impl FundConfig {
    /// Load and validate a YAML config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_yaml::from_str(content)?;

        let cash = raw.portfolio.cash.unwrap_or(DEFAULT_CASH);
        if cash < 0.0 {
            return Err(ConfigError::Validation(format!(
                "portfolio.cash must be non-negative, got {cash}"
            )));
        }

        let mut positions = Vec::with_capacity(raw.positions.len());
        for (key, value) in raw.positions {
            let ticker = key
                .as_str()
                .ok_or_else(|| {
                    ConfigError::Validation(format!("position name must be a string, got {key:?}"))
                })?
                .to_string();
            let section: PositionSection = serde_yaml::from_value(value)?;
            positions.push((ticker, section.stock));
        }
        if positions.is_empty() {
            return Err(ConfigError::Validation(
                "config defines no positions".to_string(),
            ));
        }

        Ok(Self { cash, positions })
    }

    /// Per-ticker plans, in document order
    pub fn plans(&self) -> Vec<TickerPlan> {
        self.positions
            .iter()
            .map(|(ticker, stock)| TickerPlan {
                ticker: ticker.clone(),
                portfolio: Portfolio::new(self.cash, *stock),
            })
            .collect()
    }
}

/// Plans for an explicit ticker list: default cash, flat positions
pub fn plans_from_tickers(tickers: &[String]) -> Vec<TickerPlan> {
    tickers
        .iter()
        .map(|ticker| TickerPlan {
            ticker: ticker.clone(),
            portfolio: Portfolio::new(DEFAULT_CASH, 0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tickers_mode_defaults() {
        let plans = plans_from_tickers(&["AAPL".to_string(), "MSFT".to_string()]);
        assert_eq!(plans.len(), 2);
        for plan in &plans {
            assert_eq!(plan.portfolio, Portfolio::new(100_000.0, 0));
        }
        assert_eq!(plans[0].ticker, "AAPL");
        assert_eq!(plans[1].ticker, "MSFT");
    }

    #[test]
    fn test_config_positions_and_defaults() {
        let config = FundConfig::from_yaml(
            "portfolio:\n  cash: 50000\npositions:\n  AAPL:\n    stock: 10\n  MSFT: {}\n",
        )
        .unwrap();

        let plans = config.plans();
        assert_eq!(
            plans,
            vec![
                TickerPlan {
                    ticker: "AAPL".to_string(),
                    portfolio: Portfolio::new(50_000.0, 10),
                },
                TickerPlan {
                    ticker: "MSFT".to_string(),
                    portfolio: Portfolio::new(50_000.0, 0),
                },
            ]
        );
    }

    #[test]
    fn test_missing_cash_defaults() {
        let config = FundConfig::from_yaml("positions:\n  NVDA: {}\n").unwrap();
        assert_eq!(config.cash, DEFAULT_CASH);
    }

    #[test]
    fn test_document_order_preserved() {
        let config =
            FundConfig::from_yaml("positions:\n  ZM: {}\n  AAPL: {}\n  MSFT: {}\n").unwrap();
        let tickers: Vec<&str> = config.positions.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(tickers, vec!["ZM", "AAPL", "MSFT"]);
    }

    #[test]
    fn test_negative_cash_rejected() {
        let err = FundConfig::from_yaml("portfolio:\n  cash: -5\npositions:\n  AAPL: {}\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_empty_positions_rejected() {
        let err = FundConfig::from_yaml("portfolio:\n  cash: 1000\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_malformed_yaml_rejected() {
        let err = FundConfig::from_yaml("positions: [not a mapping").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
