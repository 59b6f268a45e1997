//! Closed set of analyst identifiers
//!
//! The analyst roster is a fixed enumeration rather than an open string
//! namespace, so an unknown key is rejected the moment it is parsed instead
//! of surfacing somewhere inside graph execution.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Identifier for one of the four analysts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AnalystKey {
    Technical,
    Fundamentals,
    Sentiment,
    Valuation,
}

impl AnalystKey {
    /// All analysts, in canonical execution order
    pub const ALL: [AnalystKey; 4] = [
        AnalystKey::Technical,
        AnalystKey::Fundamentals,
        AnalystKey::Sentiment,
        AnalystKey::Valuation,
    ];

    /// Stable wire name used to key `analyst_signals` and to parse CLI input
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalystKey::Technical => "technical_analyst",
            AnalystKey::Fundamentals => "fundamentals_analyst",
            AnalystKey::Sentiment => "sentiment_analyst",
            AnalystKey::Valuation => "valuation_analyst",
        }
    }

    /// Human-readable name for menus and reports
    pub fn display_name(&self) -> &'static str {
        match self {
            AnalystKey::Technical => "Technical Analyst",
            AnalystKey::Fundamentals => "Fundamentals Analyst",
            AnalystKey::Sentiment => "Sentiment Analyst",
            AnalystKey::Valuation => "Valuation Analyst",
        }
    }
}

impl fmt::Display for AnalystKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalystKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "technical_analyst" => Ok(AnalystKey::Technical),
            "fundamentals_analyst" => Ok(AnalystKey::Fundamentals),
            "sentiment_analyst" => Ok(AnalystKey::Sentiment),
            "valuation_analyst" => Ok(AnalystKey::Valuation),
            other => Err(Error::UnknownAnalyst {
                key: other.to_string(),
            }),
        }
    }
}
