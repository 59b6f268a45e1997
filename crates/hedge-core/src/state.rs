//! Shared state threaded through a workflow run
//!
//! `FundState` is the single mutable record every node reads and writes
//! during one graph execution. It carries the conversation so far, the
//! per-ticker payload (dates, portfolio, accumulated analyst signals) and
//! run metadata. A fresh state is created per ticker invocation and
//! discarded once the final message has been parsed.

use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Role of a conversational message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    System,
    Human,
    Assistant,
}

/// One conversational turn
///
/// `name` identifies the node that produced the message, when any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    pub name: Option<String>,
}

impl Message {
    pub fn human(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Human,
            content: content.into(),
            name: None,
        }
    }

    pub fn assistant(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            name: Some(name.into()),
        }
    }
}

/// Cash and position for a single ticker
///
/// One portfolio instance per ticker per run; never shared across tickers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    /// Available cash, non-negative
    pub cash: f64,
    /// Current position in whole shares (may be zero)
    pub stock: i64,
}

impl Portfolio {
    pub fn new(cash: f64, stock: i64) -> Self {
        Self { cash, stock }
    }
}

/// Per-ticker payload carried by the state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundData {
    pub ticker: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub portfolio: Portfolio,
    /// Accumulated per-node signals, keyed by wire name.
    ///
    /// Append-only during a run: a key, once written, is never replaced.
    /// BTreeMap keeps downstream aggregation order deterministic.
    pub analyst_signals: BTreeMap<String, serde_json::Value>,
}

/// Run metadata shared by every node
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunMetadata {
    pub show_reasoning: bool,
}

/// The mutable record threaded through all nodes during one graph execution
#[derive(Debug, Clone)]
pub struct FundState {
    /// Conversation so far; append-only within one run
    pub messages: Vec<Message>,
    pub data: FundData,
    pub metadata: RunMetadata,
}

impl FundState {
    /// Create a fresh state for one ticker invocation
    pub fn new(
        ticker: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        portfolio: Portfolio,
    ) -> Self {
        Self {
            messages: Vec::new(),
            data: FundData {
                ticker: ticker.into(),
                start_date,
                end_date,
                portfolio,
                analyst_signals: BTreeMap::new(),
            },
            metadata: RunMetadata::default(),
        }
    }

    /// Set the show-reasoning flag
    pub fn with_show_reasoning(mut self, show_reasoning: bool) -> Self {
        self.metadata.show_reasoning = show_reasoning;
        self
    }

    /// Append a message to the conversation
    pub fn push_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// The most recent message, if any
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Record a signal under `key`
    ///
    /// Signals only grow during a run; writing a key that is already
    /// present is a `SignalConflict`.
    pub fn record_signal(
        &mut self,
        key: impl Into<String>,
        value: serde_json::Value,
    ) -> Result<()> {
        let key = key.into();
        if self.data.analyst_signals.contains_key(&key) {
            return Err(Error::SignalConflict { key });
        }
        self.data.analyst_signals.insert(key, value);
        Ok(())
    }

    /// Look up a previously recorded signal
    pub fn signal(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.analyst_signals.get(key)
    }

    /// Record a signal from a serializable payload
    pub fn record_signal_typed<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<()> {
        let json = serde_json::to_value(value)
            .map_err(|e| Error::ProcessingFailed(format!("Failed to serialize signal: {e}")))?;
        self.record_signal(key, json)
    }

    /// Deserialize a previously recorded signal
    pub fn signal_typed<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Result<Option<T>> {
        match self.data.analyst_signals.get(key) {
            None => Ok(None),
            Some(value) => {
                let typed = serde_json::from_value(value.clone()).map_err(|e| {
                    Error::ProcessingFailed(format!("Failed to deserialize signal '{key}': {e}"))
                })?;
                Ok(Some(typed))
            }
        }
    }
}
