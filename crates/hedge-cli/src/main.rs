//! Command-line interface for hedge-rs
//!
//! Resolves tickers, dates and the analyst selection, compiles the trading
//! workflow once, then processes tickers sequentially. Configuration errors
//! abort the whole run before the first ticker; a failure inside one
//! ticker's run is printed and the loop moves on.

mod config;
mod dates;
mod output;
mod prompt;

use anyhow::Context;
use chrono::Local;
use clap::{ArgGroup, Parser};
use hedge_agents::data::{MarketDataSource, StaticDataSource};
use hedge_core::AnalystKey;
use hedge_workflow::{
    CompiledGraph, FundOutcome, RunRequest, WorkflowError, build_trading_workflow,
    parse_selection, run_fund,
};
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::TickerPlan;

#[derive(Parser, Debug)]
#[command(name = "hedge-cli")]
#[command(about = "Run the hedge fund trading workflow", long_about = None)]
#[command(group(ArgGroup::new("universe").required(true).args(["tickers", "config"])))]
struct Args {
    /// One or more stock ticker symbols
    #[arg(long, num_args = 1.., value_name = "SYMBOL")]
    tickers: Option<Vec<String>>,

    /// Path to a YAML configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<std::path::PathBuf>,

    /// Start date (YYYY-MM-DD). Defaults to 3 months before end date
    #[arg(long, value_name = "DATE")]
    start_date: Option<String>,

    /// End date (YYYY-MM-DD). Defaults to today
    #[arg(long, value_name = "DATE")]
    end_date: Option<String>,

    /// Analysts to run, by key (e.g. technical_analyst). Skips the prompt
    #[arg(long, num_args = 1.., value_name = "KEY")]
    analysts: Option<Vec<String>>,

    /// Show reasoning from each node
    #[arg(long)]
    show_reasoning: bool,
}

/// Outcome of one ticker's run, kept for the end-of-run summary
struct TickerReport {
    ticker: String,
    result: Result<FundOutcome, WorkflowError>,
}

/// Process tickers one at a time; a failed ticker never stops the rest
async fn run_all(
    graph: &CompiledGraph,
    plans: Vec<TickerPlan>,
    start_date: chrono::NaiveDate,
    end_date: chrono::NaiveDate,
    show_reasoning: bool,
) -> Vec<TickerReport> {
    let mut reports = Vec::with_capacity(plans.len());
    for plan in plans {
        println!("\nAnalyzing {}", plan.ticker);
        println!("{}", "=".repeat(50));

        let request = RunRequest {
            ticker: plan.ticker.clone(),
            start_date,
            end_date,
            portfolio: plan.portfolio,
            show_reasoning,
        };
        let result = run_fund(graph, request).await;
        match &result {
            Ok(outcome) => print!("{}", output::render_outcome(outcome, show_reasoning)),
            Err(e) => {
                error!(ticker = %plan.ticker, error = %e, "ticker processing failed");
                println!("Error processing {}: {e}", plan.ticker);
            }
        }
        reports.push(TickerReport {
            ticker: plan.ticker,
            result,
        });
    }
    reports
}

/// Resolve the analyst selection from the flag, the prompt, or the default
fn resolve_selection(analysts: Option<&[String]>) -> anyhow::Result<Vec<AnalystKey>> {
    match analysts {
        Some(words) => Ok(parse_selection(words)?),
        None if std::io::stdin().is_terminal() => {
            let stdin = std::io::stdin();
            Ok(prompt::select_analysts(stdin.lock(), std::io::stdout())?)
        }
        None => Ok(AnalystKey::ALL.to_vec()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    hedge_utils::load_env();
    hedge_utils::init_tracing();

    let args = Args::parse();

    let plans = match (&args.tickers, &args.config) {
        (Some(tickers), None) => config::plans_from_tickers(tickers),
        (None, Some(path)) => config::FundConfig::from_path(path)
            .with_context(|| format!("loading config from {}", path.display()))?
            .plans(),
        // clap's group makes the modes mutually exclusive and required.
        _ => anyhow::bail!("exactly one of --tickers or --config must be given"),
    };

    let (start_date, end_date) = dates::resolve_dates(
        args.start_date.as_deref(),
        args.end_date.as_deref(),
        Local::now().date_naive(),
    )?;

    let selection = resolve_selection(args.analysts.as_deref())?;
    println!(
        "Selected analysts: {}",
        selection
            .iter()
            .map(|key| key.display_name())
            .collect::<Vec<_>>()
            .join(", ")
    );
    info!(
        tickers = plans.len(),
        %start_date,
        %end_date,
        "starting workflow run"
    );

    // Live market data is attached here when a real provider exists; the
    // workflow itself only sees the MarketDataSource trait.
    let source: Arc<dyn MarketDataSource> = Arc::new(StaticDataSource::new());
    let graph = build_trading_workflow(Some(&selection), source)?;

    let reports = run_all(&graph, plans, start_date, end_date, args.show_reasoning).await;
    let failures: Vec<&str> = reports
        .iter()
        .filter(|r| r.result.is_err())
        .map(|r| r.ticker.as_str())
        .collect();
    if !failures.is_empty() {
        warn!(?failures, "some tickers failed");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use hedge_agents::signal::{TradeAction, TradingDecision};
    use hedge_core::{FundState, Message, Node, Portfolio};
    use hedge_workflow::{END, GraphBuilder};

    /// Fails for one specific ticker, decides Hold for the rest
    struct SelectiveNode {
        poison: &'static str,
    }

    #[async_trait]
    impl Node for SelectiveNode {
        async fn process(&self, state: &mut FundState) -> hedge_core::Result<()> {
            if state.data.ticker == self.poison {
                return Err(hedge_core::Error::ProcessingFailed(format!(
                    "no data feed for {}",
                    self.poison
                )));
            }
            let decision = TradingDecision {
                action: TradeAction::Hold,
                quantity: 0,
                confidence: 1.0,
                reasoning: "stub".to_string(),
            };
            state.push_message(Message::assistant(
                "decider",
                serde_json::to_string(&decision).expect("decision serializes"),
            ));
            Ok(())
        }

        fn name(&self) -> &str {
            "decider"
        }
    }

    #[test]
    fn test_tickers_and_config_are_mutually_exclusive() {
        let err = Args::try_parse_from([
            "hedge-cli",
            "--tickers",
            "AAPL",
            "--config",
            "fund.yaml",
        ]);
        assert!(err.is_err());
    }

    #[test]
    fn test_one_input_mode_is_required() {
        assert!(Args::try_parse_from(["hedge-cli"]).is_err());
        assert!(Args::try_parse_from(["hedge-cli", "--show-reasoning"]).is_err());
    }

    #[test]
    fn test_tickers_mode_parses() {
        let args = Args::try_parse_from(["hedge-cli", "--tickers", "AAPL", "MSFT"]).expect("parses");
        assert_eq!(
            args.tickers,
            Some(vec!["AAPL".to_string(), "MSFT".to_string()])
        );
        assert!(args.config.is_none());
    }

    fn plans(tickers: &[&str]) -> Vec<TickerPlan> {
        tickers
            .iter()
            .map(|t| TickerPlan {
                ticker: (*t).to_string(),
                portfolio: Portfolio::new(100_000.0, 0),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_one_bad_ticker_does_not_stop_the_rest() {
        let graph = GraphBuilder::new()
            .add_node("decider", Arc::new(SelectiveNode { poison: "BAD" }) as Arc<dyn Node>)
            .add_edge("decider", END)
            .set_entry_point("decider")
            .compile()
            .expect("graph compiles");

        let reports = run_all(
            &graph,
            plans(&["AAPL", "BAD", "MSFT"]),
            "2024-02-15".parse().expect("date"),
            "2024-05-15".parse().expect("date"),
            false,
        )
        .await;

        assert_eq!(reports.len(), 3);
        assert!(reports[0].result.is_ok());
        assert!(reports[1].result.is_err());
        assert!(reports[2].result.is_ok());

        let outcome = reports[2].result.as_ref().expect("MSFT succeeds");
        assert_eq!(
            outcome.decision.as_ref().map(|d| d.action),
            Some(TradeAction::Hold)
        );
    }
}
