//! Terminal report for one ticker's outcome

use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use hedge_agents::registry::RISK_SIGNAL_KEY;
use hedge_agents::signal::{RiskAssessment, Signal};
use hedge_core::AnalystKey;
use hedge_workflow::FundOutcome;

/// Render signals and decision as a printable report
pub fn render_outcome(outcome: &FundOutcome, show_reasoning: bool) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec!["Analyst", "Signal", "Confidence"];
    if show_reasoning {
        header.push("Reasoning");
    }
    table.set_header(header);

    for key in AnalystKey::ALL {
        let Some(value) = outcome.analyst_signals.get(key.as_str()) else {
            continue;
        };
        if let Ok(signal) = serde_json::from_value::<Signal>(value.clone()) {
            let mut row = vec![
                key.display_name().to_string(),
                format!("{:?}", signal.direction).to_uppercase(),
                format!("{:.0}%", signal.confidence * 100.0),
            ];
            if show_reasoning {
                row.push(signal.reasoning);
            }
            table.add_row(row);
        }
    }

    if let Some(value) = outcome.analyst_signals.get(RISK_SIGNAL_KEY) {
        if let Ok(assessment) = serde_json::from_value::<RiskAssessment>(value.clone()) {
            let mut row = vec![
                "Risk Management".to_string(),
                format!("limit {:.0}", assessment.max_position_size),
                format!("vol {:.2}%", assessment.volatility * 100.0),
            ];
            if show_reasoning {
                row.push(assessment.reasoning);
            }
            table.add_row(row);
        }
    }

    let mut report = format!("{table}\n");
    match &outcome.decision {
        Some(decision) => {
            report.push_str(&format!(
                "Decision: {} {} shares (confidence {:.0}%)\n",
                format!("{:?}", decision.action).to_uppercase(),
                decision.quantity,
                decision.confidence * 100.0
            ));
            if show_reasoning {
                report.push_str(&format!("Reasoning: {}\n", decision.reasoning));
            }
        }
        None => {
            report.push_str("No decision produced: final message was not parseable.\n");
        }
    }
    report
}
