//! Date-range resolution
//!
//! An absent end date defaults to today; an absent start date defaults to
//! exactly three calendar months before the (possibly defaulted) end date.
//! Explicit dates must be strict `YYYY-MM-DD`; malformed input fails the
//! whole run before any ticker is processed.

use chrono::{Months, NaiveDate};

use crate::config::ConfigError;

/// Resolve the analysis window from optional CLI strings
pub fn resolve_dates(
    start: Option<&str>,
    end: Option<&str>,
    today: NaiveDate,
) -> Result<(NaiveDate, NaiveDate), ConfigError> {
    let end_date = match end {
        Some(raw) => parse_date(raw, "End date")?,
        None => today,
    };

    let start_date = match start {
        Some(raw) => parse_date(raw, "Start date")?,
        None => end_date
            .checked_sub_months(Months::new(3))
            .ok_or_else(|| {
                ConfigError::Validation(format!("cannot compute start date from {end_date}"))
            })?,
    };

    Ok((start_date, end_date))
}

fn parse_date(raw: &str, label: &str) -> Result<NaiveDate, ConfigError> {
    // chrono accepts unpadded fields, so enforce the fixed width first.
    if raw.len() != 10 {
        return Err(ConfigError::Validation(format!(
            "{label} must be in YYYY-MM-DD format, got '{raw}'"
        )));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        ConfigError::Validation(format!("{label} must be in YYYY-MM-DD format, got '{raw}'"))
    })
}
