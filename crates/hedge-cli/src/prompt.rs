//! Interactive analyst selection
//!
//! Shown only when stdin is attached to a terminal and `--analysts` was not
//! given. Empty or unparseable input falls back to all analysts with a
//! printed warning rather than failing the run.

use hedge_core::AnalystKey;
use std::io::{BufRead, Write};

/// Parse one input line into a selection
///
/// Accepts menu numbers (`1 3`), wire names (`technical_analyst`), or
/// `a`/`all`; separators are spaces and commas. Returns `None` for empty
/// input or any unrecognized token.
pub fn parse_selection_line(line: &str) -> Option<Vec<AnalystKey>> {
    let tokens: Vec<&str> = line
        .split([' ', ',', '\t'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.is_empty() {
        return None;
    }

    let mut selected = Vec::new();
    for token in tokens {
        match token {
            "a" | "all" => return Some(AnalystKey::ALL.to_vec()),
            _ => {
                let key = match token.parse::<usize>() {
                    Ok(n) if (1..=AnalystKey::ALL.len()).contains(&n) => AnalystKey::ALL[n - 1],
                    Ok(_) => return None,
                    Err(_) => token.parse::<AnalystKey>().ok()?,
                };
                if !selected.contains(&key) {
                    selected.push(key);
                }
            }
        }
    }
    // Canonical order, whatever order the user typed.
    Some(
        AnalystKey::ALL
            .into_iter()
            .filter(|key| selected.contains(key))
            .collect(),
    )
}

/// Prompt on `out`, read one line from `input`, resolve the selection
pub fn select_analysts<R: BufRead, W: Write>(
    mut input: R,
    mut out: W,
) -> std::io::Result<Vec<AnalystKey>> {
    writeln!(out, "Select your AI analysts.")?;
    for (i, key) in AnalystKey::ALL.iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, key.display_name())?;
    }
    write!(
        out,
        "Enter numbers or names separated by spaces ('a' for all): "
    )?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    match parse_selection_line(&line) {
        Some(selection) => Ok(selection),
        None => {
            writeln!(
                out,
                "You must select at least one analyst. Using all analysts by default."
            )?;
            Ok(AnalystKey::ALL.to_vec())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_numbers_resolve_in_canonical_order() {
        let selection = parse_selection_line("4, 1").unwrap();
        assert_eq!(selection, vec![AnalystKey::Technical, AnalystKey::Valuation]);
    }

    #[test]
    fn test_wire_names_accepted() {
        let selection = parse_selection_line("sentiment_analyst technical_analyst").unwrap();
        assert_eq!(selection, vec![AnalystKey::Technical, AnalystKey::Sentiment]);
    }

    #[test]
    fn test_all_shortcut() {
        assert_eq!(parse_selection_line("a").unwrap(), AnalystKey::ALL.to_vec());
        assert_eq!(parse_selection_line("all").unwrap(), AnalystKey::ALL.to_vec());
    }

    #[test]
    fn test_duplicates_collapse() {
        let selection = parse_selection_line("2 2 fundamentals_analyst").unwrap();
        assert_eq!(selection, vec![AnalystKey::Fundamentals]);
    }

    #[test]
    fn test_invalid_input_is_none() {
        assert!(parse_selection_line("").is_none());
        assert!(parse_selection_line("   ").is_none());
        assert!(parse_selection_line("5").is_none());
        assert!(parse_selection_line("1 astrology_analyst").is_none());
    }

    #[test]
    fn test_empty_line_falls_back_to_all() {
        let mut out = Vec::new();
        let selection = select_analysts(Cursor::new("\n"), &mut out).unwrap();
        assert_eq!(selection, AnalystKey::ALL.to_vec());

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Using all analysts by default"));
    }

    #[test]
    fn test_menu_lists_all_analysts() {
        let mut out = Vec::new();
        select_analysts(Cursor::new("1\n"), &mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();
        for key in AnalystKey::ALL {
            assert!(printed.contains(key.display_name()));
        }
    }
}
