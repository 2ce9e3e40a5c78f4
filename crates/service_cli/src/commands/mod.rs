//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod price;

use pricer_garch::mc::{ExecutionMode, ParameterSet};

/// Human-readable execution mode.
pub(crate) fn describe_mode(mode: ExecutionMode) -> String {
    match mode {
        ExecutionMode::Sequential => "sequential".to_string(),
        ExecutionMode::Parallel { chunk_size } => format!("parallel (chunk size {})", chunk_size),
    }
}

/// Parameter rows shared by the `price` and `check` tables.
pub(crate) fn parameter_rows(params: &ParameterSet) -> Vec<(&'static str, String)> {
    vec![
        ("alpha", params.alpha().to_string()),
        ("beta", params.beta().to_string()),
        ("mu", params.mu().to_string()),
        ("rate", params.rate().to_string()),
        ("initial variance", params.initial_variance().to_string()),
        ("dt", params.dt().to_string()),
        ("horizon", params.horizon().to_string()),
        ("spot", params.spot().to_string()),
        ("barrier", params.barrier().to_string()),
        ("strike", params.strike().to_string()),
        ("replications", params.n_replications().to_string()),
    ]
}

/// Prints two-column rows as a boxed table.
pub(crate) fn print_table(title: &str, rows: &[(&str, String)]) {
    let key_width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0).max(5);
    let value_width = rows
        .iter()
        .map(|(_, v)| v.len())
        .max()
        .unwrap_or(0)
        .max(title.len());
    let rule = |left: &str, mid: &str, right: &str| {
        format!(
            "{}{}{}{}{}",
            left,
            "─".repeat(key_width + 2),
            mid,
            "─".repeat(value_width + 2),
            right
        )
    };

    println!("\n{}", rule("┌", "┬", "┐"));
    println!("│ {:<kw$} │ {:<vw$} │", "Field", title, kw = key_width, vw = value_width);
    println!("{}", rule("├", "┼", "┤"));
    for (key, value) in rows {
        println!("│ {:<kw$} │ {:>vw$} │", key, value, kw = key_width, vw = value_width);
    }
    println!("{}", rule("└", "┴", "┘"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_mode() {
        assert_eq!(describe_mode(ExecutionMode::Sequential), "sequential");
        assert_eq!(
            describe_mode(ExecutionMode::Parallel { chunk_size: 256 }),
            "parallel (chunk size 256)"
        );
    }

    #[test]
    fn test_parameter_rows_cover_every_field() {
        let rows = parameter_rows(&ParameterSet::reference());
        assert_eq!(rows.len(), 11);
        assert!(rows.contains(&("barrier", "2340".to_string())));
        assert!(rows.contains(&("replications", "65536".to_string())));
    }
}
