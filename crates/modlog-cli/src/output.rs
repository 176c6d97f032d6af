//! Formatted output helpers for CLI commands.

use modlog_common::types::SelectOption;

/// Prints options as a two-column table, or as JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn print_options(options: &[SelectOption], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(options)?);
        return Ok(());
    }
    if options.is_empty() {
        println!("No options found.");
        return Ok(());
    }
    println!("{:<24} {}", "VALUE", "LABEL");
    for option in options {
        println!("{:<24} {}", option.value, option.label);
    }
    Ok(())
}

/// Prints `name value` rows with aligned names.
pub fn print_fields(rows: &[(String, String)]) {
    for (name, value) in rows {
        println!("{name:<12} {value}");
    }
}

/// Formats a weight-to-power ratio, or `-` when unknown.
#[must_use]
pub fn format_ratio(ratio: Option<f64>) -> String {
    ratio.map_or_else(|| "-".to_string(), |r| format!("{r:.2}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_ratio_shows_two_decimals() {
        assert_eq!(format_ratio(Some(7.614)), "7.61");
        assert_eq!(format_ratio(Some(12.0)), "12.00");
    }

    #[test]
    fn format_ratio_without_power_is_dash() {
        assert_eq!(format_ratio(None), "-");
    }
}
