// German number and date notation, as used in the roster files and the
// generated LODAS output.

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use std::str::FromStr;

/// Parses decimals like "1.234,56" or "123,45" into f64.
pub fn parse_decimal(s: &str) -> Result<f64> {
    let normalized = s
        .trim()
        .replace('.', "") // Remove thousand separators
        .replace(',', "."); // Replace decimal separator

    f64::from_str(&normalized).map_err(|e| anyhow!("Failed to parse decimal '{}': {}", s, e))
}

/// Formats a number with 2 decimal places and a comma separator ("13,50").
pub fn format_decimal(value: f64) -> String {
    format!("{:.2}", value).replace('.', ",")
}

/// Parses an ISO date ("2024-03-01") as stored by the host framework.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| anyhow!("Failed to parse date '{}': {}", s, e))
}

/// Formats a date in the DD.MM.YYYY notation the export expects.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Formats an optional date, empty when absent.
pub fn format_date_opt(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_default()
}
