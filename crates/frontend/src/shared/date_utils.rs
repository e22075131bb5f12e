/// Utilities for date formatting
use chrono::NaiveDate;

/// Format an ISO date or datetime string to DD.MM.YYYY
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> "15.03.2024"
///
/// Anything that does not start with a valid date is returned unchanged.
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%d.%m.%Y").to_string(),
        Err(_) => date_str.to_string(),
    }
}

/// Quantity rounded to two decimals, without trailing zeros or a bare dot
/// Example: 6.3 -> "6.3", 8.0 -> "8", 2.999 -> "3"
pub fn format_quantity(value: f64) -> String {
    let rounded = format!("{:.2}", value);
    match rounded.trim_end_matches('0').trim_end_matches('.') {
        "-0" => "0".to_string(),
        trimmed => trimmed.to_string(),
    }
}
