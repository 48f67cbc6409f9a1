//! Display formatting for prices, context lengths and timestamps.

use chrono::DateTime;

use crate::filter::parse_price;

/// Shown when a value is missing or cannot be parsed.
pub const NOT_AVAILABLE: &str = "N/A";

/// Formats a per-token price string.
///
/// - `0` → `Free`
/// - below `0.000001` → scaled to `$X.XX/1M tokens`
/// - below `0.001` → scaled to `$X.XX/1K tokens`
/// - otherwise `$X.XXXXXX/token`
///
/// Malformed prices render as [`NOT_AVAILABLE`].
pub fn format_price(raw: &str) -> String {
    let Some(price) = parse_price(raw) else {
        return NOT_AVAILABLE.to_string();
    };
    if price == 0.0 {
        "Free".to_string()
    } else if price < 0.000_001 {
        format!("${:.2}/1M tokens", price * 1_000_000.0)
    } else if price < 0.001 {
        format!("${:.2}/1K tokens", price * 1_000.0)
    } else {
        format!("${price:.6}/token")
    }
}

/// Formats a token count as `1.0M`, `128K` or a plain integer.
pub fn format_context_length(length: Option<u64>) -> String {
    match length {
        None => NOT_AVAILABLE.to_string(),
        Some(n) if n >= 1_000_000 => format!("{:.1}M", n as f64 / 1_000_000.0),
        Some(n) if n >= 1_000 => format!("{:.0}K", n as f64 / 1_000.0),
        Some(n) => n.to_string(),
    }
}

/// Formats a unix timestamp (seconds) as a UTC calendar date.
pub fn format_created(created: Option<u64>) -> String {
    created
        .and_then(|secs| i64::try_from(secs).ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map_or_else(
            || NOT_AVAILABLE.to_string(),
            |date| date.format("%Y-%m-%d").to_string(),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price_tiers() {
        assert_eq!(format_price("0"), "Free");
        assert_eq!(format_price("0.0000005"), "$0.50/1M tokens");
        assert_eq!(format_price("0.00025"), "$0.25/1K tokens");
        assert_eq!(format_price("0.002"), "$0.002000/token");
    }

    #[test]
    fn test_format_price_malformed() {
        assert_eq!(format_price("abc"), NOT_AVAILABLE);
        assert_eq!(format_price(""), NOT_AVAILABLE);
    }

    #[test]
    fn test_format_context_length() {
        assert_eq!(format_context_length(Some(2_000_000)), "2.0M");
        assert_eq!(format_context_length(Some(1_048_576)), "1.0M");
        assert_eq!(format_context_length(Some(128_000)), "128K");
        assert_eq!(format_context_length(Some(999)), "999");
        assert_eq!(format_context_length(None), NOT_AVAILABLE);
    }

    #[test]
    fn test_format_created() {
        assert_eq!(format_created(Some(1_715_558_400)), "2024-05-13");
        assert_eq!(format_created(None), NOT_AVAILABLE);
    }
}
