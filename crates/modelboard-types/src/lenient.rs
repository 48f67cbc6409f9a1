//! Field-level deserializers that never fail on bad values.
//!
//! Upstream catalog records are not always well-formed: context lengths
//! arrive as numbers, numeric strings or `null`, and prices occasionally
//! arrive as bare numbers. These helpers map anything unusable to "absent"
//! so a single bad field does not reject the whole record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decodes a non-negative integer from a number or numeric string.
///
/// Fractional, negative, non-numeric and `null` values decode to `None`.
///
/// # Errors
/// Only fails if the underlying input is not valid JSON.
pub fn u64_opt<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_u64))
}

/// Decodes a decimal string, accepting bare numbers as well.
///
/// `null` and non-scalar values decode to an empty string, which callers
/// treat as a malformed price.
///
/// # Errors
/// Only fails if the underlying input is not valid JSON.
pub fn decimal_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_string).unwrap_or_default())
}

/// Like [`decimal_string`], but `null` and unusable values become `None`.
///
/// # Errors
/// Only fails if the underlying input is not valid JSON.
pub fn decimal_string_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_string))
}

/// Decodes a boolean flag; anything other than `true`/`false` is `None`.
///
/// # Errors
/// Only fails if the underlying input is not valid JSON.
pub fn flag_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_bool))
}

fn value_to_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
