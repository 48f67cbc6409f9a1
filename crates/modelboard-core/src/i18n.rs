//! English/Arabic message lookup by dotted key.
//!
//! Message tables are embedded at compile time from `messages/*.json`.
//! Labels are for display only; filtering always works on raw ids and tags.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use anyhow::bail;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

static EN: LazyLock<Value> = LazyLock::new(|| parse_table("en", include_str!("../messages/en.json")));
static AR: LazyLock<Value> = LazyLock::new(|| parse_table("ar", include_str!("../messages/ar.json")));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ar,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
        }
    }

    /// Parses a locale tag, falling back to English for anything unknown.
    pub fn from_tag(tag: &str) -> Self {
        tag.parse().unwrap_or_default()
    }

    pub fn is_rtl(self) -> bool {
        matches!(self, Locale::Ar)
    }

    /// The other supported locale.
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Locale::En => Locale::Ar,
            Locale::Ar => Locale::En,
        }
    }

    fn table(self) -> &'static Value {
        match self {
            Locale::En => &EN,
            Locale::Ar => &AR,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        // Accept region-qualified tags such as "ar-EG" or "en_US".
        let primary = tag.split(['-', '_']).next().unwrap_or_default();
        match primary {
            "en" => Ok(Locale::En),
            "ar" => Ok(Locale::Ar),
            _ => bail!("Unsupported locale '{s}' (expected one of: en, ar)"),
        }
    }
}

/// Looks up `key` (e.g. `models.title`) in the locale's table.
///
/// Returns the key itself when it is missing or does not point at a string.
pub fn t(key: &str, locale: Locale) -> String {
    lookup(locale.table(), key).map_or_else(|| key.to_string(), str::to_string)
}

/// Like [`t`], then substitutes `{name}` placeholders.
pub fn t_with(key: &str, locale: Locale, args: &[(&str, &str)]) -> String {
    args.iter()
        .fold(t(key, locale), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        })
}

/// Picks `<prefix>.foundOne` for a count of one, `<prefix>.found` otherwise.
pub fn t_found(prefix: &str, count: usize, locale: Locale) -> String {
    if count == 1 {
        t(&format!("{prefix}.foundOne"), locale)
    } else {
        t_with(
            &format!("{prefix}.found"),
            locale,
            &[("count", &count.to_string())],
        )
    }
}

fn lookup<'a>(table: &'a Value, key: &str) -> Option<&'a str> {
    key.split('.')
        .try_fold(table, |node, part| node.get(part))?
        .as_str()
}

fn parse_table(code: &str, raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|err| {
        warn!(locale = code, error = %err, "Failed to parse message table");
        Value::Null
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_both_locales() {
        assert_eq!(t("models.title", Locale::En), "AI Models");
        assert_eq!(t("models.title", Locale::Ar), "نماذج الذكاء الاصطناعي");
        assert_eq!(t("models.columns.provider", Locale::En), "Provider");
    }

    #[test]
    fn test_missing_key_returns_key() {
        assert_eq!(t("models.nope", Locale::En), "models.nope");
        assert_eq!(t("", Locale::Ar), "");
        // Points at an object, not a string.
        assert_eq!(t("models.columns", Locale::En), "models.columns");
    }

    #[test]
    fn test_tables_have_the_same_keys() {
        fn keys(value: &Value, prefix: &str, out: &mut Vec<String>) {
            if let Value::Object(map) = value {
                for (key, child) in map {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    keys(child, &path, out);
                }
            } else {
                out.push(prefix.to_string());
            }
        }

        let mut en = Vec::new();
        let mut ar = Vec::new();
        keys(&EN, "", &mut en);
        keys(&AR, "", &mut ar);
        en.sort();
        ar.sort();
        assert!(!en.is_empty());
        assert_eq!(en, ar);
    }

    #[test]
    fn test_placeholders_and_counts() {
        assert_eq!(
            t_with("models.page", Locale::En, &[("page", "2"), ("total", "3")]),
            "Page 2 of 3"
        );
        assert_eq!(t_found("models", 1, Locale::En), "1 model found");
        assert_eq!(t_found("models", 45, Locale::En), "45 models found");
        assert_eq!(t_found("providers", 0, Locale::En), "0 providers found");
    }

    #[test]
    fn test_locale_parsing() {
        assert_eq!("ar".parse::<Locale>().unwrap(), Locale::Ar);
        assert_eq!("en-US".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("AR_eg".parse::<Locale>().unwrap(), Locale::Ar);
        assert!("fr".parse::<Locale>().is_err());
        assert_eq!(Locale::from_tag("fr"), Locale::En);
        assert!(Locale::Ar.is_rtl());
        assert_eq!(Locale::En.toggle(), Locale::Ar);
    }
}
