//! Configuration management for modelboard.
//!
//! Loads configuration from ${MODELBOARD_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::i18n::Locale;
use crate::pagination::DEFAULT_PAGE_SIZE;

/// Environment variable overriding `[api] base_url`.
pub const API_URL_ENV: &str = "MODELBOARD_API_URL";

/// Default catalog API root.
pub const DEFAULT_API_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Returns the default config template content.
///
/// Embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Merges user config values into the default template.
///
/// New comments and sections from the template are always present,
/// while the user's customized values are preserved.
fn merge_with_template(user_config: &str) -> Result<String> {
    use toml_edit::DocumentMut;

    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Failed to parse default config template")?;
    let user_doc: DocumentMut = user_config.parse().context("Failed to parse user config")?;

    merge_items(doc.as_table_mut(), user_doc.as_table());

    Ok(doc.to_string())
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for modelboard configuration and data directories.
    //!
    //! MODELBOARD_HOME resolution order:
    //! 1. MODELBOARD_HOME environment variable (if set)
    //! 2. ~/.config/modelboard (default)
    //! 3. ./.modelboard when no home directory can be determined

    use std::path::PathBuf;

    pub fn modelboard_home() -> PathBuf {
        if let Ok(home) = std::env::var("MODELBOARD_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".modelboard"),
            |h| h.join(".config").join("modelboard"),
        )
    }

    pub fn config_path() -> PathBuf {
        modelboard_home().join("config.toml")
    }

    /// Directory for the TUI's rolling log file.
    pub fn logs_dir() -> PathBuf {
        modelboard_home().join("logs")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Catalog API root; `None` means the built-in default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request timeout in seconds. Zero disables the timeout.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: Config::DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: Locale,
    pub page_size: usize,
    pub api: ApiConfig,
}

impl Config {
    const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            let config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?;
            tracing::debug!(path = %path.display(), "Loaded config");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Saves only the locale field to the default config file.
    pub fn save_locale(locale: Locale) -> Result<()> {
        Self::save_locale_to(&paths::config_path(), locale)
    }

    /// Saves only the locale field to a specific config file path.
    ///
    /// Creates the file from the template if it doesn't exist, otherwise
    /// merges the user's values into the latest template first.
    pub fn save_locale_to(path: &Path, locale: Locale) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let contents = if path.exists() {
            let user_config = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            merge_with_template(&user_config)?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        doc["locale"] = value(locale.code());

        Self::write_config(path, &doc.to_string())
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Renders `Config::default()` into the commented template.
    ///
    /// Used by `xtask update-default-config` to keep `default_config.toml`
    /// in sync with the Rust defaults.
    pub fn generate() -> Result<String> {
        use toml_edit::DocumentMut;

        let generated_toml = toml::to_string(&Config::default())
            .context("Failed to serialize default config to TOML")?;

        let mut doc: DocumentMut = default_config_template()
            .parse()
            .context("Failed to parse default config template")?;
        let generated_doc: DocumentMut = generated_toml
            .parse()
            .context("Failed to parse generated config")?;

        merge_items(doc.as_table_mut(), generated_doc.as_table());

        Ok(doc.to_string())
    }

    /// Catalog API root: `MODELBOARD_API_URL`, then `[api] base_url`, then the default.
    pub fn api_base_url(&self) -> Result<String> {
        let env = std::env::var(API_URL_ENV).ok();
        resolve_base_url(env.as_deref(), self.api.base_url.as_deref())
    }

    pub fn api_timeout(&self) -> Option<Duration> {
        (self.api.timeout_secs > 0).then(|| Duration::from_secs(self.api.timeout_secs))
    }

    /// Page size with zero clamped to one.
    pub fn effective_page_size(&self) -> usize {
        self.page_size.max(1)
    }

    pub fn logs_dir(&self) -> PathBuf {
        paths::logs_dir()
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename).
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            page_size: DEFAULT_PAGE_SIZE,
            api: ApiConfig::default(),
        }
    }
}

/// Picks the first non-blank candidate (env, then config) and validates it.
///
/// Trailing slashes are stripped so endpoints can be joined with `/`.
fn resolve_base_url(env: Option<&str>, config: Option<&str>) -> Result<String> {
    let candidate = [env, config]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty());

    let Some(raw) = candidate else {
        return Ok(DEFAULT_API_BASE_URL.to_string());
    };

    let parsed = Url::parse(raw).with_context(|| format!("Invalid catalog API URL '{raw}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("Catalog API URL must use http or https: '{raw}'");
    }

    Ok(raw.trim_end_matches('/').to_string())
}
