//! Catalog snapshots: the model and provider lists as one unit.
//!
//! Records are decoded one at a time so a single malformed entry is skipped
//! with a warning instead of failing the whole list.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use modelboard_types::{Model, Provider};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    pub models: Vec<Model>,
    pub providers: Vec<Provider>,
}

/// On-disk shape before per-record decoding.
#[derive(Debug, Default, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    models: Vec<Value>,
    #[serde(default)]
    providers: Vec<Value>,
}

impl Catalog {
    pub fn new(models: Vec<Model>, providers: Vec<Provider>) -> Self {
        Self { models, providers }
    }

    /// Reads a snapshot written by [`Catalog::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog from {}", path.display()))?;
        let raw: RawCatalog = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse catalog from {}", path.display()))?;

        let catalog = Self {
            models: decode_records(raw.models, "model"),
            providers: decode_records(raw.providers, "provider"),
        };
        debug!(
            path = %path.display(),
            models = catalog.models.len(),
            providers = catalog.providers.len(),
            "Loaded catalog snapshot"
        );
        Ok(catalog)
    }

    /// Writes the snapshot as pretty JSON (temp file + rename).
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let mut contents =
            serde_json::to_string_pretty(self).context("Failed to serialize catalog")?;
        contents.push('\n');

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, contents)
            .with_context(|| format!("Failed to write catalog to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;
        Ok(())
    }

    pub fn find_model(&self, id: &str) -> Option<&Model> {
        self.models.iter().find(|model| model.id == id)
    }
}

/// Decodes each value independently, dropping the ones that don't fit `T`.
pub fn decode_records<T: DeserializeOwned>(values: Vec<Value>, what: &str) -> Vec<T> {
    let total = values.len();
    let decoded: Vec<T> = values
        .into_iter()
        .enumerate()
        .filter_map(|(pos, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(kind = what, position = pos, error = %err, "Skipping undecodable record");
                None
            }
        })
        .collect();

    if decoded.len() < total {
        debug!(kind = what, kept = decoded.len(), total, "Dropped malformed records");
    }
    decoded
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_decode_skips_bad_records() {
        let values = vec![
            json!({"id": "openai/gpt-4o", "name": "GPT-4o"}),
            json!({"name": "missing id"}),
            json!("not an object"),
            json!({"id": "anthropic/claude-3", "context_length": "lots"}),
        ];

        let models: Vec<Model> = decode_records(values, "model");
        let ids: Vec<_> = models.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["openai/gpt-4o", "anthropic/claude-3"]);
        assert_eq!(models[1].context_length, None);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("catalog.json");

        let models: Vec<Model> = decode_records(
            vec![json!({
                "id": "openai/gpt-4o",
                "name": "GPT-4o",
                "context_length": 128_000,
                "pricing": {"prompt": "0.000005", "completion": "0.000015"},
                "top_provider": {"is_moderated": true}
            })],
            "model",
        );
        let catalog = Catalog::new(models, vec![Provider::new("openai", "OpenAI")]);
        catalog.save(&path).unwrap();

        let loaded = Catalog::load(&path).unwrap();
        assert_eq!(loaded.models, catalog.models);
        assert_eq!(loaded.providers, catalog.providers);
        assert!(loaded.find_model("openai/gpt-4o").is_some());
        assert!(loaded.find_model("openai/gpt-5").is_none());
        assert!(!dir.path().join("nested").join("catalog.json.tmp").exists());
    }

    #[test]
    fn test_load_missing_sections_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, "{}").unwrap();

        let loaded = Catalog::load(&path).unwrap();
        assert!(loaded.models.is_empty());
        assert!(loaded.providers.is_empty());
    }

    #[test]
    fn test_load_invalid_json_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, "[1, 2").unwrap();

        let err = Catalog::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse catalog"));
    }
}
