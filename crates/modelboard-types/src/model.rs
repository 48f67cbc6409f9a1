//! Model records as published by the catalog API.

use serde::{Deserialize, Serialize};

use crate::lenient;

/// A priced, described inference endpoint identified by `<author>/<slug>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Maximum input tokens. `None` when the upstream value is missing or malformed.
    #[serde(default, deserialize_with = "lenient::u64_opt")]
    pub context_length: Option<u64>,
    #[serde(default)]
    pub architecture: Architecture,
    #[serde(default)]
    pub pricing: Pricing,
    #[serde(default)]
    pub top_provider: TopProvider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_request_limits: Option<PerRequestLimits>,
    /// Unix timestamp (seconds) of when the model was listed.
    #[serde(default, deserialize_with = "lenient::u64_opt")]
    pub created: Option<u64>,
}

impl Model {
    /// Returns the display name, falling back to the id when the name is blank.
    pub fn display_name(&self) -> &str {
        let trimmed = self.name.trim();
        if trimmed.is_empty() { &self.id } else { trimmed }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Architecture {
    /// Modality tag, e.g. `text`, `text+image`, `multimodal`.
    #[serde(default)]
    pub modality: String,
    #[serde(default)]
    pub tokenizer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruct_type: Option<String>,
}

/// Prices are decimal strings in currency per token; they are kept verbatim
/// and only interpreted when filtering or formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pricing {
    #[serde(default, deserialize_with = "lenient::decimal_string")]
    pub prompt: String,
    #[serde(default, deserialize_with = "lenient::decimal_string")]
    pub completion: String,
    #[serde(
        default,
        deserialize_with = "lenient::decimal_string_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub request: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::decimal_string_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopProvider {
    #[serde(default, deserialize_with = "lenient::u64_opt")]
    pub context_length: Option<u64>,
    #[serde(
        default,
        deserialize_with = "lenient::u64_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_completion_tokens: Option<u64>,
    /// `None` when the upstream value is missing or not a boolean.
    #[serde(
        default,
        deserialize_with = "lenient::flag_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_moderated: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerRequestLimits {
    #[serde(default, deserialize_with = "lenient::decimal_string_opt")]
    pub prompt_tokens: Option<String>,
    #[serde(default, deserialize_with = "lenient::decimal_string_opt")]
    pub completion_tokens: Option<String>,
}
