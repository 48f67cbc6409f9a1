//! Provider resolution for model ids.
//!
//! Two heuristics, kept separate on purpose because they can disagree:
//!
//! - [`resolve_static`]: fixed keyword table, case-sensitive, used for display
//!   names and free-text search.
//! - [`resolve_from_list`]: first provider in a fetched list whose slug or
//!   name appears in the id, case-insensitive, used for provider filters and
//!   the provider directory.
//!
//! Both are plain substring tests. Ties are broken by table order or list
//! order respectively; there is no scoring.

use modelboard_types::{Model, Provider};

/// Fallback display name when no keyword matches.
pub const OTHER_PROVIDER: &str = "Other";

/// Keyword table for [`resolve_static`], in priority order.
pub const STATIC_PROVIDERS: &[(&str, &str)] = &[
    ("openai", "OpenAI"),
    ("anthropic", "Anthropic"),
    ("google", "Google"),
    ("meta", "Meta"),
    ("mistral", "Mistral"),
    ("cohere", "Cohere"),
    ("perplexity", "Perplexity"),
];

/// Maps a model id to a display provider name using the keyword table.
///
/// Matching is case-sensitive; the first keyword contained in the id wins.
pub fn resolve_static(model_id: &str) -> &'static str {
    STATIC_PROVIDERS
        .iter()
        .find(|(keyword, _)| model_id.contains(keyword))
        .map_or(OTHER_PROVIDER, |(_, name)| name)
}

/// Returns the first provider whose slug or name occurs in the model id.
///
/// Comparison is case-insensitive. Empty slugs and names never match.
/// This is a linear scan; use [`ProviderIndex`] when resolving a whole list.
pub fn resolve_from_list<'a>(model_id: &str, providers: &'a [Provider]) -> Option<&'a Provider> {
    position_in_list(model_id, providers).map(|idx| &providers[idx])
}

/// Index form of [`resolve_from_list`].
pub fn position_in_list(model_id: &str, providers: &[Provider]) -> Option<usize> {
    let id = model_id.to_lowercase();
    providers
        .iter()
        .position(|provider| occurs_in(&id, &provider.slug) || occurs_in(&id, &provider.name))
}

fn occurs_in(haystack_lower: &str, needle: &str) -> bool {
    !needle.is_empty() && haystack_lower.contains(&needle.to_lowercase())
}

/// Memoized [`resolve_from_list`] results for one models/providers snapshot.
///
/// Building costs O(models × providers) once; lookups are O(1).
#[derive(Debug, Clone, Default)]
pub struct ProviderIndex {
    slots: Vec<Option<usize>>,
}

impl ProviderIndex {
    pub fn build(models: &[Model], providers: &[Provider]) -> Self {
        let slots = models
            .iter()
            .map(|model| position_in_list(&model.id, providers))
            .collect();
        Self { slots }
    }

    /// Position in the provider list resolved for the model at `model_idx`.
    pub fn get(&self, model_idx: usize) -> Option<usize> {
        self.slots.get(model_idx).copied().flatten()
    }

    pub fn provider<'a>(&self, model_idx: usize, providers: &'a [Provider]) -> Option<&'a Provider> {
        self.get(model_idx).and_then(|idx| providers.get(idx))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn providers() -> Vec<Provider> {
        vec![
            Provider::new("openai", "OpenAI"),
            Provider::new("anthropic", "Anthropic"),
            Provider::new("mistralai", "Mistral"),
        ]
    }

    #[test]
    fn test_static_priority_order() {
        assert_eq!(resolve_static("openai/gpt-4o"), "OpenAI");
        assert_eq!(resolve_static("anthropic/claude-3.5-sonnet"), "Anthropic");
        assert_eq!(resolve_static("meta-llama/llama-3-70b"), "Meta");
        // Both keywords present: table order decides.
        assert_eq!(resolve_static("google/openai-compat"), "OpenAI");
    }

    #[test]
    fn test_static_is_case_sensitive_with_fallback() {
        assert_eq!(resolve_static("OpenAI/gpt-4o"), OTHER_PROVIDER);
        assert_eq!(resolve_static("qwen/qwen-2-72b"), OTHER_PROVIDER);
        assert_eq!(resolve_static(""), OTHER_PROVIDER);
    }

    #[test]
    fn test_list_matches_slug_or_name_case_insensitive() {
        let providers = providers();
        assert_eq!(
            resolve_from_list("OpenAI/GPT-4o", &providers).map(|p| p.slug.as_str()),
            Some("openai")
        );
        // Name match: "mistral" is in the id, slug "mistralai" is not.
        assert_eq!(
            resolve_from_list("mistral/mixtral-8x7b", &providers).map(|p| p.slug.as_str()),
            Some("mistralai")
        );
    }

    #[test]
    fn test_list_first_match_wins() {
        let providers = providers();
        let resolved = resolve_from_list("anthropic/openai-bridge", &providers);
        assert_eq!(resolved.map(|p| p.slug.as_str()), Some("openai"));
    }

    #[test]
    fn test_list_no_match_and_empty_needles() {
        let mut providers = providers();
        assert!(resolve_from_list("qwen/qwen-2-72b", &providers).is_none());

        providers.insert(0, Provider::new("", ""));
        assert_eq!(
            resolve_from_list("openai/gpt-4o", &providers).map(|p| p.slug.as_str()),
            Some("openai")
        );
        assert!(resolve_from_list("openai/gpt-4o", &[]).is_none());
    }

    #[test]
    fn test_index_matches_linear_scan() {
        let providers = providers();
        let models: Vec<Model> = ["openai/gpt-4o", "qwen/qwen-2", "anthropic/claude-3"]
            .iter()
            .map(|id| serde_json::from_value(serde_json::json!({ "id": id })).unwrap())
            .collect();

        let index = ProviderIndex::build(&models, &providers);
        assert_eq!(index.len(), 3);
        assert_eq!(index.get(0), Some(0));
        assert_eq!(index.get(1), None);
        assert_eq!(
            index.provider(2, &providers).map(|p| p.name.as_str()),
            Some("Anthropic")
        );
        assert_eq!(index.get(99), None);
    }
}
