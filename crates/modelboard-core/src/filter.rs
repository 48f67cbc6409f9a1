//! Filter criteria and the model predicate.
//!
//! A model is kept only if it passes every applicable criterion. Criteria
//! with no user input (empty search, empty selections, unbounded ranges,
//! `Moderation::Any`) always pass. Evaluation stops at the first failure.

use modelboard_types::{Model, Provider};
use serde::{Deserialize, Serialize};

use crate::providers::{ProviderIndex, resolve_from_list, resolve_static};

/// Inclusive range with optional bounds; `None` means unbounded.
///
/// `min <= max` is not checked. An inverted range simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T> Default for Range<T> {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
        }
    }
}

impl<T: PartialOrd + Copy> Range<T> {
    pub fn new(min: Option<T>, max: Option<T>) -> Self {
        Self { min, max }
    }

    pub fn is_bounded(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    /// Number of set bounds (0, 1 or 2).
    pub fn bound_count(&self) -> usize {
        usize::from(self.min.is_some()) + usize::from(self.max.is_some())
    }

    pub fn contains(&self, value: T) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

/// Prompt price bounds in currency per token.
pub type PriceRange = Range<f64>;

/// Context length bounds in tokens.
pub type ContextRange = Range<u64>;

/// Moderation tri-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Moderation {
    #[default]
    Any,
    Moderated,
    Unmoderated,
}

impl Moderation {
    pub fn as_flag(self) -> Option<bool> {
        match self {
            Moderation::Any => None,
            Moderation::Moderated => Some(true),
            Moderation::Unmoderated => Some(false),
        }
    }

    /// Any -> Moderated -> Unmoderated -> Any.
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            Moderation::Any => Moderation::Moderated,
            Moderation::Moderated => Moderation::Unmoderated,
            Moderation::Unmoderated => Moderation::Any,
        }
    }
}

/// Current user-selected inclusion criteria.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub search: String,
    /// Selected provider slugs, in selection order.
    pub providers: Vec<String>,
    pub price_range: PriceRange,
    pub context_length: ContextRange,
    /// Selected modality tags, in selection order.
    pub modalities: Vec<String>,
    pub moderation: Moderation,
}

impl FilterState {
    /// Number of active advanced filters. Search text is not counted.
    pub fn active_count(&self) -> usize {
        self.providers.len()
            + self.modalities.len()
            + self.price_range.bound_count()
            + self.context_length.bound_count()
            + usize::from(self.moderation != Moderation::Any)
    }

    /// True when no criterion can exclude a model.
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty() && self.active_count() == 0
    }
}

/// Parses a price string into a non-negative finite number.
///
/// Returns `None` for empty, non-numeric, negative, or non-finite input.
/// Callers must never treat `None` as zero.
pub fn parse_price(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}

/// Returns true if `model` passes every criterion in `state`.
///
/// Provider selections are resolved against `providers` with
/// [`resolve_from_list`], only when a provider filter is active.
pub fn matches(model: &Model, state: &FilterState, providers: &[Provider]) -> bool {
    Predicate::new(state).test(model, || {
        resolve_from_list(&model.id, providers).map(|provider| provider.slug.as_str())
    })
}

/// Stable filter: keeps input order.
pub fn filter_models<'a>(
    models: &'a [Model],
    state: &FilterState,
    providers: &[Provider],
) -> Vec<&'a Model> {
    let predicate = Predicate::new(state);
    models
        .iter()
        .filter(|model| {
            predicate.test(model, || {
                resolve_from_list(&model.id, providers).map(|provider| provider.slug.as_str())
            })
        })
        .collect()
}

/// Stable filter returning positions into `models`, using memoized provider
/// resolution.
pub fn filter_indexed(
    models: &[Model],
    state: &FilterState,
    providers: &[Provider],
    index: &ProviderIndex,
) -> Vec<usize> {
    let predicate = Predicate::new(state);
    models
        .iter()
        .enumerate()
        .filter(|(idx, model)| {
            predicate.test(model, || {
                index
                    .provider(*idx, providers)
                    .map(|provider| provider.slug.as_str())
            })
        })
        .map(|(idx, _)| idx)
        .collect()
}

/// A filter state with its search needle normalized once.
struct Predicate<'s> {
    state: &'s FilterState,
    needle: String,
}

impl<'s> Predicate<'s> {
    fn new(state: &'s FilterState) -> Self {
        Self {
            state,
            needle: state.search.trim().to_lowercase(),
        }
    }

    fn test<'p>(&self, model: &Model, resolve_slug: impl FnOnce() -> Option<&'p str>) -> bool {
        let state = self.state;

        if !self.needle.is_empty() && !self.search_matches(model) {
            return false;
        }

        if !state.providers.is_empty() {
            match resolve_slug() {
                Some(slug) if state.providers.iter().any(|selected| selected == slug) => {}
                _ => return false,
            }
        }

        if !state.modalities.is_empty()
            && !state
                .modalities
                .iter()
                .any(|modality| *modality == model.architecture.modality)
        {
            return false;
        }

        if state.price_range.is_bounded() {
            match parse_price(&model.pricing.prompt) {
                Some(price) if state.price_range.contains(price) => {}
                _ => return false,
            }
        }

        if state.context_length.is_bounded() {
            match model.context_length {
                Some(length) if state.context_length.contains(length) => {}
                _ => return false,
            }
        }

        if let Some(moderated) = state.moderation.as_flag()
            && model.top_provider.is_moderated != Some(moderated)
        {
            return false;
        }

        true
    }

    fn search_matches(&self, model: &Model) -> bool {
        let needle = self.needle.as_str();
        model.name.to_lowercase().contains(needle)
            || model.id.to_lowercase().contains(needle)
            || model
                .description
                .as_deref()
                .is_some_and(|description| description.to_lowercase().contains(needle))
            || resolve_static(&model.id).to_lowercase().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn model(id: &str, modality: &str, prompt: &str, context: Option<u64>, moderated: bool) -> Model {
        serde_json::from_value(json!({
            "id": id,
            "name": id.split('/').next_back().unwrap_or(id),
            "context_length": context,
            "architecture": { "modality": modality, "tokenizer": "Other" },
            "pricing": { "prompt": prompt, "completion": prompt },
            "top_provider": { "context_length": context, "is_moderated": moderated },
        }))
        .unwrap()
    }

    fn catalog() -> Vec<Model> {
        vec![
            model("openai/gpt-4o", "text+image", "0.0000025", Some(128_000), true),
            model("anthropic/claude-3-haiku", "text+image", "0.00000025", Some(200_000), true),
            model("meta-llama/llama-3-8b", "text", "0", Some(8_192), false),
            model("acme/broken", "text", "abc", None, false),
            model("mistralai/mistral-7b", "text", "0.00000006", Some(32_768), false),
        ]
    }

    fn providers() -> Vec<Provider> {
        vec![
            Provider::new("openai", "OpenAI"),
            Provider::new("anthropic", "Anthropic"),
            Provider::new("mistralai", "Mistral AI"),
        ]
    }

    fn ids<'a>(models: &[&'a Model]) -> Vec<&'a str> {
        models.iter().map(|model| model.id.as_str()).collect()
    }

    #[test]
    fn test_empty_state_keeps_everything_in_order() {
        let models = catalog();
        let kept = filter_models(&models, &FilterState::default(), &providers());
        assert_eq!(kept.len(), models.len());
        assert!(kept.iter().zip(&models).all(|(a, b)| a.id == b.id));
    }

    #[test]
    fn test_blank_search_excludes_nothing() {
        let models = catalog();
        let state = FilterState {
            search: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(filter_models(&models, &state, &[]).len(), models.len());
    }

    #[test]
    fn test_search_covers_name_id_description_and_provider() {
        let mut models = catalog();
        models[4].description = Some("Small but FAST".to_string());
        let search = |text: &str| {
            let state = FilterState {
                search: text.to_string(),
                ..Default::default()
            };
            ids(&filter_models(&models, &state, &[]))
        };

        assert_eq!(search("GPT-4O"), vec!["openai/gpt-4o"]);
        assert_eq!(search("claude"), vec!["anthropic/claude-3-haiku"]);
        assert_eq!(search("fast"), vec!["mistralai/mistral-7b"]);
        assert_eq!(search("meta"), vec!["meta-llama/llama-3-8b"]);
        // "other" only appears through the fallback display name.
        assert_eq!(search("other"), vec!["acme/broken"]);
    }

    #[test]
    fn test_provider_filter_uses_list_resolution() {
        let models = catalog();
        let state = FilterState {
            providers: vec!["openai".to_string()],
            ..Default::default()
        };
        assert_eq!(
            ids(&filter_models(&models, &state, &providers())),
            vec!["openai/gpt-4o"]
        );

        // Unresolvable models are dropped under any provider filter.
        let state = FilterState {
            providers: vec!["acme".to_string()],
            ..Default::default()
        };
        assert!(filter_models(&models, &state, &providers()).is_empty());

        // Without a provider list nothing resolves.
        let state = FilterState {
            providers: vec!["openai".to_string()],
            ..Default::default()
        };
        assert!(filter_models(&models, &state, &[]).is_empty());
    }

    #[test]
    fn test_provider_filter_matches_by_name() {
        let models = catalog();
        let providers = vec![Provider::new("mistral-ai", "Mistral")];
        let state = FilterState {
            providers: vec!["mistral-ai".to_string()],
            ..Default::default()
        };
        assert_eq!(
            ids(&filter_models(&models, &state, &providers)),
            vec!["mistralai/mistral-7b"]
        );
    }

    #[test]
    fn test_modality_filter_is_exact_membership() {
        let models = catalog();
        let state = FilterState {
            modalities: vec!["text".to_string()],
            ..Default::default()
        };
        assert_eq!(
            ids(&filter_models(&models, &state, &[])),
            vec!["meta-llama/llama-3-8b", "acme/broken", "mistralai/mistral-7b"]
        );
    }

    #[test]
    fn test_free_price_included_without_min() {
        let models = catalog();
        let state = FilterState {
            price_range: PriceRange::new(None, Some(0.0000001)),
            ..Default::default()
        };
        assert_eq!(
            ids(&filter_models(&models, &state, &[])),
            vec!["meta-llama/llama-3-8b", "mistralai/mistral-7b"]
        );
    }

    #[test]
    fn test_malformed_price_excluded_only_when_bounded() {
        let models = catalog();
        let broken = &models[3];

        assert!(matches(broken, &FilterState::default(), &[]));

        let min_only = FilterState {
            price_range: PriceRange::new(Some(0.0), None),
            ..Default::default()
        };
        assert!(!matches(broken, &min_only, &[]));

        let max_only = FilterState {
            price_range: PriceRange::new(None, Some(1.0)),
            ..Default::default()
        };
        assert!(!matches(broken, &max_only, &[]));
    }

    #[test]
    fn test_context_bounds_are_inclusive() {
        let models = catalog();
        let llama = &models[2];

        let exact_max = FilterState {
            context_length: ContextRange::new(None, Some(8_192)),
            ..Default::default()
        };
        assert!(matches(llama, &exact_max, &[]));

        let exact_min = FilterState {
            context_length: ContextRange::new(Some(8_192), None),
            ..Default::default()
        };
        assert!(matches(llama, &exact_min, &[]));

        let above = FilterState {
            context_length: ContextRange::new(Some(8_193), None),
            ..Default::default()
        };
        assert!(!matches(llama, &above, &[]));
    }

    #[test]
    fn test_missing_context_length_excluded_only_when_bounded() {
        let models = catalog();
        let broken = &models[3];
        assert!(matches(broken, &FilterState::default(), &[]));

        let bounded = FilterState {
            context_length: ContextRange::new(None, Some(1_000_000)),
            ..Default::default()
        };
        assert!(!matches(broken, &bounded, &[]));
    }

    #[test]
    fn test_moderation_requires_exact_flag() {
        let models = catalog();
        let moderated = FilterState {
            moderation: Moderation::Moderated,
            ..Default::default()
        };
        assert_eq!(
            ids(&filter_models(&models, &moderated, &[])),
            vec!["openai/gpt-4o", "anthropic/claude-3-haiku"]
        );

        let unmoderated = FilterState {
            moderation: Moderation::Unmoderated,
            ..Default::default()
        };
        assert_eq!(filter_models(&models, &unmoderated, &[]).len(), 3);
    }

    #[test]
    fn test_unknown_moderation_excluded_only_when_filtering() {
        let mut unknown = catalog().remove(2);
        unknown.top_provider.is_moderated = None;
        assert!(matches(&unknown, &FilterState::default(), &[]));

        for moderation in [Moderation::Moderated, Moderation::Unmoderated] {
            let state = FilterState {
                moderation,
                ..Default::default()
            };
            assert!(!matches(&unknown, &state, &[]));
        }
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let models = catalog();
        let state = FilterState {
            modalities: vec!["text".to_string()],
            price_range: PriceRange::new(Some(0.0), None),
            ..Default::default()
        };

        let once: Vec<Model> = filter_models(&models, &state, &providers())
            .into_iter()
            .cloned()
            .collect();
        let twice = filter_models(&once, &state, &providers());
        assert_eq!(ids(&twice), once.iter().map(|m| m.id.as_str()).collect::<Vec<_>>());
    }

    #[test]
    fn test_indexed_filter_agrees_with_direct_filter() {
        let models = catalog();
        let providers = providers();
        let index = ProviderIndex::build(&models, &providers);
        let state = FilterState {
            providers: vec!["anthropic".to_string(), "mistralai".to_string()],
            ..Default::default()
        };

        let direct = ids(&filter_models(&models, &state, &providers));
        let indexed: Vec<&str> = filter_indexed(&models, &state, &providers, &index)
            .into_iter()
            .map(|idx| models[idx].id.as_str())
            .collect();
        assert_eq!(indexed, direct);
        assert_eq!(direct, vec!["anthropic/claude-3-haiku", "mistralai/mistral-7b"]);
    }

    #[test]
    fn test_parse_price_rejects_garbage() {
        assert_eq!(parse_price("0"), Some(0.0));
        assert_eq!(parse_price(" 0.000003 "), Some(0.000_003));
        assert_eq!(parse_price("abc"), None);
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("-1"), None);
        assert_eq!(parse_price("NaN"), None);
        assert_eq!(parse_price("inf"), None);
    }

    #[test]
    fn test_active_count_ignores_search() {
        let state = FilterState {
            search: "gpt".to_string(),
            providers: vec!["openai".to_string()],
            modalities: vec!["text".to_string(), "image".to_string()],
            price_range: PriceRange::new(Some(0.0), Some(1.0)),
            context_length: ContextRange::new(None, Some(8_192)),
            moderation: Moderation::Unmoderated,
        };
        assert_eq!(state.active_count(), 7);
        assert!(!state.is_empty());
        assert!(FilterState::default().is_empty());
    }
}
