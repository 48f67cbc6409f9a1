//! Provider directory: search, per-provider model counts and samples.

use modelboard_types::{Model, Provider};

use crate::providers::ProviderIndex;

/// Number of sample models shown per provider.
pub const SAMPLE_MODELS: usize = 3;

/// Providers whose name or slug contains `query` (case-insensitive).
/// An empty query returns every provider.
pub fn search_providers<'a>(providers: &'a [Provider], query: &str) -> Vec<&'a Provider> {
    let query = query.to_lowercase();
    providers
        .iter()
        .filter(|provider| {
            provider.name.to_lowercase().contains(&query)
                || provider.slug.to_lowercase().contains(&query)
        })
        .collect()
}

/// Models that resolve to `provider` through the provider list, in catalog order.
pub fn models_for_provider<'a>(
    models: &'a [Model],
    providers: &[Provider],
    provider: &Provider,
) -> Vec<&'a Model> {
    let index = ProviderIndex::build(models, providers);
    models
        .iter()
        .enumerate()
        .filter(|(idx, _)| {
            index
                .provider(*idx, providers)
                .is_some_and(|resolved| resolved.slug == provider.slug)
        })
        .map(|(_, model)| model)
        .collect()
}

#[derive(Debug, Clone)]
pub struct ProviderSummary<'a> {
    pub provider: &'a Provider,
    pub model_count: usize,
    /// Up to [`SAMPLE_MODELS`] models, in catalog order.
    pub samples: Vec<&'a Model>,
}

impl ProviderSummary<'_> {
    /// Models not shown in `samples`.
    pub fn remaining(&self) -> usize {
        self.model_count.saturating_sub(self.samples.len())
    }
}

/// Summaries for the providers matching `query`, in provider list order.
///
/// Resolves every model once, then groups by resolved slug.
pub fn provider_summaries<'a>(
    models: &'a [Model],
    providers: &'a [Provider],
    query: &str,
) -> Vec<ProviderSummary<'a>> {
    let index = ProviderIndex::build(models, providers);
    search_providers(providers, query)
        .into_iter()
        .map(|provider| {
            let mut model_count = 0;
            let mut samples = Vec::new();
            for (idx, model) in models.iter().enumerate() {
                let belongs = index
                    .provider(idx, providers)
                    .is_some_and(|resolved| resolved.slug == provider.slug);
                if belongs {
                    model_count += 1;
                    if samples.len() < SAMPLE_MODELS {
                        samples.push(model);
                    }
                }
            }
            ProviderSummary {
                provider,
                model_count,
                samples,
            }
        })
        .collect()
}
