//! Filtered, paginated view over a catalog snapshot.
//!
//! `ModelBrowser` ties the pure pieces together: it owns the snapshot, the
//! memoized provider index, the filter store and the page window, and
//! re-derives the filtered sequence explicitly whenever the filters or the
//! snapshot change. Every re-derivation resets the page to 1.

use modelboard_types::{Model, Provider};
use tracing::debug;

use crate::filter::{FilterState, filter_indexed};
use crate::pagination::{PageInfo, Paginator};
use crate::providers::ProviderIndex;
use crate::store::{FilterAction, FilterStore};

#[derive(Debug, Clone)]
pub struct ModelBrowser {
    models: Vec<Model>,
    providers: Vec<Provider>,
    index: ProviderIndex,
    store: FilterStore,
    /// Positions into `models` that pass the current filters.
    pages: Paginator<usize>,
}

impl ModelBrowser {
    pub fn new(models: Vec<Model>, providers: Vec<Provider>, page_size: usize) -> Self {
        let index = ProviderIndex::build(&models, &providers);
        let mut browser = Self {
            models,
            providers,
            index,
            store: FilterStore::default(),
            pages: Paginator::new(Vec::new(), page_size),
        };
        browser.rederive();
        browser
    }

    /// Starts from a pre-built filter state instead of the empty one.
    #[must_use]
    pub fn with_filters(mut self, filters: FilterState) -> Self {
        self.dispatch(FilterAction::Replace(filters));
        self
    }

    /// Swaps in a new snapshot (e.g. after a refetch).
    pub fn replace_catalog(&mut self, models: Vec<Model>, providers: Vec<Provider>) {
        self.index = ProviderIndex::build(&models, &providers);
        self.models = models;
        self.providers = providers;
        self.rederive();
    }

    /// Applies a filter action; re-derives and resets the page only if the
    /// filter state actually changed.
    pub fn dispatch(&mut self, action: FilterAction) -> bool {
        let changed = self.store.dispatch(action);
        if changed {
            self.rederive();
        }
        changed
    }

    pub fn filters(&self) -> &FilterState {
        self.store.state()
    }

    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn filtered_count(&self) -> usize {
        self.pages.total_count()
    }

    /// All models passing the filters, in catalog order.
    pub fn filtered_models(&self) -> impl Iterator<Item = &Model> {
        self.pages.items().iter().map(|&idx| &self.models[idx])
    }

    /// Positions (into [`Self::models`]) of the models on the current page.
    pub fn page_indices(&self) -> &[usize] {
        self.pages.current_slice()
    }

    pub fn page_models(&self) -> Vec<&Model> {
        self.page_indices()
            .iter()
            .map(|&idx| &self.models[idx])
            .collect()
    }

    pub fn page_info(&self) -> PageInfo {
        self.pages.info()
    }

    pub fn set_page(&mut self, page: usize) -> bool {
        self.pages.set_page(page)
    }

    pub fn next_page(&mut self) -> bool {
        self.pages.next_page()
    }

    pub fn prev_page(&mut self) -> bool {
        self.pages.prev_page()
    }

    pub fn model(&self, idx: usize) -> Option<&Model> {
        self.models.get(idx)
    }

    /// Provider resolved from the provider list for the model at `idx`.
    pub fn listed_provider(&self, idx: usize) -> Option<&Provider> {
        self.index.provider(idx, &self.providers)
    }

    pub fn find_model(&self, id: &str) -> Option<&Model> {
        self.models.iter().find(|model| model.id == id)
    }

    fn rederive(&mut self) {
        let filtered = filter_indexed(
            &self.models,
            self.store.state(),
            &self.providers,
            &self.index,
        );
        debug!(
            total = self.models.len(),
            matched = filtered.len(),
            revision = self.store.revision(),
            "Re-derived filtered models"
        );
        self.pages.replace(filtered);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::filter::Moderation;

    fn model(n: usize, modality: &str) -> Model {
        serde_json::from_value(json!({
            "id": format!("openai/model-{n:02}"),
            "name": format!("Model {n:02}"),
            "context_length": 8192,
            "architecture": { "modality": modality, "tokenizer": "GPT" },
            "pricing": { "prompt": "0.000001", "completion": "0.000002" },
            "top_provider": { "context_length": 8192, "is_moderated": n % 2 == 0 },
        }))
        .unwrap()
    }

    /// 45 models: the first 15 are `text+image`, the rest `text`.
    fn browser() -> ModelBrowser {
        let models = (0..45)
            .map(|n| model(n, if n < 15 { "text+image" } else { "text" }))
            .collect();
        ModelBrowser::new(models, vec![Provider::new("openai", "OpenAI")], 20)
    }

    #[test]
    fn test_initial_view_is_first_page_of_everything() {
        let browser = browser();
        let info = browser.page_info();
        assert_eq!(info.total_count, 45);
        assert_eq!(info.total_pages, 3);
        assert_eq!(info.current_page, 1);
        assert_eq!(browser.page_models()[0].id, "openai/model-00");
    }

    #[test]
    fn test_filter_change_resets_to_page_one() {
        let mut browser = browser();
        assert!(browser.set_page(2));

        assert!(browser.dispatch(FilterAction::ToggleModality("text+image".into())));
        let info = browser.page_info();
        assert_eq!(info.total_pages, 1);
        assert_eq!(info.current_page, 1);
        assert_eq!(browser.page_models().len(), 15);
    }

    #[test]
    fn test_unchanged_dispatch_keeps_page() {
        let mut browser = browser();
        browser.set_page(3);
        assert!(!browser.dispatch(FilterAction::SetSearch(String::new())));
        assert_eq!(browser.page_info().current_page, 3);
    }

    #[test]
    fn test_replace_catalog_rederives() {
        let mut browser = browser();
        browser.dispatch(FilterAction::SetModeration(Moderation::Moderated));
        assert_eq!(browser.filtered_count(), 23);
        browser.set_page(2);

        browser.replace_catalog(vec![model(0, "text"), model(1, "text")], Vec::new());
        assert_eq!(browser.filtered_count(), 1);
        assert_eq!(browser.page_info().current_page, 1);
        assert!(browser.listed_provider(0).is_none());
    }

    #[test]
    fn test_with_filters_and_lookup() {
        let browser = browser().with_filters(FilterState {
            search: "model 4".into(),
            ..Default::default()
        });
        let ids: Vec<&str> = browser.filtered_models().map(|m| m.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "openai/model-40",
                "openai/model-41",
                "openai/model-42",
                "openai/model-43",
                "openai/model-44",
            ]
        );
        assert_eq!(
            browser.listed_provider(0).map(|p| p.slug.as_str()),
            Some("openai")
        );
        assert!(browser.find_model("openai/model-07").is_some());
        assert!(browser.find_model("openai/model-99").is_none());
    }
}
