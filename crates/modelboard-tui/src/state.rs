//! Application state.
//!
//! ```text
//! AppState
//! ├── browser: ModelBrowser      (catalog, filter store, page window)
//! ├── locale: Locale             (display language)
//! ├── search: SearchInput        (search line editing)
//! ├── selected: usize            (row on the current page)
//! └── overlay: Option<Overlay>   (provider picker, model details)
//! ```

use modelboard_core::store::FilterAction;
use modelboard_core::{Locale, ModelBrowser};
use modelboard_types::Model;

use crate::overlays::Overlay;

/// Modality tags bound to the `1`..`4` keys.
pub const MODALITY_KEYS: [&str; 4] = ["text", "text+image", "image", "multimodal"];

#[derive(Debug, Default)]
pub struct SearchInput {
    pub value: String,
    pub editing: bool,
}

pub struct AppState {
    pub browser: ModelBrowser,
    pub locale: Locale,
    pub search: SearchInput,
    pub selected: usize,
    pub overlay: Option<Overlay>,
    /// One-line message shown in the footer (e.g. a failed config write).
    pub status: Option<String>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(browser: ModelBrowser, locale: Locale) -> Self {
        let search = SearchInput {
            value: browser.filters().search.clone(),
            editing: false,
        };
        Self {
            browser,
            locale,
            search,
            selected: 0,
            overlay: None,
            status: None,
            should_quit: false,
        }
    }

    /// Dispatches a filter action. A change re-derives the view and moves
    /// the selection back to the first row.
    pub fn apply(&mut self, action: FilterAction) -> bool {
        let changed = self.browser.dispatch(action);
        if changed {
            self.selected = 0;
        }
        changed
    }

    /// Catalog position of the highlighted row.
    pub fn selected_index(&self) -> Option<usize> {
        self.browser.page_indices().get(self.selected).copied()
    }

    pub fn selected_model(&self) -> Option<&Model> {
        self.selected_index().and_then(|idx| self.browser.model(idx))
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        let count = self.browser.page_indices().len();
        if count > 0 && self.selected < count - 1 {
            self.selected += 1;
        }
    }
}
