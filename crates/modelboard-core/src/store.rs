//! Single-writer filter state store.
//!
//! The UI layer never mutates [`FilterState`] directly; it dispatches
//! [`FilterAction`]s. `dispatch` reports whether anything changed so the
//! owner can re-derive the filtered view only when needed.

use crate::filter::{ContextRange, FilterState, Moderation, PriceRange};

#[derive(Debug, Clone, PartialEq)]
pub enum FilterAction {
    SetSearch(String),
    /// Adds the slug if absent, removes it if present. Blank slugs are ignored.
    ToggleProvider(String),
    /// Adds the tag if absent, removes it if present.
    ToggleModality(String),
    SetPriceRange(PriceRange),
    SetContextRange(ContextRange),
    /// Selecting the already-selected value returns to `Moderation::Any`.
    SetModeration(Moderation),
    CycleModeration,
    /// Replaces the whole state (an "apply" of a drafted filter set).
    Replace(FilterState),
    Reset,
}

/// Owns the current filter state.
#[derive(Debug, Clone, Default)]
pub struct FilterStore {
    state: FilterState,
    revision: u64,
}

impl FilterStore {
    pub fn new(state: FilterState) -> Self {
        Self { state, revision: 0 }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Incremented on every change; lets readers detect stale derived data.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Applies `action`. Returns true if the state changed.
    pub fn dispatch(&mut self, action: FilterAction) -> bool {
        let next = reduce(&self.state, action);
        if next == self.state {
            return false;
        }
        self.state = next;
        self.revision += 1;
        true
    }
}

/// Pure transition function behind [`FilterStore::dispatch`].
pub fn reduce(state: &FilterState, action: FilterAction) -> FilterState {
    let mut next = state.clone();
    match action {
        FilterAction::SetSearch(search) => next.search = search,
        FilterAction::ToggleProvider(slug) => {
            if !slug.trim().is_empty() {
                toggle(&mut next.providers, slug);
            }
        }
        FilterAction::ToggleModality(modality) => toggle(&mut next.modalities, modality),
        FilterAction::SetPriceRange(range) => next.price_range = range,
        FilterAction::SetContextRange(range) => next.context_length = range,
        FilterAction::SetModeration(moderation) => {
            next.moderation = if moderation == state.moderation {
                Moderation::Any
            } else {
                moderation
            };
        }
        FilterAction::CycleModeration => next.moderation = state.moderation.cycle(),
        FilterAction::Replace(replacement) => next = replacement,
        FilterAction::Reset => next = FilterState::default(),
    }
    next
}

fn toggle(selection: &mut Vec<String>, value: String) {
    if let Some(pos) = selection.iter().position(|existing| *existing == value) {
        selection.remove(pos);
    } else {
        selection.push(value);
    }
}
