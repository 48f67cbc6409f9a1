//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use modelboard_core::store::FilterAction;

use crate::effects::UiEffect;
use crate::overlays::{
    ModelDetailsState, Overlay, OverlayUpdate, ProviderPickerState, RangeEditorState,
};
use crate::state::{AppState, MODALITY_KEYS};

/// Takes the current state and a terminal event, mutates state, and returns
/// effects for the runtime to execute.
pub fn update(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return vec![];
    }

    if let Some(overlay) = app.overlay.as_mut() {
        let result = match overlay {
            Overlay::ProviderPicker(picker) => picker.handle_key(app.browser.providers(), key),
            Overlay::ModelDetails(details) => details.handle_key(key),
            Overlay::RangeEditor(editor) => editor.handle_key(key),
        };
        apply_overlay_update(app, result);
        return vec![];
    }

    if app.search.editing {
        handle_search_key(app, key);
        return vec![];
    }

    handle_browse_key(app, key)
}

fn apply_overlay_update(app: &mut AppState, update: OverlayUpdate) {
    for action in update.actions {
        app.apply(action);
    }
    if update.close {
        app.overlay = None;
    }
}

fn handle_search_key(app: &mut AppState, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            app.search.editing = false;
        }
        KeyCode::Char('u') if ctrl => {
            app.search.value.clear();
            sync_search(app);
        }
        KeyCode::Backspace => {
            app.search.value.pop();
            sync_search(app);
        }
        KeyCode::Char(c) if !ctrl => {
            app.search.value.push(c);
            sync_search(app);
        }
        _ => {}
    }
}

/// Search is applied on every keystroke.
fn sync_search(app: &mut AppState) {
    let text = app.search.value.clone();
    app.apply(FilterAction::SetSearch(text));
}

fn handle_browse_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
        }
        KeyCode::Char('/') => {
            app.search.editing = true;
        }
        KeyCode::Left => {
            if app.browser.prev_page() {
                app.selected = 0;
            }
        }
        KeyCode::Right => {
            if app.browser.next_page() {
                app.selected = 0;
            }
        }
        KeyCode::Up => app.select_prev(),
        KeyCode::Down => app.select_next(),
        KeyCode::Enter => {
            if let Some(idx) = app.selected_index() {
                app.overlay = Some(Overlay::ModelDetails(ModelDetailsState::new(idx)));
            }
        }
        KeyCode::Char(c @ '1'..='4') => {
            let slot = c as usize - '1' as usize;
            app.apply(FilterAction::ToggleModality(MODALITY_KEYS[slot].to_string()));
        }
        KeyCode::Char('m') => {
            app.apply(FilterAction::CycleModeration);
        }
        KeyCode::Char('p') => {
            app.overlay = Some(Overlay::ProviderPicker(ProviderPickerState::new()));
        }
        KeyCode::Char('r') => {
            let editor = RangeEditorState::from_filters(app.browser.filters());
            app.overlay = Some(Overlay::RangeEditor(editor));
        }
        KeyCode::Char('c') => {
            app.search.value.clear();
            app.apply(FilterAction::Reset);
        }
        KeyCode::Char('L') => {
            app.locale = app.locale.toggle();
            app.status = None;
            return vec![UiEffect::SaveLocale(app.locale)];
        }
        _ => {}
    }
    vec![]
}
