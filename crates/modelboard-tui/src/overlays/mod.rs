//! Modal overlays drawn above the model table.

mod model_details;
mod provider_picker;
mod range_editor;

pub use model_details::{ModelDetailsState, render_model_details};
pub use provider_picker::{ProviderPickerState, render_provider_picker};
pub use range_editor::{RangeEditorState, render_range_editor};
use modelboard_core::store::FilterAction;
use ratatui::layout::Rect;

#[derive(Debug)]
pub enum Overlay {
    ProviderPicker(ProviderPickerState),
    ModelDetails(ModelDetailsState),
    RangeEditor(RangeEditorState),
}

/// Result of an overlay key handler: whether to close, plus filter actions
/// for the reducer to dispatch.
#[derive(Debug, Default, PartialEq)]
pub struct OverlayUpdate {
    pub close: bool,
    pub actions: Vec<FilterAction>,
}

impl OverlayUpdate {
    pub fn stay() -> Self {
        Self::default()
    }

    pub fn close() -> Self {
        Self {
            close: true,
            actions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_action(mut self, action: FilterAction) -> Self {
        self.actions.push(action);
        self
    }
}

/// A `width` x `height` rect centered in `area`, shrunk to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
