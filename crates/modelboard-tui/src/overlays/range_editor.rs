use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use modelboard_core::filter::{ContextRange, FilterState, PriceRange, parse_price};
use modelboard_core::i18n::{Locale, t};
use modelboard_core::store::FilterAction;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::{OverlayUpdate, centered_rect};

/// Field labels in focus order.
const FIELDS: [&str; 4] = [
    "filters.minPrice",
    "filters.maxPrice",
    "filters.minContext",
    "filters.maxContext",
];

/// Draft of the price and context bounds. Nothing is dispatched until Enter.
#[derive(Debug, Default)]
pub struct RangeEditorState {
    inputs: [String; 4],
    focus: usize,
    /// Message key of the last validation failure.
    error: Option<&'static str>,
}

impl RangeEditorState {
    /// Prefills the fields from the current filter state.
    pub fn from_filters(filters: &FilterState) -> Self {
        Self {
            inputs: [
                bound_text(filters.price_range.min),
                bound_text(filters.price_range.max),
                bound_text(filters.context_length.min),
                bound_text(filters.context_length.max),
            ],
            focus: 0,
            error: None,
        }
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn input(&self, field: usize) -> &str {
        &self.inputs[field]
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Char('c') if ctrl => OverlayUpdate::close(),
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % FIELDS.len();
                OverlayUpdate::stay()
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + FIELDS.len() - 1) % FIELDS.len();
                OverlayUpdate::stay()
            }
            KeyCode::Char('u') if ctrl => {
                self.inputs[self.focus].clear();
                self.error = None;
                OverlayUpdate::stay()
            }
            KeyCode::Backspace => {
                self.inputs[self.focus].pop();
                self.error = None;
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) if !ctrl => {
                self.inputs[self.focus].push(c);
                self.error = None;
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    /// Validates every field; on failure focuses the bad field and stays open.
    fn submit(&mut self) -> OverlayUpdate {
        match self.parse() {
            Ok((price, context)) => OverlayUpdate::close()
                .with_action(FilterAction::SetPriceRange(price))
                .with_action(FilterAction::SetContextRange(context)),
            Err((field, message)) => {
                self.focus = field;
                self.error = Some(message);
                OverlayUpdate::stay()
            }
        }
    }

    fn parse(&self) -> Result<(PriceRange, ContextRange), (usize, &'static str)> {
        let price = |field: usize| {
            let raw = self.inputs[field].trim();
            if raw.is_empty() {
                return Ok(None);
            }
            parse_price(raw)
                .map(Some)
                .ok_or((field, "filters.invalidPrice"))
        };
        let context = |field: usize| {
            let raw = self.inputs[field].trim();
            if raw.is_empty() {
                return Ok(None);
            }
            raw.parse::<u64>()
                .ok()
                .map(Some)
                .ok_or((field, "filters.invalidContext"))
        };

        Ok((
            PriceRange::new(price(0)?, price(1)?),
            ContextRange::new(context(2)?, context(3)?),
        ))
    }
}

fn bound_text<T: ToString>(bound: Option<T>) -> String {
    bound.map(|value| value.to_string()).unwrap_or_default()
}

pub fn render_range_editor(frame: &mut Frame, editor: &RangeEditorState, locale: Locale, area: Rect) {
    let popup = centered_rect(area, area.width.saturating_sub(4).clamp(30, 56), 9);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(format!(
            " {} · {} ",
            t("filters.priceRange", locale),
            t("filters.contextLength", locale)
        ))
        .title_bottom(Line::from(format!(" {} ", t("tui.rangeHelp", locale))).centered());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let mut lines: Vec<Line> = FIELDS
        .iter()
        .enumerate()
        .map(|(idx, label)| {
            let focused = idx == editor.focus;
            let value_style = if focused {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let cursor = if focused { "▏" } else { "" };
            Line::from(vec![
                Span::styled(format!("{}: ", t(label, locale)), Style::default().fg(Color::DarkGray)),
                Span::styled(format!("{}{cursor}", editor.inputs[idx]), value_style),
            ])
        })
        .collect();

    lines.push(Line::default());
    if let Some(message) = editor.error {
        lines.push(Line::from(Span::styled(
            t(message, locale),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(editor: &mut RangeEditorState, text: &str) {
        for c in text.chars() {
            editor.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_prefills_from_filters() {
        let filters = FilterState {
            price_range: PriceRange::new(None, Some(0.000_001)),
            context_length: ContextRange::new(Some(8_192), None),
            ..Default::default()
        };
        let editor = RangeEditorState::from_filters(&filters);
        assert_eq!(editor.input(0), "");
        assert_eq!(editor.input(1), "0.000001");
        assert_eq!(editor.input(2), "8192");
        assert_eq!(editor.input(3), "");
    }

    #[test]
    fn test_focus_wraps_both_ways() {
        let mut editor = RangeEditorState::default();
        editor.handle_key(key(KeyCode::Up));
        assert_eq!(editor.focus(), 3);
        editor.handle_key(key(KeyCode::Tab));
        assert_eq!(editor.focus(), 0);
        editor.handle_key(key(KeyCode::Down));
        assert_eq!(editor.focus(), 1);
    }

    #[test]
    fn test_enter_emits_both_ranges() {
        let mut editor = RangeEditorState::default();
        type_text(&mut editor, "0");
        editor.handle_key(key(KeyCode::Tab));
        type_text(&mut editor, "0.00001");
        editor.handle_key(key(KeyCode::Tab));
        editor.handle_key(key(KeyCode::Tab));
        type_text(&mut editor, "128000");

        let update = editor.handle_key(key(KeyCode::Enter));
        assert!(update.close);
        assert_eq!(
            update.actions,
            vec![
                FilterAction::SetPriceRange(PriceRange::new(Some(0.0), Some(0.000_01))),
                FilterAction::SetContextRange(ContextRange::new(None, Some(128_000))),
            ]
        );
    }

    #[test]
    fn test_invalid_field_keeps_editor_open() {
        let mut editor = RangeEditorState::default();
        editor.handle_key(key(KeyCode::Tab));
        editor.handle_key(key(KeyCode::Tab));
        type_text(&mut editor, "12.5");
        editor.handle_key(key(KeyCode::Tab));

        let update = editor.handle_key(key(KeyCode::Enter));
        assert!(!update.close);
        assert!(update.actions.is_empty());
        assert_eq!(editor.focus(), 2);
        assert_eq!(editor.error(), Some("filters.invalidContext"));

        editor.handle_key(key(KeyCode::Backspace));
        assert_eq!(editor.error(), None);
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut editor = RangeEditorState::default();
        type_text(&mut editor, "-1");
        assert!(!editor.handle_key(key(KeyCode::Enter)).close);
        assert_eq!(editor.error(), Some("filters.invalidPrice"));
    }

    #[test]
    fn test_escape_discards_draft() {
        let mut editor = RangeEditorState::default();
        type_text(&mut editor, "1");
        let update = editor.handle_key(key(KeyCode::Esc));
        assert!(update.close);
        assert!(update.actions.is_empty());
    }
}
