use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use modelboard_core::directory::search_providers;
use modelboard_core::i18n::{Locale, t};
use modelboard_core::store::FilterAction;
use modelboard_types::Provider;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};

use super::{OverlayUpdate, centered_rect};
use crate::common::truncate_with_ellipsis;

#[derive(Debug, Default)]
pub struct ProviderPickerState {
    filter: String,
    selected: usize,
}

impl ProviderPickerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn filtered<'a>(&self, providers: &'a [Provider]) -> Vec<&'a Provider> {
        search_providers(providers, self.filter.trim())
    }

    pub fn handle_key(&mut self, providers: &[Provider], key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc | KeyCode::Enter => OverlayUpdate::close(),
            KeyCode::Char('c') if ctrl => OverlayUpdate::close(),
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                OverlayUpdate::stay()
            }
            KeyCode::Down => {
                let count = self.filtered(providers).len();
                if count > 0 && self.selected < count - 1 {
                    self.selected += 1;
                }
                OverlayUpdate::stay()
            }
            KeyCode::Char(' ') => match self.filtered(providers).get(self.selected) {
                Some(provider) => {
                    OverlayUpdate::stay().with_action(FilterAction::ToggleProvider(provider.slug.clone()))
                }
                None => OverlayUpdate::stay(),
            },
            KeyCode::Char('u') if ctrl => {
                self.filter.clear();
                self.clamp_selection(providers);
                OverlayUpdate::stay()
            }
            KeyCode::Backspace => {
                self.filter.pop();
                self.clamp_selection(providers);
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) if !ctrl => {
                self.filter.push(c);
                self.clamp_selection(providers);
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    fn clamp_selection(&mut self, providers: &[Provider]) {
        let count = self.filtered(providers).len();
        if count == 0 {
            self.selected = 0;
        } else if self.selected >= count {
            self.selected = count - 1;
        }
    }
}

pub fn render_provider_picker(
    frame: &mut Frame,
    picker: &ProviderPickerState,
    providers: &[Provider],
    chosen: &[String],
    locale: Locale,
    area: Rect,
) {
    let filtered = picker.filtered(providers);
    let height = (filtered.len() as u16 + 5).clamp(7, 24);
    let popup = centered_rect(area, area.width.saturating_sub(4).clamp(30, 60), height);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(format!(" {} ", t("filters.providers", locale)))
        .title_bottom(Line::from(format!(" {} ", t("tui.pickerHelp", locale))).centered());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let filter_line = if picker.filter.is_empty() {
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                t("providers.searchPlaceholder", locale),
                Style::default().fg(Color::DarkGray),
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::DarkGray)),
            Span::styled(picker.filter.clone(), Style::default().fg(Color::Magenta)),
        ])
    };
    frame.render_widget(Paragraph::new(filter_line), chunks[0]);

    let label_width = chunks[1].width.saturating_sub(6) as usize;
    let items: Vec<ListItem> = filtered
        .iter()
        .map(|provider| {
            let checked = chosen.iter().any(|slug| *slug == provider.slug);
            let mark = if checked { "[x] " } else { "[ ] " };
            let label = format!("{} ({})", provider.name, provider.slug);
            ListItem::new(Line::from(vec![
                Span::raw(mark),
                Span::raw(truncate_with_ellipsis(&label, label_width)),
            ]))
        })
        .collect();

    let list = List::new(items).highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );
    let mut list_state = ListState::default();
    if !filtered.is_empty() {
        list_state.select(Some(picker.selected));
    }
    frame.render_stateful_widget(list, chunks[1], &mut list_state);
}
