use crossterm::event::{KeyCode, KeyEvent};
use modelboard_core::details::model_details;
use modelboard_core::i18n::{Locale, t};
use modelboard_types::{Model, Provider};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::{OverlayUpdate, centered_rect};

#[derive(Debug)]
pub struct ModelDetailsState {
    /// Catalog position of the model being shown.
    pub model_idx: usize,
    scroll: u16,
}

impl ModelDetailsState {
    pub fn new(model_idx: usize) -> Self {
        Self {
            model_idx,
            scroll: 0,
        }
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => OverlayUpdate::close(),
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                OverlayUpdate::stay()
            }
            KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }
}

pub fn render_model_details(
    frame: &mut Frame,
    state: &ModelDetailsState,
    model: &Model,
    listed: Option<&Provider>,
    locale: Locale,
    area: Rect,
) {
    let popup = centered_rect(
        area,
        area.width.saturating_sub(8).clamp(40, 100),
        area.height.saturating_sub(4),
    );
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", model.display_name()))
        .title_bottom(Line::from(format!(" {} ", t("tui.detailHelp", locale))).centered());

    let label_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(Span::styled(model.id.clone(), Style::default().fg(Color::DarkGray))),
        Line::default(),
    ];
    for (label, value) in model_details(model, listed, locale) {
        lines.push(Line::from(vec![
            Span::styled(format!("{label}: "), label_style),
            Span::raw(value),
        ]));
    }
    if let Some(description) = model.description.as_deref().filter(|d| !d.trim().is_empty()) {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            t("models.details.description", locale),
            label_style,
        )));
        lines.push(Line::from(description.to_string()));
    }

    let alignment = if locale.is_rtl() {
        Alignment::Right
    } else {
        Alignment::Left
    };
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(alignment)
        .wrap(Wrap { trim: false })
        .scroll((state.scroll, 0));
    frame.render_widget(paragraph, popup);
}
