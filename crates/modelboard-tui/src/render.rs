//! Pure view functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state.

use std::fmt::Display;

use modelboard_core::filter::Moderation;
use modelboard_core::format::{format_context_length, format_price};
use modelboard_core::i18n::{Locale, t, t_found, t_with};
use modelboard_core::providers::resolve_static;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};

use crate::common::truncate_with_ellipsis;
use crate::overlays::{
    Overlay, render_model_details, render_provider_picker, render_range_editor,
};
use crate::state::AppState;

const HEADER_HEIGHT: u16 = 2;
const SEARCH_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 2;

/// Table columns as (message key, width).
const COLUMNS: [(&str, Constraint); 6] = [
    ("models.columns.name", Constraint::Percentage(30)),
    ("models.columns.provider", Constraint::Length(12)),
    ("models.columns.modality", Constraint::Length(16)),
    ("models.columns.context", Constraint::Length(8)),
    ("models.columns.prompt", Constraint::Length(18)),
    ("models.columns.completion", Constraint::Length(18)),
];

pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(SEARCH_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);

    render_header(app, frame, chunks[0]);
    render_search(app, frame, chunks[1]);
    render_table(app, frame, chunks[2]);
    render_footer(app, frame, chunks[3]);

    match &app.overlay {
        Some(Overlay::ProviderPicker(picker)) => render_provider_picker(
            frame,
            picker,
            app.browser.providers(),
            &app.browser.filters().providers,
            app.locale,
            area,
        ),
        Some(Overlay::ModelDetails(details)) => {
            if let Some(model) = app.browser.model(details.model_idx) {
                let listed = app.browser.listed_provider(details.model_idx);
                render_model_details(frame, details, model, listed, app.locale, area);
            }
        }
        Some(Overlay::RangeEditor(editor)) => {
            render_range_editor(frame, editor, app.locale, area);
        }
        None => {}
    }
}

fn text_alignment(locale: Locale) -> Alignment {
    if locale.is_rtl() {
        Alignment::Right
    } else {
        Alignment::Left
    }
}

fn render_header(app: &AppState, frame: &mut Frame, area: Rect) {
    let locale = app.locale;
    let lines = vec![
        Line::from(Span::styled(
            t("models.title", locale),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            t("models.subtitle", locale),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(text_alignment(locale)),
        area,
    );
}

fn render_search(app: &AppState, frame: &mut Frame, area: Rect) {
    let locale = app.locale;
    let border_color = if app.search.editing {
        Color::Yellow
    } else {
        Color::DarkGray
    };

    let filters = app.browser.filters();
    let active = filters.active_count();
    let title = if active > 0 {
        format!(
            " {} · {} ",
            t("filters.title", locale),
            t_with("filters.active", locale, &[("count", &active.to_string())])
        )
    } else {
        format!(" {} ", t("filters.title", locale))
    };

    let value = if app.search.value.is_empty() && !app.search.editing {
        Span::styled(
            t("models.searchPlaceholder", locale),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        let cursor = if app.search.editing { "▏" } else { "" };
        Span::raw(format!("{}{cursor}", app.search.value))
    };

    let mut spans = vec![Span::styled("/ ", Style::default().fg(Color::DarkGray)), value];
    spans.extend(filter_badges(app));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title);
    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .block(block)
            .alignment(text_alignment(locale)),
        area,
    );
}

/// Short badges for the active advanced filters, shown after the search text.
fn filter_badges(app: &AppState) -> Vec<Span<'static>> {
    let filters = app.browser.filters();
    let badge = Style::default().fg(Color::Black).bg(Color::Cyan);
    let mut spans = Vec::new();

    for slug in &filters.providers {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(format!(" {slug} "), badge));
    }
    for modality in &filters.modalities {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(format!(" {modality} "), badge));
    }
    if let Some(label) = range_label(filters.price_range.min, filters.price_range.max) {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(format!(" $ {label} "), badge));
    }
    if let Some(label) = range_label(filters.context_length.min, filters.context_length.max) {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(format!(" ctx {label} "), badge));
    }
    let moderation = match filters.moderation {
        Moderation::Any => None,
        Moderation::Moderated => Some("filters.moderated"),
        Moderation::Unmoderated => Some("filters.unmoderated"),
    };
    if let Some(key) = moderation {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(format!(" {} ", t(key, app.locale)), badge));
    }
    spans
}

/// `>= a`, `<= b` or `a..b`; `None` when unbounded.
fn range_label<T: Display>(min: Option<T>, max: Option<T>) -> Option<String> {
    match (min, max) {
        (None, None) => None,
        (Some(min), None) => Some(format!(">= {min}")),
        (None, Some(max)) => Some(format!("<= {max}")),
        (Some(min), Some(max)) => Some(format!("{min}..{max}")),
    }
}

fn render_table(app: &AppState, frame: &mut Frame, area: Rect) {
    let locale = app.locale;
    let rtl = locale.is_rtl();
    let page = app.browser.page_models();

    if page.is_empty() {
        frame.render_widget(
            Paragraph::new(t("models.noResults", locale))
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::TOP)),
            area,
        );
        return;
    }

    let mut header: Vec<Cell> = COLUMNS.iter().map(|(key, _)| Cell::from(t(key, locale))).collect();
    let mut widths: Vec<Constraint> = COLUMNS.iter().map(|(_, width)| *width).collect();
    if rtl {
        header.reverse();
        widths.reverse();
    }

    let name_width = (area.width as usize * 30 / 100).saturating_sub(1);
    let rows = page.iter().map(|model| {
        let mut cells = vec![
            Cell::from(truncate_with_ellipsis(model.display_name(), name_width)),
            Cell::from(resolve_static(&model.id)),
            Cell::from(model.architecture.modality.clone()),
            Cell::from(format_context_length(model.context_length)),
            Cell::from(format_price(&model.pricing.prompt)),
            Cell::from(format_price(&model.pricing.completion)),
        ];
        if rtl {
            cells.reverse();
        }
        Row::new(cells)
    });

    let table = Table::new(rows, widths)
        .header(
            Row::new(header).style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        )
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .column_spacing(1);

    let mut state = TableState::default();
    state.select(Some(app.selected));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_footer(app: &AppState, frame: &mut Frame, area: Rect) {
    let locale = app.locale;
    let info = app.browser.page_info();

    let summary = format!(
        "{} · {}",
        t_with(
            "models.page",
            locale,
            &[
                ("page", &info.current_page.to_string()),
                ("total", &info.total_pages.max(1).to_string()),
            ],
        ),
        t_found("models", info.total_count, locale)
    );

    let help_key = if app.search.editing {
        "tui.searchHelp"
    } else {
        "tui.help"
    };
    let second = match &app.status {
        Some(status) => Span::styled(status.clone(), Style::default().fg(Color::Red)),
        None => Span::styled(t(help_key, locale), Style::default().fg(Color::DarkGray)),
    };

    frame.render_widget(
        Paragraph::new(vec![Line::from(summary), Line::from(second)])
            .alignment(text_alignment(locale)),
        area,
    );
}
