//! Common view rendering helpers.
//!
//! Layout splits shared by the list pages, plus the small formatting rules
//! every page uses for timestamps and missing values.

use crate::nav::View;
use crate::state::App;
use crate::widgets::{FilterBar, FilterOption, PaginationBar};
use outreach_core::{PaginationState, Timestamp};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Bar on top, content below, optional one-line pager at the bottom.
pub fn list_layout(area: Rect, pager: bool) -> (Rect, Rect, Option<Rect>) {
    let constraints = if pager {
        vec![Constraint::Length(3), Constraint::Min(3), Constraint::Length(1)]
    } else {
        vec![Constraint::Length(3), Constraint::Min(3)]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);
    (chunks[0], chunks[1], chunks.get(2).copied())
}

pub fn two_columns(area: Rect, left_percent: u16) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(left_percent),
            Constraint::Percentage(100 - left_percent),
        ])
        .split(area);
    (chunks[0], chunks[1])
}

pub fn timestamp(value: &Timestamp) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

pub fn optional_timestamp(value: Option<&Timestamp>) -> String {
    value.map(timestamp).unwrap_or_else(|| "-".to_string())
}

pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

pub fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

pub fn active_style(app: &App) -> Style {
    Style::default()
        .fg(app.theme.bg)
        .bg(app.theme.primary)
        .add_modifier(Modifier::BOLD)
}

pub fn inactive_style(app: &App) -> Style {
    Style::default().fg(app.theme.text_dim)
}

/// Chip bar with an optional trailing summary.
pub fn render_chips(
    f: &mut Frame<'_>,
    app: &App,
    area: Rect,
    title: &str,
    chips: &[FilterOption],
    trailer: Option<String>,
) {
    let bar = FilterBar {
        title,
        filters: chips,
        trailer,
        active_style: active_style(app),
        inactive_style: inactive_style(app),
    };
    bar.render(f, area);
}

/// Search input when the box is open for `view`, otherwise the filter summary.
pub fn render_search_bar(f: &mut Frame<'_>, app: &App, area: Rect, view: View, summary: String) {
    if let Some(search) = app.search.as_ref().filter(|s| s.view == view) {
        let mut input = search.input.clone();
        input.set_block(
            Block::default()
                .title("Search")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border_focus)),
        );
        f.render_widget(input.widget(), area);
        return;
    }
    let text = if summary.is_empty() {
        "No filters  (/ search, f filter)".to_string()
    } else {
        summary
    };
    let bar = Paragraph::new(text)
        .style(Style::default().fg(app.theme.text_dim))
        .block(Block::default().title("Filters").borders(Borders::ALL));
    f.render_widget(bar, area);
}

/// Search term and filter summary joined for the bar.
pub fn filter_summary(search: &str, filters: &str) -> String {
    let mut parts = Vec::new();
    if !search.is_empty() {
        parts.push(format!("search=\"{}\"", search));
    }
    if !filters.is_empty() {
        parts.push(filters.to_string());
    }
    parts.join("  ")
}

pub fn render_pager(f: &mut Frame<'_>, app: &App, area: Option<Rect>, state: &PaginationState) {
    if let Some(area) = area {
        PaginationBar::new(state, &app.theme).render(f, area);
    }
}

/// Centered dim message for a page with nothing loaded yet.
pub fn render_placeholder(f: &mut Frame<'_>, app: &App, area: Rect, title: &str, loading: bool) {
    let message = if loading {
        "Loading..."
    } else {
        "Nothing loaded. Ctrl-r to retry."
    };
    let widget = Paragraph::new(message)
        .style(Style::default().fg(app.theme.text_dim))
        .block(Block::default().title(title.to_string()).borders(Borders::ALL));
    f.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_summary_joins_parts() {
        assert_eq!(filter_summary("", ""), "");
        assert_eq!(filter_summary("acme", ""), "search=\"acme\"");
        assert_eq!(
            filter_summary("acme", "industry=Retail"),
            "search=\"acme\"  industry=Retail"
        );
    }

    #[test]
    fn test_or_dash_treats_blank_as_missing() {
        assert_eq!(or_dash(Some("  ")), "-");
        assert_eq!(or_dash(None), "-");
        assert_eq!(or_dash(Some("x")), "x");
    }
}
