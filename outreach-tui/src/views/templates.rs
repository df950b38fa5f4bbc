//! Templates page.

use crate::state::App;
use crate::theme::message_type_color;
use crate::views::helpers::{or_dash, render_chips, timestamp, two_columns};
use crate::widgets::{Column, DataTable, FilterOption};
use outreach_core::{MessageType, Template};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let templates = &app.templates;
    let theme = &app.theme;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let chips = vec![
        FilterOption::new("All", templates.type_filter.is_none()),
        FilterOption::new("Email", templates.type_filter == Some(MessageType::Email)),
        FilterOption::new("WhatsApp", templates.type_filter == Some(MessageType::Whatsapp)),
    ];
    render_chips(f, app, chunks[0], "Type", &chips, None);

    let (left, right) = two_columns(chunks[1], 55);
    let columns: Vec<Column<'_, Template>> = vec![
        Column::text("Name", Constraint::Percentage(36), |t: &Template| t.name.clone()),
        Column::styled("Type", Constraint::Percentage(16), move |t: &Template| {
            (
                t.template_type.to_string(),
                Style::default().fg(message_type_color(t.template_type, theme)),
            )
        }),
        Column::text("Subject", Constraint::Percentage(48), |t: &Template| {
            or_dash(t.subject.as_deref())
        }),
    ];
    let list = &templates.list;
    DataTable::new("Templates", list.visible(), theme)
        .columns(columns)
        .loading(list.loading)
        .cursor(list.cursor())
        .empty_message("No templates")
        .render(f, left);

    let (title, body) = match list.selected() {
        Some(template) => (
            format!("{} ({})", template.name, timestamp(&template.created_at)),
            format!(
                "{}\n\nVariables: {}",
                template.content,
                or_dash(template.variables.as_deref())
            ),
        ),
        None => ("Preview".to_string(), String::new()),
    };
    let preview = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .block(Block::default().title(title).borders(Borders::ALL));
    f.render_widget(preview, right);
}
