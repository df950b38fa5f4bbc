//! Campaigns page.

use crate::state::App;
use crate::views::helpers::{render_chips, timestamp};
use crate::widgets::{Column, DataTable};
use outreach_core::{Campaign, MessageStatus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let list = &app.campaigns.list;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let sent: usize = list.items.iter().map(Campaign::sent_count).sum();
    let failed: usize = list
        .items
        .iter()
        .map(|c| c.count_with_status(MessageStatus::Failed))
        .sum();
    render_chips(
        f,
        app,
        chunks[0],
        "Totals",
        &[],
        Some(format!(
            "{} campaigns  {} messages sent  {} failed",
            list.items.len(),
            sent,
            failed
        )),
    );

    let theme = &app.theme;
    let columns: Vec<Column<'_, Campaign>> = vec![
        Column::text("Name", Constraint::Percentage(30), |c: &Campaign| c.name.clone()),
        Column::text("Industry", Constraint::Percentage(18), |c: &Campaign| c.industry.clone()),
        Column::text("Messages", Constraint::Percentage(10), |c: &Campaign| {
            c.messages.len().to_string()
        }),
        Column::styled("Sent", Constraint::Percentage(10), move |c: &Campaign| {
            (c.sent_count().to_string(), Style::default().fg(theme.success))
        }),
        Column::styled("Failed", Constraint::Percentage(10), move |c: &Campaign| {
            let failed = c.count_with_status(MessageStatus::Failed);
            let color = if failed > 0 { theme.error } else { theme.text_muted };
            (failed.to_string(), Style::default().fg(color))
        }),
        Column::text("Created", Constraint::Percentage(22), |c: &Campaign| {
            timestamp(&c.created_at)
        }),
    ];

    DataTable::new("Campaigns", list.visible(), theme)
        .columns(columns)
        .loading(list.loading)
        .cursor(list.cursor())
        .selectable(&list.selection)
        .empty_message("No campaigns yet. Press n to generate one.")
        .render(f, chunks[1]);
}
