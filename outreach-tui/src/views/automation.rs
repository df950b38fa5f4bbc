//! Automation page: scheduled outreach configs and their controls.

use crate::state::App;
use crate::theme::automation_status_color;
use crate::views::helpers::{optional_timestamp, two_columns};
use crate::widgets::{Badge, Column, DataTable, DetailPanel};
use outreach_core::{actions_for, AutomationConfig};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let list = &app.automation.list;
    let theme = &app.theme;
    let (left, right) = two_columns(area, 62);

    let columns: Vec<Column<'_, AutomationConfig>> = vec![
        Column::text("Name", Constraint::Percentage(28), |c: &AutomationConfig| c.display_name()),
        Column::styled("Status", Constraint::Percentage(14), move |c: &AutomationConfig| {
            (
                c.status.clone(),
                Style::default().fg(automation_status_color(&c.status, theme)),
            )
        }),
        Column::text("Daily", Constraint::Percentage(10), |c: &AutomationConfig| {
            c.daily_limit.to_string()
        }),
        Column::text("Send at", Constraint::Percentage(12), |c: &AutomationConfig| {
            c.send_time_label()
        }),
        Column::text("Days", Constraint::Percentage(12), |c: &AutomationConfig| {
            c.progress_label()
        }),
        Column::text("Sent", Constraint::Percentage(12), |c: &AutomationConfig| {
            c.total_messages_sent.to_string()
        }),
        Column::text("Replies", Constraint::Percentage(12), |c: &AutomationConfig| {
            c.total_replies.to_string()
        }),
    ];
    DataTable::new("Automations", list.visible(), theme)
        .columns(columns)
        .loading(list.loading)
        .cursor(list.cursor())
        .empty_message("No automations. Press n to create one.")
        .render(f, left);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(3)])
        .split(right);

    let Some(config) = list.selected() else {
        DetailPanel::new("Details", Style::default()).render(f, chunks[0]);
        return;
    };
    DetailPanel::new("Details", Style::default().fg(theme.secondary))
        .field("Name", config.display_name())
        .field("Industry", config.industry.clone())
        .field("Country", config.country.clone())
        .field("Companies/day", config.daily_limit.to_string())
        .field("Send time", config.send_time_label())
        .field("Run for", format!("{} days", config.run_duration_days))
        .field(
            "Follow-ups",
            format!("day {} and day {}", config.followup_day_1, config.followup_day_2),
        )
        .field("Fetched", config.total_companies_fetched.to_string())
        .field("Started", optional_timestamp(config.start_date.as_ref()))
        .field("Ends", optional_timestamp(config.end_date.as_ref()))
        .field("Last run", optional_timestamp(config.last_run_at.as_ref()))
        .render(f, chunks[0]);

    let mut spans = vec![Badge::new(&config.status, automation_status_color(&config.status, theme)).span()];
    let actions = actions_for(&config.status);
    if actions.is_empty() {
        spans.push(Span::styled("  no actions", Style::default().fg(theme.text_muted)));
    }
    for action in actions {
        spans.push(Span::styled(
            format!("  {}", action.label()),
            Style::default().fg(theme.primary),
        ));
    }
    let bar = Paragraph::new(Line::from(spans))
        .block(Block::default().title("Available").borders(Borders::ALL));
    f.render_widget(bar, chunks[1]);
}
