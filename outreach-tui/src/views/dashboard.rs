//! Dashboard: headline counters and the weekly send/reply chart.

use crate::state::App;
use crate::views::helpers::render_placeholder;
use crate::widgets::{DailyChart, StatCard};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let overview = &app.dashboard.overview;
    let Some(data) = overview.data.as_ref() else {
        render_placeholder(f, app, area, "Dashboard", overview.loading);
        return;
    };
    let stats = &data.stats;
    let theme = &app.theme;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Min(8),
        ])
        .split(area);

    let first = [
        StatCard::new("Companies", stats.total_companies, Style::default().fg(theme.primary)),
        StatCard::new("Campaigns", stats.total_campaigns, Style::default().fg(theme.primary)),
        StatCard::new("Messages sent", stats.messages_sent, Style::default().fg(theme.success)),
        StatCard::new("Scheduled", stats.messages_scheduled, Style::default().fg(theme.tertiary)),
    ];
    let second = [
        StatCard::new("Email opens", stats.email_opens, Style::default().fg(theme.info)),
        StatCard::new("Replies", stats.total_replies, Style::default().fg(theme.success))
            .caption(format!("{} this week", stats.replies_last_7_days)),
        StatCard::new(
            "Qualified leads",
            stats.total_qualified_leads,
            Style::default().fg(theme.secondary),
        ),
        StatCard::new("Unsubscribed", stats.total_unsubscribed, Style::default().fg(theme.error))
            .caption(format!("{} this week", stats.unsubscribed_last_7_days)),
    ];
    for (row, cards) in [(rows[0], &first), (rows[1], &second)] {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(row);
        for (card, cell) in cards.iter().zip(cells.iter()) {
            card.render(f, *cell);
        }
    }

    let series = [("Sent", theme.primary), ("Replies", theme.secondary)];
    let chart = DailyChart {
        title: if overview.loading { "Last 7 days (refreshing)" } else { "Last 7 days" },
        days: data
            .chart
            .iter()
            .map(|point| (point.name.clone(), vec![point.sent, point.replies]))
            .collect(),
        series: &series,
        empty_style: Style::default().fg(theme.text_dim),
    };
    chart.render(f, rows[2]);
}
