//! Analytics page: period summary, channel rates, daily chart, industries.

use crate::state::{App, ANALYTICS_PERIODS};
use crate::theme::rate_color;
use crate::views::helpers::{render_chips, render_placeholder, two_columns};
use crate::widgets::{DailyChart, FilterOption, RateGauge, StatCard};
use outreach_core::percent_label;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let analytics = &app.analytics;
    let theme = &app.theme;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(8),
        ])
        .split(area);

    let chips: Vec<FilterOption> = ANALYTICS_PERIODS
        .iter()
        .map(|days| FilterOption::new(format!("{} days", days), *days == analytics.days))
        .collect();
    render_chips(f, app, chunks[0], "Period", &chips, None);

    let Some(data) = analytics.data.data.as_ref() else {
        let rest = Rect {
            height: area.height.saturating_sub(3),
            y: chunks[1].y,
            ..area
        };
        render_placeholder(f, app, rest, "Analytics", analytics.data.loading);
        return;
    };

    let summary = &data.summary;
    let cards = [
        StatCard::new("Sent", summary.total_sent, Style::default().fg(theme.primary)).caption(
            format!("{} email / {} whatsapp", summary.email_sent, summary.whatsapp_sent),
        ),
        StatCard::new("Opens", summary.email_opens, Style::default().fg(theme.info))
            .caption(format!("{} unique", summary.unique_opens)),
        StatCard::new("Replies", summary.total_replies, Style::default().fg(theme.success)).caption(
            format!("{} email / {} whatsapp", summary.email_replies, summary.whatsapp_replies),
        ),
        StatCard::new(
            "Open / reply",
            format!("{} / {}", data.open_rate_label(), data.reply_rate_label()),
            Style::default().fg(rate_color(data.rates.overall_reply_rate, theme)),
        ),
    ];
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(chunks[1]);
    for (card, cell) in cards.iter().zip(cells.iter()) {
        card.render(f, *cell);
    }

    let rates = [
        ("Email open", data.rates.email_open_rate),
        ("Email reply", data.rates.email_reply_rate),
        ("WhatsApp reply", data.rates.whatsapp_reply_rate),
        ("Overall reply", data.rates.overall_reply_rate),
    ];
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(chunks[2]);
    for ((title, rate), cell) in rates.iter().zip(cells.iter()) {
        RateGauge {
            title: title.to_string(),
            percent: *rate,
            style: Style::default().fg(rate_color(*rate, theme)),
        }
        .render(f, *cell);
    }

    let (left, right) = two_columns(chunks[3], 65);
    let series = [
        ("Email", theme.primary),
        ("WhatsApp", theme.success),
        ("Replies", theme.secondary),
    ];
    let title = format!("Daily activity, last {} days", data.period_days);
    DailyChart {
        title: &title,
        days: data
            .daily_data
            .iter()
            .map(|day| {
                (
                    day.name.clone(),
                    vec![day.email_sent, day.whatsapp_sent, day.replies],
                )
            })
            .collect(),
        series: &series,
        empty_style: Style::default().fg(theme.text_dim),
    }
    .render(f, left);

    let rows: Vec<Row> = data
        .top_industries(10)
        .into_iter()
        .map(|industry| {
            let share = if industry.companies == 0 {
                0.0
            } else {
                industry.replies as f64 / industry.companies as f64 * 100.0
            };
            Row::new(vec![
                Cell::from(industry.industry.clone()),
                Cell::from(industry.replies.to_string()),
                Cell::from(industry.companies.to_string()),
                Cell::from(percent_label(share)),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(40),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ],
    )
    .header(
        Row::new(vec!["Industry", "Replies", "Companies", "Rate"]).style(
            Style::default()
                .fg(theme.secondary)
                .add_modifier(Modifier::BOLD),
        ),
    )
    .block(Block::default().title("Top industries").borders(Borders::ALL));
    f.render_widget(table, right);
}
