//! Companies page: searchable, filterable, selectable company table.

use crate::nav::View;
use crate::state::App;
use crate::views::helpers::{filter_summary, list_layout, render_pager, render_search_bar, timestamp};
use crate::widgets::{Column, DataTable};
use outreach_core::Company;
use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let list = &app.companies.list;
    let (bar, body, pager) = list_layout(area, true);

    render_search_bar(
        f,
        app,
        bar,
        View::Companies,
        filter_summary(&list.search, &list.filter.summary()),
    );

    let theme = &app.theme;
    let columns: Vec<Column<'_, Company>> = vec![
        Column::text("Name", Constraint::Percentage(24), |c: &Company| c.name.clone()),
        Column::text("Industry", Constraint::Percentage(16), |c: &Company| c.industry.clone()),
        Column::text("Country", Constraint::Percentage(10), |c: &Company| c.country.clone()),
        Column::text("Email", Constraint::Percentage(22), |c: &Company| {
            c.display_email().to_string()
        }),
        Column::styled("Replied", Constraint::Percentage(8), move |c: &Company| {
            if c.has_replies() {
                ("yes".to_string(), Style::default().fg(theme.success))
            } else {
                ("-".to_string(), Style::default().fg(theme.text_muted))
            }
        }),
        Column::text("Created", Constraint::Percentage(20), |c: &Company| {
            timestamp(&c.created_at)
        }),
    ];

    let title = format!("Companies ({})", list.pagination.total);
    DataTable::new(title, list.visible(), theme)
        .columns(columns)
        .loading(list.loading)
        .cursor(list.cursor())
        .selectable(&list.selection)
        .empty_message("No companies match")
        .render(f, body);

    render_pager(f, app, pager, &list.pagination);
}
