//! Leads page: replies, qualified leads, opened and stopped companies.

use crate::state::{App, LeadsTab};
use crate::views::helpers::{
    list_layout, optional_timestamp, or_dash, render_chips, render_pager, timestamp, two_columns,
    yes_no,
};
use crate::widgets::{Column, DataTable, DetailPanel, FilterOption};
use outreach_core::{LeadSummary, OpenedCompany, ReplyEntry, StoppedCompany};
use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let leads = &app.leads;
    let paged = matches!(leads.tab, LeadsTab::Opened | LeadsTab::Stopped);
    let (bar, body, pager) = list_layout(area, paged);

    let chips = FilterOption::tabs(LeadsTab::all().iter().map(LeadsTab::title), leads.tab.title());
    let source = match leads.filter.source {
        Some(source) => format!("source={}", source),
        None => "source=all".to_string(),
    };
    render_chips(f, app, bar, "Leads", &chips, Some(source));

    match leads.tab {
        LeadsTab::Replies => render_replies(f, app, body),
        LeadsTab::Qualified => render_qualified(f, app, body),
        LeadsTab::Opened => {
            render_opened(f, app, body);
            render_pager(f, app, pager, &leads.opened.pagination);
        }
        LeadsTab::Stopped => {
            render_stopped(f, app, body);
            render_pager(f, app, pager, &leads.stopped.pagination);
        }
    }
}

fn render_replies(f: &mut Frame<'_>, app: &App, area: Rect) {
    let leads = &app.leads;
    let theme = &app.theme;
    let rows = leads.visible_replies();
    let (left, right) = two_columns(area, 60);

    let current = rows.get(leads.cursor.min(rows.len().saturating_sub(1))).copied();
    let columns: Vec<Column<'_, ReplyEntry>> = vec![
        Column::text("Company", Constraint::Percentage(28), |r: &ReplyEntry| {
            r.company_name.clone()
        }),
        Column::text("Source", Constraint::Percentage(12), |r: &ReplyEntry| r.source.clone()),
        Column::text("From", Constraint::Percentage(30), |r: &ReplyEntry| r.sender.clone()),
        Column::styled("Lead", Constraint::Percentage(8), move |r: &ReplyEntry| {
            let color = if r.is_qualified_lead { theme.success } else { theme.text_muted };
            (yes_no(r.is_qualified_lead).to_string(), Style::default().fg(color))
        }),
        Column::text("Replied", Constraint::Percentage(22), |r: &ReplyEntry| {
            timestamp(&r.replied_at)
        }),
    ];
    DataTable::new(format!("Replies ({})", rows.len()), rows, theme)
        .columns(columns)
        .loading(leads.replies.loading)
        .cursor(leads.cursor)
        .empty_message("No replies yet")
        .render(f, left);

    let mut panel = DetailPanel::new("Reply", Style::default().fg(theme.secondary));
    if let Some(reply) = current {
        panel = panel
            .field("Company", reply.company_name.clone())
            .optional("Industry", reply.company_industry.as_deref())
            .optional("Country", reply.company_country.as_deref())
            .field("From", reply.sender.clone())
            .optional("Subject", reply.subject.as_deref())
            .optional("Content", reply.reply_content.as_deref());
    }
    panel.render(f, right);
}

fn render_qualified(f: &mut Frame<'_>, app: &App, area: Rect) {
    let leads = &app.leads;
    let columns: Vec<Column<'_, LeadSummary>> = vec![
        Column::text("Company", Constraint::Percentage(24), |l: &LeadSummary| {
            l.company_name.clone()
        }),
        Column::text("Industry", Constraint::Percentage(16), |l: &LeadSummary| {
            l.industry.clone()
        }),
        Column::text("Country", Constraint::Percentage(10), |l: &LeadSummary| l.country.clone()),
        Column::text("Email", Constraint::Percentage(20), |l: &LeadSummary| {
            or_dash(l.email.as_deref())
        }),
        Column::text("Replies", Constraint::Percentage(8), |l: &LeadSummary| {
            l.total_replies.to_string()
        }),
        Column::text("Latest", Constraint::Percentage(22), |l: &LeadSummary| {
            match &l.latest_reply {
                Some(reply) => format!("{} {}", reply.source, timestamp(&reply.replied_at)),
                None => "-".to_string(),
            }
        }),
    ];
    let rows = leads.visible_qualified();
    DataTable::new(format!("Qualified leads ({})", rows.len()), rows, &app.theme)
        .columns(columns)
        .loading(leads.qualified.loading)
        .cursor(leads.cursor)
        .empty_message("No qualified leads yet")
        .render(f, area);
}

fn render_opened(f: &mut Frame<'_>, app: &App, area: Rect) {
    let list = &app.leads.opened;
    let theme = &app.theme;
    let columns: Vec<Column<'_, OpenedCompany>> = vec![
        Column::text("Company", Constraint::Percentage(26), |c: &OpenedCompany| c.name.clone()),
        Column::text("Industry", Constraint::Percentage(16), |c: &OpenedCompany| {
            c.industry.clone()
        }),
        Column::text("Country", Constraint::Percentage(10), |c: &OpenedCompany| {
            c.country.clone()
        }),
        Column::text("Opens", Constraint::Percentage(8), |c: &OpenedCompany| {
            c.open_count.to_string()
        }),
        Column::text("Last opened", Constraint::Percentage(22), |c: &OpenedCompany| {
            optional_timestamp(c.last_opened_at.as_ref())
        }),
        Column::styled("Replied", Constraint::Percentage(10), move |c: &OpenedCompany| {
            let color = if c.has_reply { theme.success } else { theme.text_muted };
            (yes_no(c.has_reply).to_string(), Style::default().fg(color))
        }),
    ];
    DataTable::new(format!("Opened ({})", list.pagination.total), list.visible(), theme)
        .columns(columns)
        .loading(list.loading)
        .cursor(list.cursor())
        .empty_message("No tracked opens")
        .render(f, area);
}

fn render_stopped(f: &mut Frame<'_>, app: &App, area: Rect) {
    let list = &app.leads.stopped;
    let columns: Vec<Column<'_, StoppedCompany>> = vec![
        Column::text("Company", Constraint::Percentage(26), |c: &StoppedCompany| {
            c.company_name.clone()
        }),
        Column::text("Email", Constraint::Percentage(24), |c: &StoppedCompany| {
            or_dash(c.email.as_deref())
        }),
        Column::text("Reason", Constraint::Percentage(34), |c: &StoppedCompany| {
            c.reason.clone()
        }),
        Column::text("Status", Constraint::Percentage(16), |c: &StoppedCompany| {
            c.status.clone()
        }),
    ];
    DataTable::new(format!("Stopped ({})", list.pagination.total), list.visible(), &app.theme)
        .columns(columns)
        .loading(list.loading)
        .cursor(list.cursor())
        .empty_message("No stopped sequences")
        .render(f, area);
}
