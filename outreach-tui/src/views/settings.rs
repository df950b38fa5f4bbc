//! Settings page.

use crate::state::{App, SettingsTab};
use crate::views::helpers::{
    list_layout, optional_timestamp, or_dash, render_chips, render_pager, render_placeholder,
    yes_no,
};
use crate::widgets::{Column, DataTable, DetailPanel, FilterOption};
use outreach_core::{EmailAccount, SettingsBundle};
use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    Frame,
};

fn flag(value: Option<bool>) -> String {
    value.map(yes_no).unwrap_or("-").to_string()
}

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let settings = &app.settings;
    let paged = settings.tab == SettingsTab::Accounts;
    let (bar, body, pager) = list_layout(area, paged);
    let chips = FilterOption::tabs(
        SettingsTab::all().iter().map(SettingsTab::title),
        settings.tab.title(),
    );
    render_chips(f, app, bar, "Settings", &chips, None);

    if settings.tab == SettingsTab::Accounts {
        render_accounts(f, app, body);
        render_pager(f, app, pager, &settings.accounts.pagination);
        return;
    }

    let Some(bundle) = settings.bundle.data.as_ref() else {
        render_placeholder(f, app, body, "Settings", settings.bundle.loading);
        return;
    };
    panel(app, bundle, settings.tab).render(f, body);
}

fn panel<'a>(app: &App, bundle: &'a SettingsBundle, tab: SettingsTab) -> DetailPanel<'a> {
    let label = Style::default().fg(app.theme.secondary);
    let border = Style::default().fg(app.theme.border);
    match tab {
        SettingsTab::General => {
            let g = &bundle.general;
            DetailPanel::new("General (e to edit)", label)
                .border_style(border)
                .optional("Company", g.company_name.as_deref())
                .optional("Website", g.company_website.as_deref())
                .optional("Description", g.company_description.as_deref())
                .optional("Sender", g.sender_name.as_deref())
                .optional("Position", g.sender_position.as_deref())
                .optional("Timezone", g.timezone.as_deref())
                .optional("Language", g.language.as_deref())
                .optional("Theme", g.theme.as_deref())
        }
        SettingsTab::Email => {
            let e = &bundle.email;
            let password = if e.smtp_password.is_empty() { "-" } else { "********" };
            DetailPanel::new("Email (e to edit, t to test)", label)
                .border_style(border)
                .field("SMTP server", or_dash(Some(e.smtp_server.as_str())))
                .field("SMTP port", or_dash(Some(e.smtp_port.as_str())))
                .field("Username", or_dash(Some(e.smtp_username.as_str())))
                .field("Password", password)
                .field("From email", or_dash(Some(e.from_email.as_str())))
                .field("From name", or_dash(Some(e.from_name.as_str())))
        }
        SettingsTab::Notifications | SettingsTab::Accounts => {
            let n = &bundle.notifications;
            DetailPanel::new("Notifications (e to edit)", label)
                .border_style(border)
                .field("Email notifications", flag(n.email_notifications))
                .field("Reply notifications", flag(n.reply_notifications))
                .field("Daily reports", flag(n.daily_reports))
                .field("Weekly reports", flag(n.weekly_reports))
        }
    }
}

fn render_accounts(f: &mut Frame<'_>, app: &App, area: Rect) {
    let list = &app.settings.accounts;
    let columns: Vec<Column<'_, EmailAccount>> = vec![
        Column::text("Email", Constraint::Percentage(26), |a: &EmailAccount| a.email.clone()),
        Column::text("Name", Constraint::Percentage(16), |a: &EmailAccount| {
            or_dash(a.display_name.as_deref())
        }),
        Column::text("SMTP", Constraint::Percentage(20), |a: &EmailAccount| {
            format!("{}:{}", a.smtp_host, a.smtp_port)
        }),
        Column::text("Sent today", Constraint::Percentage(12), |a: &EmailAccount| {
            format!("{}/{}", a.emails_sent_today, a.daily_limit)
        }),
        Column::text("Flags", Constraint::Percentage(10), |a: &EmailAccount| {
            match (a.is_default, a.is_active) {
                (true, _) => "default",
                (false, true) => "active",
                (false, false) => "off",
            }
            .to_string()
        }),
        Column::text("Last used", Constraint::Percentage(16), |a: &EmailAccount| {
            optional_timestamp(a.last_used_at.as_ref())
        }),
    ];
    DataTable::new("Email accounts", list.visible(), &app.theme)
        .columns(columns)
        .loading(list.loading)
        .cursor(list.cursor())
        .empty_message("No sending accounts configured")
        .render(f, area);
}
