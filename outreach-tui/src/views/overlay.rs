//! Modal stack rendering, bottom to top.

use crate::forms::WizardForm;
use crate::keys::hints;
use crate::state::{App, Modal};
use crate::theme::{message_status_color, message_type_color};
use crate::views::helpers::{optional_timestamp, timestamp};
use crate::widgets::modal::render_message;
use crate::widgets::{centered_rect, Column, DataTable, DetailPanel, FormView, ModalFrame};
use outreach_core::{Message, MessageStatus, WizardStep};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

const GLOBAL_KEYS: &[(&str, &str)] = &[
    ("Tab / Shift-Tab", "next / previous page"),
    ("1-9, 0", "jump to page"),
    ("j / k", "move down / up"),
    ("h / l", "previous / next tab"),
    ("[ / ]", "previous / next page of results"),
    ("Ctrl-r", "refresh"),
    ("?", "this help"),
    ("q", "quit"),
];

pub fn render(f: &mut Frame<'_>, app: &App) {
    let area = f.size();
    for modal in &app.modals {
        match modal {
            Modal::Help => render_help(f, app, area),
            Modal::Alert { title, message } => render_message(
                f,
                centered_rect(60, 30, area),
                ModalFrame {
                    title,
                    border_style: Style::default().fg(app.theme.error),
                },
                message.clone(),
                "Enter / Esc close",
                Style::default().fg(app.theme.text_dim),
            ),
            Modal::Confirm { title, message, .. } => render_message(
                f,
                centered_rect(50, 25, area),
                ModalFrame {
                    title,
                    border_style: Style::default().fg(app.theme.warning),
                },
                message.clone(),
                "y / Enter confirm   n / Esc cancel",
                Style::default().fg(app.theme.text_dim),
            ),
            Modal::CompanyDetail => render_company(f, app, centered_rect(80, 80, area)),
            Modal::CampaignDetail => render_campaign(f, app, centered_rect(80, 80, area)),
            Modal::Form(form) => {
                let rect = form_rect(area, FormView::height(form));
                let inner = frame(app, &form.title).render(f, rect);
                FormView {
                    form,
                    theme: &app.theme,
                    hint: "Tab next field  Enter submit  Esc cancel",
                }
                .render(f, inner);
            }
            Modal::Wizard(wizard) => render_wizard(f, app, area, wizard),
        }
    }
}

fn frame<'a>(app: &App, title: &'a str) -> ModalFrame<'a> {
    ModalFrame {
        title,
        border_style: Style::default().fg(app.theme.border_focus),
    }
}

/// 60% wide, tall enough for `rows` but never taller than the screen.
fn form_rect(area: Rect, rows: u16) -> Rect {
    let height = (rows + 2).min(area.height);
    let width = (area.width * 3 / 5).max(40).min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_help(f: &mut Frame<'_>, app: &App, area: Rect) {
    let key_style = Style::default().fg(app.theme.primary);
    let mut lines: Vec<Line> = GLOBAL_KEYS
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{:<18}", key), key_style),
                Span::raw(*action),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        app.active_view.title(),
        Style::default().fg(app.theme.secondary),
    )));
    lines.push(Line::from(hints(app.active_view)));
    render_message(
        f,
        centered_rect(60, 60, area),
        frame(app, "Help"),
        lines,
        "Esc close",
        Style::default().fg(app.theme.text_dim),
    );
}

fn render_company(f: &mut Frame<'_>, app: &App, area: Rect) {
    let detail = &app.companies.detail;
    let title = if detail.loading { "Company (loading)" } else { "Company" };
    let inner = frame(app, title).render(f, area);
    let Some(company) = detail.data.as_ref() else {
        let text = if detail.loading { "Loading..." } else { "Could not load company." };
        f.render_widget(Paragraph::new(text), inner);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(12), Constraint::Min(3), Constraint::Length(1)])
        .split(inner);

    let phones = if company.phones.is_empty() {
        company.display_phone().to_string()
    } else {
        company
            .phones
            .iter()
            .map(|p| if p.is_primary { format!("{} (primary)", p.phone) } else { p.phone.clone() })
            .collect::<Vec<_>>()
            .join(", ")
    };
    DetailPanel::new(&company.name, Style::default().fg(app.theme.secondary))
        .field("Industry", company.industry.clone())
        .field("Country", company.country.clone())
        .field("Email", company.display_email())
        .field("Phones", phones)
        .field("Website", company.display_website())
        .field("Created", timestamp(&company.created_at))
        .field("Messages", company.messages.len().to_string())
        .field("Replies", company.replies.len().to_string())
        .render(f, chunks[0]);

    let replies: Vec<Line> = company
        .replies
        .iter()
        .map(|reply| {
            Line::from(vec![
                Span::styled(
                    format!("{}  {}  ", timestamp(&reply.replied_at), reply.from_email),
                    Style::default().fg(app.theme.primary),
                ),
                Span::raw(
                    reply
                        .subject
                        .clone()
                        .or_else(|| reply.reply_content.clone())
                        .unwrap_or_default(),
                ),
            ])
        })
        .collect();
    let body = if replies.is_empty() {
        vec![Line::from(Span::styled(
            "No replies",
            Style::default().fg(app.theme.text_dim),
        ))]
    } else {
        replies
    };
    f.render_widget(Paragraph::new(body).wrap(Wrap { trim: true }), chunks[1]);
    f.render_widget(
        Paragraph::new("e edit  Esc close").style(Style::default().fg(app.theme.text_dim)),
        chunks[2],
    );
}

fn render_campaign(f: &mut Frame<'_>, app: &App, area: Rect) {
    let detail = &app.campaigns.detail;
    let theme = &app.theme;
    let inner = frame(app, "Campaign").render(f, area);
    let Some(campaign) = detail.data.as_ref() else {
        let text = if detail.loading { "Loading..." } else { "Could not load campaign." };
        f.render_widget(Paragraph::new(text), inner);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(3)])
        .split(inner);
    DetailPanel::new(&campaign.name, Style::default().fg(theme.secondary))
        .field("Industry", campaign.industry.clone())
        .field("Created", timestamp(&campaign.created_at))
        .field(
            "Messages",
            format!(
                "{} total, {} sent, {} failed",
                campaign.messages.len(),
                campaign.sent_count(),
                campaign.count_with_status(MessageStatus::Failed)
            ),
        )
        .render(f, chunks[0]);

    let columns: Vec<Column<'_, Message>> = vec![
        Column::text("Company", Constraint::Percentage(26), |m: &Message| m.company_label()),
        Column::styled("Type", Constraint::Percentage(12), move |m: &Message| {
            (
                m.message_type.to_string(),
                Style::default().fg(message_type_color(m.message_type, theme)),
            )
        }),
        Column::text("Stage", Constraint::Percentage(16), |m: &Message| m.stage.to_string()),
        Column::styled("Status", Constraint::Percentage(14), move |m: &Message| {
            (
                m.status.to_string(),
                Style::default().fg(message_status_color(m.status, theme)),
            )
        }),
        Column::text("Sent", Constraint::Percentage(32), |m: &Message| {
            optional_timestamp(m.sent_at.as_ref())
        }),
    ];
    DataTable::new("Messages", campaign.messages.iter().collect(), theme)
        .columns(columns)
        .focused(false)
        .empty_message("No messages")
        .render(f, chunks[1]);
}

fn render_wizard(f: &mut Frame<'_>, app: &App, area: Rect, wizard: &WizardForm) {
    let step = wizard.wizard.step();
    let action = if wizard.wizard.editing.is_some() { "Edit" } else { "New" };
    let title = format!(
        "{} automation, step {} of 3: {}",
        action,
        step.number(),
        step.title()
    );

    if step != WizardStep::Review {
        let rect = form_rect(area, FormView::height(&wizard.form));
        let inner = frame(app, &title).render(f, rect);
        FormView {
            form: &wizard.form,
            theme: &app.theme,
            hint: "Enter next  Esc back  Tab next field",
        }
        .render(f, inner);
        return;
    }

    let w = &wizard.wizard;
    let estimate = w.estimates();
    let hint = if w.is_submitting() {
        "Saving..."
    } else {
        "Enter save  Esc back"
    };
    let rect = form_rect(area, 14);
    let inner = frame(app, &title).render(f, rect);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);
    let name = if w.name.trim().is_empty() { "-" } else { w.name.as_str() };
    DetailPanel::new("Review", Style::default().fg(app.theme.secondary))
        .field("Name", name)
        .field("Target", format!("{} / {}", w.industry, w.country))
        .field("Companies/day", w.daily_limit.to_string())
        .field(
            "Send time",
            format!("{:02}:{:02}", w.send_time_hour, w.send_time_minute),
        )
        .field("Run for", format!("{} days", w.run_duration_days))
        .field(
            "Follow-ups",
            format!("day {} and day {}", w.followup_day_1, w.followup_day_2),
        )
        .field(
            "Estimate",
            format!("{} companies, {} messages", estimate.companies, estimate.messages),
        )
        .render(f, chunks[0]);
    let (text, color) = match &wizard.form.error {
        Some(error) => (error.clone(), app.theme.error),
        None => (hint.to_string(), app.theme.text_dim),
    };
    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(color)),
        chunks[1],
    );
}
