//! Messages page: server-paged outbound messages with type/status filters.

use crate::nav::View;
use crate::state::App;
use crate::theme::{message_status_color, message_type_color};
use crate::views::helpers::{
    filter_summary, list_layout, optional_timestamp, render_pager, render_search_bar,
};
use crate::widgets::{Column, DataTable};
use outreach_core::{Message, MessageFilter};
use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    Frame,
};

fn describe(filter: &MessageFilter) -> String {
    let mut parts = Vec::new();
    if let Some(kind) = filter.message_type {
        parts.push(format!("type={}", kind));
    }
    if let Some(status) = filter.status {
        parts.push(format!("status={}", status));
    }
    if let Some(stage) = filter.stage {
        parts.push(format!("stage={}", stage));
    }
    parts.join(" ")
}

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let list = &app.messages.list;
    let (bar, body, pager) = list_layout(area, true);

    render_search_bar(
        f,
        app,
        bar,
        View::Messages,
        filter_summary(&list.search, &describe(&list.filter)),
    );

    let theme = &app.theme;
    let columns: Vec<Column<'_, Message>> = vec![
        Column::text("Company", Constraint::Percentage(18), |m: &Message| m.company_label()),
        Column::styled("Type", Constraint::Percentage(9), move |m: &Message| {
            (
                m.message_type.to_string(),
                Style::default().fg(message_type_color(m.message_type, theme)),
            )
        }),
        Column::text("Stage", Constraint::Percentage(12), |m: &Message| m.stage.to_string()),
        Column::styled("Status", Constraint::Percentage(10), move |m: &Message| {
            (
                m.status.to_string(),
                Style::default().fg(message_status_color(m.status, theme)),
            )
        }),
        Column::text("Preview", Constraint::Percentage(33), |m: &Message| {
            match m.subject.as_deref() {
                Some(subject) if !subject.is_empty() => subject.to_string(),
                _ => m.preview(60),
            }
        }),
        Column::text("Scheduled", Constraint::Percentage(18), |m: &Message| {
            optional_timestamp(m.scheduled_for.as_ref())
        }),
    ];

    let title = format!("Messages ({})", list.pagination.total);
    DataTable::new(title, list.visible(), theme)
        .columns(columns)
        .loading(list.loading)
        .cursor(list.cursor())
        .selectable(&list.selection)
        .empty_message("No messages match")
        .render(f, body);

    render_pager(f, app, pager, &list.pagination);
}

#[cfg(test)]
mod tests {
    use super::*;
    use outreach_core::{MessageStatus, MessageType};

    #[test]
    fn test_describe_lists_set_fields_only() {
        assert_eq!(describe(&MessageFilter::default()), "");
        let filter = MessageFilter {
            message_type: Some(MessageType::Email),
            status: Some(MessageStatus::Failed),
            stage: None,
        };
        let text = describe(&filter);
        assert!(text.starts_with("type="));
        assert!(text.contains("status="));
        assert!(!text.contains("stage"));
    }
}
