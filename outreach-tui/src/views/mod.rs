//! View rendering dispatch.

pub mod analytics;
pub mod automation;
pub mod campaigns;
pub mod companies;
pub mod dashboard;
pub mod helpers;
pub mod leads;
pub mod messages;
pub mod overlay;
pub mod products;
pub mod settings;
pub mod templates;

use crate::keys::hints;
use crate::nav::View;
use crate::notifications::NotificationLevel;
use crate::state::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(f.size());

    render_header(f, app, layout[0]);

    match app.active_view {
        View::Dashboard => dashboard::render(f, app, layout[1]),
        View::Companies => companies::render(f, app, layout[1]),
        View::Campaigns => campaigns::render(f, app, layout[1]),
        View::Messages => messages::render(f, app, layout[1]),
        View::Leads => leads::render(f, app, layout[1]),
        View::Automation => automation::render(f, app, layout[1]),
        View::Products => products::render(f, app, layout[1]),
        View::Templates => templates::render(f, app, layout[1]),
        View::Settings => settings::render(f, app, layout[1]),
        View::Analytics => analytics::render(f, app, layout[1]),
    }

    render_footer(f, app, layout[2]);
    overlay::render(f, app);
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let titles: Vec<Line> = View::all()
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(format!("{} {}", (i + 1) % 10, view.title())))
        .collect();
    let title = format!("OUTREACH | {}", app.config.api_base_url);
    let tabs = Tabs::new(titles)
        .select(app.active_view.index())
        .block(Block::default().borders(Borders::ALL).title(Span::styled(
            title,
            Style::default().fg(app.theme.primary),
        )))
        .style(Style::default().fg(app.theme.text_dim))
        .highlight_style(
            Style::default()
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let (text, style) = if let Some(note) = app.notifications.latest() {
        let (label, color) = match note.level {
            NotificationLevel::Info => ("INFO", app.theme.info),
            NotificationLevel::Warning => ("WARN", app.theme.warning),
            NotificationLevel::Error => ("ERROR", app.theme.error),
            NotificationLevel::Success => ("OK", app.theme.success),
        };
        (format!("{}: {}", label, note.message), Style::default().fg(color))
    } else if app.search.is_some() {
        (
            "type to search  Enter apply  Esc close".to_string(),
            Style::default().fg(app.theme.text_dim),
        )
    } else {
        (
            hints(app.active_view).to_string(),
            Style::default().fg(app.theme.text_dim),
        )
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::TOP))
        .style(style);
    f.render_widget(footer, area);
}
