//! Headline number card for the dashboard and analytics summaries.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct StatCard {
    pub title: String,
    pub value: String,
    pub caption: Option<String>,
    pub style: Style,
    pub border_style: Style,
}

impl StatCard {
    pub fn new(title: impl Into<String>, value: impl ToString, style: Style) -> Self {
        Self {
            title: title.into(),
            value: value.to_string(),
            caption: None,
            style,
            border_style: Style::default(),
        }
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let mut lines = vec![Line::from(Span::styled(
            self.value.clone(),
            self.style.add_modifier(Modifier::BOLD),
        ))];
        if let Some(caption) = &self.caption {
            lines.push(Line::from(caption.clone()));
        }
        let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .title(self.title.as_str())
                .borders(Borders::ALL)
                .border_style(self.border_style),
        );
        f.render_widget(paragraph, area);
    }
}
