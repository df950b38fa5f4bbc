//! Inline status badges.

use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

pub struct Badge {
    pub label: String,
    pub color: Color,
}

impl Badge {
    pub fn new(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            color,
        }
    }

    pub fn span(&self) -> Span<'static> {
        Span::styled(
            format!("[{}]", self.label),
            Style::default().fg(self.color).add_modifier(Modifier::BOLD),
        )
    }
}
