//! Modal overlays drawn above the active page.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Text,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Rect of `percent_x` by `percent_y` centred in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Clears its area and draws a bordered frame; returns the inner rect.
pub struct ModalFrame<'a> {
    pub title: &'a str,
    pub border_style: Style,
}

impl<'a> ModalFrame<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) -> Rect {
        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(self.border_style);
        let inner = block.inner(area);
        f.render_widget(Clear, area);
        f.render_widget(block, area);
        inner
    }
}

/// Message box with a key hint on its last line.
pub fn render_message<'t>(
    f: &mut Frame<'_>,
    area: Rect,
    frame: ModalFrame<'_>,
    body: impl Into<Text<'t>>,
    hint: &str,
    hint_style: Style,
) {
    let inner = frame.render(f, area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);
    f.render_widget(Paragraph::new(body.into()).wrap(Wrap { trim: true }), chunks[0]);
    f.render_widget(Paragraph::new(hint.to_string()).style(hint_style), chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_stays_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(60, 50, area);
        assert_eq!(rect.width, 60);
        assert_eq!(rect.height, 20);
        assert_eq!(rect.x, 20);
        assert_eq!(rect.y, 10);
    }
}
