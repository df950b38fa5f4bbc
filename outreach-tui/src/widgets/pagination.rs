//! Pagination footer for server-paged lists.

use crate::theme::SynthBruteTheme;
use outreach_core::{PageSlot, PaginationState};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub struct PaginationBar<'a> {
    pub state: &'a PaginationState,
    pub theme: &'a SynthBruteTheme,
}

impl<'a> PaginationBar<'a> {
    pub fn new(state: &'a PaginationState, theme: &'a SynthBruteTheme) -> Self {
        Self { state, theme }
    }

    /// `< 1 ... 4 [5] 6 ... 10 >   Showing 81-100 of 200`
    pub fn line(&self) -> Line<'static> {
        let dim = Style::default().fg(self.theme.text_dim);
        let muted = Style::default().fg(self.theme.text_muted);
        let mut spans = Vec::new();

        let prev = if self.state.has_prev() { dim } else { muted };
        spans.push(Span::styled("< ", prev));
        for slot in self.state.window() {
            match slot {
                PageSlot::Number(n) if n == self.state.page => spans.push(Span::styled(
                    format!("[{}] ", n),
                    Style::default()
                        .fg(self.theme.primary)
                        .add_modifier(Modifier::BOLD),
                )),
                PageSlot::Number(n) => spans.push(Span::styled(format!("{} ", n), dim)),
                PageSlot::Ellipsis => spans.push(Span::styled("... ", muted)),
            }
        }
        let next = if self.state.has_next() { dim } else { muted };
        spans.push(Span::styled(">", next));

        let summary = match self.state.showing() {
            Some((from, to)) => format!("   Showing {}-{} of {}", from, to, self.state.total),
            None => "   No results".to_string(),
        };
        spans.push(Span::styled(summary, dim));
        Line::from(spans)
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        f.render_widget(Paragraph::new(self.line()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_line_marks_current_page_and_range() {
        let theme = SynthBruteTheme::synthbrute();
        let state = PaginationState {
            page: 2,
            page_size: 20,
            total: 45,
            total_pages: 3,
        };
        let line = PaginationBar::new(&state, &theme).line();
        let rendered = text(&line);
        assert!(rendered.contains("[2]"));
        assert!(rendered.contains("Showing 21-40 of 45"));
    }

    #[test]
    fn test_line_follows_page_window() {
        let theme = SynthBruteTheme::synthbrute();
        let state = PaginationState {
            page: 5,
            page_size: 20,
            total: 200,
            total_pages: 10,
        };
        let line = PaginationBar::new(&state, &theme).line();
        assert_eq!(text(&line), "< 1 ... 4 [5] 6 ... 10 >   Showing 81-100 of 200");
        // Arrows and summary around one span per slot.
        assert_eq!(line.spans.len(), state.window().len() + 3);

        let last = PaginationState { page: 10, ..state };
        let rendered = text(&PaginationBar::new(&last, &theme).line());
        assert!(rendered.starts_with("< 1 ... 7 8 9 [10] >"));
        assert!(rendered.ends_with("Showing 181-200 of 200"));
    }

    #[test]
    fn test_empty_list_has_no_range() {
        let theme = SynthBruteTheme::synthbrute();
        let state = PaginationState::new(20);
        let rendered = text(&PaginationBar::new(&state, &theme).line());
        assert!(rendered.contains("No results"));
    }
}
