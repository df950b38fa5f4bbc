//! Chip bar for sub-tabs, periods and active filters.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Debug, Clone)]
pub struct FilterOption {
    pub label: String,
    pub active: bool,
}

impl FilterOption {
    pub fn new(label: impl Into<String>, active: bool) -> Self {
        Self {
            label: label.into(),
            active,
        }
    }

    /// One option per label with `active` highlighted.
    pub fn tabs<'l>(labels: impl IntoIterator<Item = &'l str>, active: &str) -> Vec<FilterOption> {
        labels
            .into_iter()
            .map(|label| FilterOption::new(label, label == active))
            .collect()
    }
}

pub struct FilterBar<'a> {
    pub title: &'a str,
    pub filters: &'a [FilterOption],
    /// Free text after the chips, e.g. the filter summary.
    pub trailer: Option<String>,
    pub active_style: Style,
    pub inactive_style: Style,
}

impl<'a> FilterBar<'a> {
    pub fn line(&self) -> Line<'static> {
        let mut spans: Vec<Span> = self
            .filters
            .iter()
            .map(|filter| {
                let style = if filter.active {
                    self.active_style
                } else {
                    self.inactive_style
                };
                Span::styled(format!(" {} ", filter.label), style)
            })
            .collect();
        if let Some(trailer) = &self.trailer {
            spans.push(Span::styled(format!("  {}", trailer), self.inactive_style));
        }
        Line::from(spans)
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let paragraph =
            Paragraph::new(self.line()).block(Block::default().title(self.title).borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }
}
