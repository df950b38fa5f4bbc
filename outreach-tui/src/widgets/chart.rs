//! Grouped daily bar chart.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{
        block::{Position, Title},
        Bar, BarChart, BarGroup, Block, Borders, Paragraph,
    },
    Frame,
};

/// One bar group per day, one bar per series.
pub struct DailyChart<'a> {
    pub title: &'a str,
    pub days: Vec<(String, Vec<u64>)>,
    pub series: &'a [(&'a str, Color)],
    pub empty_style: Style,
}

impl<'a> DailyChart<'a> {
    pub fn legend(&self) -> Line<'static> {
        let spans: Vec<Span> = self
            .series
            .iter()
            .map(|(name, color)| Span::styled(format!(" ■ {} ", name), Style::default().fg(*color)))
            .collect();
        Line::from(spans)
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(self.title)
            .title(Title::from(self.legend()).position(Position::Bottom))
            .borders(Borders::ALL);

        if self.days.is_empty() {
            let empty = Paragraph::new("No activity in this period")
                .style(self.empty_style)
                .block(block);
            f.render_widget(empty, area);
            return;
        }

        // Each group takes one column per bar plus a gap.
        let per_group = self.series.len().max(1) as u16 + 1;
        let fits = (area.width.saturating_sub(2) / (per_group * 3)).max(1) as usize;
        let skip = self.days.len().saturating_sub(fits);

        let mut chart = BarChart::default()
            .block(block)
            .bar_width(3)
            .bar_gap(0)
            .group_gap(1);
        for (label, values) in self.days.iter().skip(skip) {
            let bars: Vec<Bar> = values
                .iter()
                .zip(self.series.iter())
                .map(|(value, (_, color))| {
                    Bar::default()
                        .value(*value)
                        .style(Style::default().fg(*color))
                        .value_style(Style::default().fg(Color::Black).bg(*color))
                })
                .collect();
            chart = chart.data(
                BarGroup::default()
                    .label(Line::from(label.clone()))
                    .bars(&bars),
            );
        }
        f.render_widget(chart, area);
    }
}
