//! Percentage gauge for open, reply and funnel rates.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Gauge},
    Frame,
};

pub struct RateGauge {
    pub title: String,
    /// 0 to 100; values outside are clamped.
    pub percent: f64,
    pub style: Style,
}

impl RateGauge {
    pub fn ratio(&self) -> f64 {
        if self.percent.is_finite() {
            (self.percent / 100.0).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let gauge = Gauge::default()
            .block(Block::default().title(self.title.as_str()).borders(Borders::ALL))
            .gauge_style(self.style)
            .label(format!("{:.1}%", self.percent))
            .ratio(self.ratio());
        f.render_widget(gauge, area);
    }
}
