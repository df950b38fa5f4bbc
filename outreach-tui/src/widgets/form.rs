//! Form renderer: one bordered text input per field.

use crate::forms::Form;
use crate::theme::SynthBruteTheme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub struct FormView<'a> {
    pub form: &'a Form,
    pub theme: &'a SynthBruteTheme,
    /// Shown under the fields when there is no error.
    pub hint: &'a str,
}

impl<'a> FormView<'a> {
    /// Rows needed to show every field plus the message line.
    pub fn height(form: &Form) -> u16 {
        form.fields.len() as u16 * 3 + 3
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let mut constraints: Vec<Constraint> = self
            .form
            .fields
            .iter()
            .map(|_| Constraint::Length(3))
            .collect();
        constraints.push(Constraint::Min(1));
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (index, field) in self.form.fields.iter().enumerate() {
            let focused = index == self.form.focus;
            let border = if focused {
                self.theme.border_focus
            } else {
                self.theme.border
            };
            let mut input = field.input.clone();
            input.set_block(
                Block::default()
                    .title(field.label)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            );
            if !focused {
                input.set_cursor_style(Style::default());
            }
            f.render_widget(&input, chunks[index]);
        }

        let (message, color) = match &self.form.error {
            Some(error) => (error.as_str(), self.theme.error),
            None => (self.hint, self.theme.text_dim),
        };
        let footer = Paragraph::new(message.to_string())
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: true });
        f.render_widget(footer, chunks[self.form.fields.len()]);
    }
}
