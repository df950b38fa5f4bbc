//! Generic data table.
//!
//! Columns are declared once per page with a label, a width and a cell
//! renderer. Selection checkboxes are opt-in; while a fetch is running with
//! nothing to show yet, a placeholder replaces the rows.

use crate::theme::SynthBruteTheme;
use outreach_core::{Identified, Selection};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

type CellRenderer<'a, T> = Box<dyn Fn(&T) -> Cell<'static> + 'a>;

pub struct Column<'a, T> {
    pub label: &'static str,
    pub width: Constraint,
    render: CellRenderer<'a, T>,
}

impl<'a, T> Column<'a, T> {
    /// Column with a custom cell renderer.
    pub fn new(
        label: &'static str,
        width: Constraint,
        render: impl Fn(&T) -> Cell<'static> + 'a,
    ) -> Self {
        Self {
            label,
            width,
            render: Box::new(render),
        }
    }

    /// Plain text column.
    pub fn text(label: &'static str, width: Constraint, value: impl Fn(&T) -> String + 'a) -> Self {
        Self::new(label, width, move |item| Cell::from(value(item)))
    }

    /// Text column coloured per row.
    pub fn styled(
        label: &'static str,
        width: Constraint,
        value: impl Fn(&T) -> (String, Style) + 'a,
    ) -> Self {
        Self::new(label, width, move |item| {
            let (text, style) = value(item);
            Cell::from(Span::styled(text, style))
        })
    }
}

pub struct DataTable<'a, T> {
    pub title: String,
    pub columns: Vec<Column<'a, T>>,
    pub rows: Vec<&'a T>,
    pub loading: bool,
    pub cursor: Option<usize>,
    /// Shows a checkbox column when set.
    pub selection: Option<&'a Selection>,
    pub empty_message: &'a str,
    pub focused: bool,
    pub theme: &'a SynthBruteTheme,
}

impl<'a, T: Identified> DataTable<'a, T> {
    pub fn new(title: impl Into<String>, rows: Vec<&'a T>, theme: &'a SynthBruteTheme) -> Self {
        Self {
            title: title.into(),
            columns: Vec::new(),
            rows,
            loading: false,
            cursor: None,
            selection: None,
            empty_message: "No records",
            focused: true,
            theme,
        }
    }

    pub fn columns(mut self, columns: Vec<Column<'a, T>>) -> Self {
        self.columns = columns;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn cursor(mut self, cursor: usize) -> Self {
        self.cursor = Some(cursor);
        self
    }

    pub fn selectable(mut self, selection: &'a Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn empty_message(mut self, message: &'a str) -> Self {
        self.empty_message = message;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn block(&self) -> Block<'static> {
        let mut title = self.title.clone();
        if self.loading {
            title.push_str(" (loading)");
        }
        if let Some(selection) = self.selection.filter(|s| !s.is_empty()) {
            title.push_str(&format!(" [{} selected]", selection.len()));
        }
        let border = if self.focused {
            self.theme.border_focus
        } else {
            self.theme.border
        };
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        if self.rows.is_empty() {
            let message = if self.loading { "Loading..." } else { self.empty_message };
            let placeholder = Paragraph::new(message)
                .style(Style::default().fg(self.theme.text_dim))
                .block(self.block());
            f.render_widget(placeholder, area);
            return;
        }

        let mut widths = Vec::with_capacity(self.columns.len() + 1);
        let mut header = Vec::with_capacity(self.columns.len() + 1);
        if self.selection.is_some() {
            widths.push(Constraint::Length(3));
            header.push(Cell::from(""));
        }
        for column in &self.columns {
            widths.push(column.width);
            header.push(Cell::from(column.label));
        }

        let rows: Vec<Row> = self
            .rows
            .iter()
            .map(|item| {
                let mut cells = Vec::with_capacity(widths.len());
                if let Some(selection) = self.selection {
                    let mark = if selection.contains(item.id()) { "[x]" } else { "[ ]" };
                    cells.push(Cell::from(mark));
                }
                cells.extend(self.columns.iter().map(|column| (column.render)(item)));
                Row::new(cells)
            })
            .collect();

        let table = Table::new(rows, widths)
            .header(
                Row::new(header).style(
                    Style::default()
                        .fg(self.theme.secondary)
                        .add_modifier(Modifier::BOLD),
                ),
            )
            .block(self.block())
            .highlight_style(
                Style::default()
                    .fg(self.theme.primary)
                    .bg(self.theme.bg_highlight),
            )
            .highlight_symbol("> ");

        let mut state = TableState::default();
        if self.focused {
            state.select(self.cursor.map(|c| c.min(self.rows.len() - 1)));
        }
        f.render_stateful_widget(table, area, &mut state);
    }
}
