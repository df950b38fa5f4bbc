//! Products page: catalogue on the left, focused product on the right.

use crate::nav::View;
use crate::state::{App, ProductTab};
use crate::theme::{intent_color, rate_color};
use crate::views::helpers::{
    filter_summary, list_layout, render_chips, render_pager, render_search_bar, timestamp,
    two_columns, yes_no,
};
use crate::widgets::{Column, DataTable, FilterOption, RateGauge, StatCard};
use outreach_core::{Campaign, Product, ProductCompany, QualifiedLead};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let (left, right) = two_columns(area, 45);
    render_catalogue(f, app, left);
    render_focus(f, app, right);
}

fn render_catalogue(f: &mut Frame<'_>, app: &App, area: Rect) {
    let products = &app.products;
    let theme = &app.theme;
    let (bar, body, pager) = list_layout(area, true);
    let scope = if products.active_only { "active only" } else { "" };
    render_search_bar(
        f,
        app,
        bar,
        View::Products,
        filter_summary(&products.list.search, scope),
    );

    let focused = products.focused;
    let columns: Vec<Column<'_, Product>> = vec![
        Column::styled("Name", Constraint::Percentage(34), move |p: &Product| {
            let color = if Some(p.id) == focused { theme.primary } else { theme.text };
            (p.name.clone(), Style::default().fg(color))
        }),
        Column::text("Tags", Constraint::Percentage(30), |p: &Product| p.tags_label()),
        Column::text("Active", Constraint::Percentage(12), |p: &Product| {
            yes_no(p.is_active).to_string()
        }),
        Column::text("Leads", Constraint::Percentage(12), |p: &Product| {
            p.qualified_leads_count.to_string()
        }),
        Column::text("Sent", Constraint::Percentage(12), |p: &Product| {
            p.messages_sent.to_string()
        }),
    ];
    let list = &products.list;
    DataTable::new("Products", list.visible(), theme)
        .columns(columns)
        .loading(list.loading)
        .cursor(list.cursor())
        .empty_message("No products. Press n to add one.")
        .render(f, body);
    render_pager(f, app, pager, &list.pagination);
}

fn render_focus(f: &mut Frame<'_>, app: &App, area: Rect) {
    let products = &app.products;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let chips = FilterOption::tabs(
        ProductTab::all().iter().map(ProductTab::title),
        products.tab.title(),
    );
    let trailer = match (products.tab, products.leads.filter.intent) {
        (ProductTab::Leads, Some(intent)) => Some(format!("intent={}", intent)),
        _ => None,
    };
    let title = products
        .focused_product()
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "No product".to_string());
    render_chips(f, app, chunks[0], &title, &chips, trailer);

    if products.focused.is_none() {
        let hint = Paragraph::new("Select a product and press Enter.")
            .style(Style::default().fg(app.theme.text_dim))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(hint, chunks[1]);
        return;
    }

    match products.tab {
        ProductTab::Companies => render_companies(f, app, chunks[1]),
        ProductTab::Campaigns => render_campaigns(f, app, chunks[1]),
        ProductTab::Leads => render_leads(f, app, chunks[1]),
        ProductTab::Analytics => render_analytics(f, app, chunks[1]),
    }
}

fn render_companies(f: &mut Frame<'_>, app: &App, area: Rect) {
    let list = &app.products.companies;
    let columns: Vec<Column<'_, ProductCompany>> = vec![
        Column::text("Company", Constraint::Percentage(40), |c: &ProductCompany| {
            c.company
                .as_ref()
                .map(|company| company.name.clone())
                .unwrap_or_else(|| format!("Company #{}", c.company_id))
        }),
        Column::text("Score", Constraint::Percentage(15), |c: &ProductCompany| {
            format!("{:.2}", c.relevance_score)
        }),
        Column::text("Fetched", Constraint::Percentage(45), |c: &ProductCompany| {
            timestamp(&c.fetched_at)
        }),
    ];
    DataTable::new(
        format!("Matched companies ({})", list.pagination.total),
        list.visible(),
        &app.theme,
    )
    .columns(columns)
    .loading(list.loading)
    .focused(false)
    .empty_message("No companies yet. Press S to fetch clients.")
    .render(f, area);
}

fn render_campaigns(f: &mut Frame<'_>, app: &App, area: Rect) {
    let list = &app.products.campaigns;
    let columns: Vec<Column<'_, Campaign>> = vec![
        Column::text("Name", Constraint::Percentage(36), |c: &Campaign| c.name.clone()),
        Column::text("Industry", Constraint::Percentage(20), |c: &Campaign| c.industry.clone()),
        Column::text("Sent", Constraint::Percentage(14), |c: &Campaign| {
            format!("{}/{}", c.sent_count(), c.messages.len())
        }),
        Column::text("Created", Constraint::Percentage(30), |c: &Campaign| {
            timestamp(&c.created_at)
        }),
    ];
    DataTable::new(
        format!("Campaigns ({})", list.pagination.total),
        list.visible(),
        &app.theme,
    )
    .columns(columns)
    .loading(list.loading)
    .focused(false)
    .empty_message("No campaigns yet. Press n to generate one.")
    .render(f, area);
}

fn render_leads(f: &mut Frame<'_>, app: &App, area: Rect) {
    let list = &app.products.leads;
    let theme = &app.theme;
    let columns: Vec<Column<'_, QualifiedLead>> = vec![
        Column::text("Company", Constraint::Percentage(34), |l: &QualifiedLead| {
            l.company
                .as_ref()
                .map(|company| company.name.clone())
                .unwrap_or_else(|| format!("Company #{}", l.company_id))
        }),
        Column::styled("Intent", Constraint::Percentage(16), move |l: &QualifiedLead| {
            (l.intent.to_string(), Style::default().fg(intent_color(l.intent, theme)))
        }),
        Column::text("Confidence", Constraint::Percentage(14), |l: &QualifiedLead| {
            format!("{:.0}%", l.intent_confidence * 100.0)
        }),
        Column::text("Status", Constraint::Percentage(14), |l: &QualifiedLead| l.status.clone()),
        Column::text("Created", Constraint::Percentage(22), |l: &QualifiedLead| {
            timestamp(&l.created_at)
        }),
    ];
    DataTable::new(
        format!("Qualified leads ({})", list.pagination.total),
        list.visible(),
        theme,
    )
    .columns(columns)
    .loading(list.loading)
    .focused(false)
    .empty_message("No qualified leads for this product")
    .render(f, area);
}

fn render_analytics(f: &mut Frame<'_>, app: &App, area: Rect) {
    let resource = &app.products.analytics;
    let theme = &app.theme;
    let Some(data) = resource.data.as_ref() else {
        crate::views::helpers::render_placeholder(f, app, area, "Analytics", resource.loading);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(area);
    let cards = [
        StatCard::new("Fetched", data.companies_fetched, Style::default().fg(theme.primary)),
        StatCard::new("Sent", data.messages_sent, Style::default().fg(theme.primary)),
        StatCard::new("Replies", data.replies_received, Style::default().fg(theme.success)),
        StatCard::new(
            "Hot / warm / cold",
            format!("{} / {} / {}", data.hot_leads, data.warm_leads, data.cold_leads),
            Style::default().fg(theme.secondary),
        ),
    ];
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(chunks[0]);
    for (card, cell) in cards.iter().zip(cells.iter()) {
        card.render(f, *cell);
    }

    let stages = data.funnel.stages();
    let top = stages[0].1.max(1) as f64;
    let mut constraints = vec![Constraint::Length(3); stages.len()];
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(chunks[1]);
    for (index, (label, value)) in stages.iter().enumerate() {
        let percent = *value as f64 / top * 100.0;
        RateGauge {
            title: format!("{} ({})", label, value),
            percent,
            style: Style::default().fg(rate_color(percent, theme)),
        }
        .render(f, rows[index]);
    }
    let footer = Paragraph::new(format!(
        "Conversion {:.1}%  Unsubscribes {}  Brochure downloads {}",
        data.conversion_rate, data.unsubscribes, data.brochure_downloads
    ))
    .wrap(Wrap { trim: true })
    .style(Style::default().fg(theme.text_dim));
    f.render_widget(footer, rows[stages.len()]);
}
