//! Draw every page into an in-memory terminal.

mod common;

use common::{FakeBackend, Harness};
use crossterm::event::KeyCode;
use outreach_core::{AutomationStatus, ChartPoint, MessageStatus};
use outreach_test_utils::fixtures;
use outreach_tui::nav::View;
use outreach_tui::state::ProductTab;
use outreach_tui::views::render_view;
use ratatui::{backend::TestBackend, Terminal};

const WIDTH: u16 = 120;
const HEIGHT: u16 = 40;

fn draw(harness: &Harness) -> String {
    let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
    terminal.draw(|f| render_view(f, &harness.app)).unwrap();
    let buffer = terminal.backend().buffer();
    buffer
        .content
        .chunks(usize::from(buffer.area.width))
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn populated_backend() -> FakeBackend {
    let backend = FakeBackend::with_companies(45);
    backend.set(|state| {
        state.messages = vec![
            fixtures::message(1, 1, MessageStatus::Sent),
            fixtures::message(2, 2, MessageStatus::Failed),
        ];
        state.automations = vec![fixtures::automation_config(1, AutomationStatus::Running)];
        state.chart = vec![ChartPoint {
            name: "Mon".to_string(),
            date: "2024-05-06".to_string(),
            sent: 3,
            replies: 1,
        }];
        state.products = vec![fixtures::product(1, "Ledger")];
        state.product_campaigns = vec![(1, fixtures::campaign(7, "Finance", Vec::new()))];
    });
    backend
}

/// Text only drawn once a page has data, keyed by page.
fn loaded_marker(view: View) -> Option<&'static str> {
    match view {
        View::Dashboard => Some("Last 7 days"),
        View::Companies => Some("Company 12"),
        View::Messages => Some("Company 2"),
        View::Automation => Some("Automation 1"),
        View::Products => Some("Ledger"),
        View::Analytics => Some("Top industries"),
        _ => None,
    }
}

#[tokio::test]
async fn test_every_view_draws_while_loading() {
    let mut harness = Harness::new(FakeBackend::default());
    for view in View::all() {
        harness.app.open(*view);
        let screen = draw(&harness);
        assert!(screen.contains("OUTREACH"), "{:?} lost its header", view);
        assert!(screen.contains(view.title()), "{:?} tab missing", view);
    }

    harness.app.open(View::Analytics);
    assert!(draw(&harness).contains("Loading..."));
    harness.settle().await;
}

#[tokio::test]
async fn test_every_view_draws_after_failed_loads() {
    let backend = FakeBackend::default();
    backend.set(|state| state.fail_reads = true);
    let mut harness = Harness::new(backend);

    for view in View::all() {
        harness.app.open(*view);
        harness.settle().await;
        let screen = draw(&harness);
        assert!(screen.contains("OUTREACH"), "{:?} lost its header", view);
        if let Some(marker) = loaded_marker(*view) {
            assert!(!screen.contains(marker), "{:?} drew data it never loaded", view);
        }
    }
}

#[tokio::test]
async fn test_every_view_draws_loaded_data() {
    let mut harness = Harness::new(populated_backend());

    for view in View::all() {
        harness.app.open(*view);
        harness.settle().await;
        let screen = draw(&harness);
        if let Some(marker) = loaded_marker(*view) {
            assert!(screen.contains(marker), "{:?} is missing '{}'", view, marker);
        }
    }

    harness.app.open(View::Analytics);
    harness.settle().await;
    assert!(draw(&harness).contains("Daily activity, last 30 days"));
}

#[tokio::test]
async fn test_company_pager_shows_page_window() {
    let mut harness = Harness::new(populated_backend());
    harness.app.open(View::Companies);
    harness.settle().await;
    assert!(draw(&harness).contains("< [1] 2 3 >   Showing 1-20 of 45"));

    harness.press(KeyCode::Char(']'));
    harness.settle().await;
    let screen = draw(&harness);
    assert!(screen.contains("< 1 [2] 3 >   Showing 21-40 of 45"));
    assert!(screen.contains("Company 21"));
}

#[tokio::test]
async fn test_focused_product_tabs_draw() {
    let mut harness = Harness::new(populated_backend());
    harness.app.open(View::Products);
    harness.settle().await;
    assert!(draw(&harness).contains("Select a product and press Enter."));

    harness.press(KeyCode::Enter);
    harness.settle().await;
    let expected = [
        (ProductTab::Companies, "Matched companies (0)"),
        (ProductTab::Campaigns, "Campaign 7"),
        (ProductTab::Leads, "Qualified leads (0)"),
        (ProductTab::Analytics, "Fetched (40)"),
    ];
    for (tab, marker) in expected {
        assert_eq!(harness.app.products.tab, tab);
        let screen = draw(&harness);
        assert!(screen.contains(marker), "{:?} tab is missing '{}'", tab, marker);
        harness.press(KeyCode::Char('l'));
    }
}

#[tokio::test]
async fn test_wizard_review_overlay_draws() {
    let mut harness = Harness::new(populated_backend());
    harness.app.open(View::Automation);
    harness.settle().await;

    harness.press(KeyCode::Char('n'));
    assert!(draw(&harness).contains("New automation, step 1 of 3: Target"));
    harness.press(KeyCode::Tab);
    harness.type_text("Retail");
    harness.press(KeyCode::Tab);
    harness.type_text("UK");
    harness.press(KeyCode::Enter);
    harness.press(KeyCode::Enter);

    let screen = draw(&harness);
    assert!(screen.contains("New automation, step 3 of 3: Review"));
    assert!(screen.contains("Retail / UK"));
    assert!(screen.contains("Enter save  Esc back"));

    harness.press(KeyCode::Enter);
    assert!(draw(&harness).contains("Saving..."));
    harness.settle().await;
    assert!(!draw(&harness).contains("step 3 of 3"));
}
