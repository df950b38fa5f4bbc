//! Page controllers.
//!
//! A `ListController` holds one page of server results plus the client-side
//! state layered on top: search term, page-local filter, row selection and
//! cursor. Loads are ticketed; only the newest ticket may apply its result,
//! so a slow response to an old search cannot overwrite a newer one.

use outreach_core::{
    BatchIds, EntityId, Identified, ItemFilter, Page, PageRequest, PaginationState, Selection,
    ValidationResult,
};
use std::fmt::Display;
use std::future::Future;

/// Identifies one load request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub request: PageRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer load was started; the result was discarded.
    Stale,
    /// The fetch failed; previous items are kept.
    Failed,
}

#[derive(Debug, Clone)]
pub struct ListController<T, F> {
    pub items: Vec<T>,
    pub pagination: PaginationState,
    pub search: String,
    pub filter: F,
    pub loading: bool,
    pub selection: Selection,
    cursor: usize,
    page_size: u32,
    generation: u64,
}

impl<T, F: Default> ListController<T, F> {
    pub fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            pagination: PaginationState::new(page_size),
            search: String::new(),
            filter: F::default(),
            loading: false,
            selection: Selection::new(),
            cursor: 0,
            page_size,
            generation: 0,
        }
    }
}

impl<T, F> ListController<T, F> {
    /// Start loading `page`. Any load still in flight becomes stale.
    pub fn begin_load(&mut self, page: u32, search: Option<&str>) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        self.search = search.unwrap_or_default().to_string();
        LoadTicket {
            generation: self.generation,
            request: PageRequest::new(page, self.page_size, search),
        }
    }

    pub fn reload(&mut self) -> LoadTicket {
        let search = self.search.clone();
        self.begin_load(self.pagination.page.max(1), Some(&search))
    }

    /// New search term: back to the first page.
    pub fn search(&mut self, term: &str) -> LoadTicket {
        self.begin_load(1, Some(term))
    }

    pub fn next_page(&mut self) -> Option<LoadTicket> {
        if !self.pagination.has_next() {
            return None;
        }
        let search = self.search.clone();
        Some(self.begin_load(self.pagination.page + 1, Some(&search)))
    }

    pub fn prev_page(&mut self) -> Option<LoadTicket> {
        if !self.pagination.has_prev() {
            return None;
        }
        let search = self.search.clone();
        Some(self.begin_load(self.pagination.page - 1, Some(&search)))
    }

    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_filter(&mut self, filter: F) {
        self.filter = filter;
        self.cursor = 0;
    }
}

impl<T: Identified, F> ListController<T, F> {
    /// Apply the result of `ticket`'s fetch.
    pub fn complete_load<E: Display>(
        &mut self,
        ticket: &LoadTicket,
        result: Result<Page<T>, E>,
    ) -> LoadOutcome {
        if !self.is_current(ticket) {
            tracing::debug!(
                generation = ticket.generation,
                current = self.generation,
                "discarding stale list response"
            );
            return LoadOutcome::Stale;
        }
        self.loading = false;
        match result {
            Ok(page) => {
                self.pagination = page.state();
                self.items = page.items;
                let present: Vec<EntityId> = self.items.iter().map(Identified::id).collect();
                self.selection.retain(&present);
                self.cursor = self.cursor.min(self.items.len().saturating_sub(1));
                LoadOutcome::Applied
            }
            Err(err) => {
                tracing::warn!(page = ticket.request.page, error = %err, "list fetch failed");
                LoadOutcome::Failed
            }
        }
    }

    /// Replace the row with the same id. Returns false when it is not loaded.
    pub fn merge(&mut self, item: T) -> bool {
        match self.items.iter_mut().find(|row| row.id() == item.id()) {
            Some(row) => {
                *row = item;
                true
            }
            None => false,
        }
    }

    /// Ids selected for a batch request.
    pub fn batch_targets(&self) -> ValidationResult<BatchIds> {
        BatchIds::new(self.selection.ids())
    }

    /// After a batch request: clear the selection and reload the current page.
    pub fn after_batch(&mut self) -> LoadTicket {
        self.selection.clear();
        self.reload()
    }
}

impl<T: Identified, F: ItemFilter<T>> ListController<T, F> {
    /// Loaded items passing the page-local filter.
    pub fn visible(&self) -> Vec<&T> {
        self.filter.apply(&self.items)
    }

    pub fn visible_ids(&self) -> Vec<EntityId> {
        self.visible().iter().map(|item| item.id()).collect()
    }

    pub fn selected(&self) -> Option<&T> {
        self.visible().get(self.cursor).copied()
    }

    pub fn selected_id(&self) -> Option<EntityId> {
        self.selected().map(Identified::id)
    }

    pub fn move_down(&mut self) {
        let len = self.visible().len();
        self.cursor = if len == 0 { 0 } else { (self.cursor + 1) % len };
    }

    pub fn move_up(&mut self) {
        let len = self.visible().len();
        self.cursor = match (len, self.cursor) {
            (0, _) => 0,
            (_, 0) => len - 1,
            (_, c) => (c - 1).min(len - 1),
        };
    }

    /// Toggle the row under the cursor.
    pub fn toggle_row(&mut self) -> Option<bool> {
        let id = self.selected_id()?;
        Some(self.selection.toggle(id))
    }

    /// Select every visible row, or clear when all are already selected.
    pub fn toggle_select_all(&mut self) {
        let ids = self.visible_ids();
        self.selection.toggle_all(&ids);
    }
}

/// Begin, fetch and complete in one step.
pub async fn run_load<T, F, E, Fut>(
    controller: &mut ListController<T, F>,
    page: u32,
    search: Option<&str>,
    fetch: impl FnOnce(PageRequest) -> Fut,
) -> LoadOutcome
where
    T: Identified,
    E: Display,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    let ticket = controller.begin_load(page, search);
    let result = fetch(ticket.request.clone()).await;
    controller.complete_load(&ticket, result)
}

// ============================================================================
// SINGLE RESOURCES
// ============================================================================

/// One fetched value (stats, settings, analytics) with the same ticketing.
#[derive(Debug, Clone)]
pub struct Resource<T> {
    pub data: Option<T>,
    pub loading: bool,
    generation: u64,
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            generation: 0,
        }
    }
}

impl<T> Resource<T> {
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.generation
    }

    pub fn complete<E: Display>(&mut self, generation: u64, result: Result<T, E>) -> LoadOutcome {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "discarding stale response");
            return LoadOutcome::Stale;
        }
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                LoadOutcome::Applied
            }
            Err(err) => {
                tracing::warn!(error = %err, "fetch failed");
                LoadOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outreach_core::{CompanyFilter, Company};
    use outreach_test_utils::fixtures;

    type Companies = ListController<Company, CompanyFilter>;

    fn loaded(ids: &[EntityId]) -> Companies {
        let mut controller = Companies::new(20);
        let ticket = controller.begin_load(1, None);
        let rows = ids
            .iter()
            .map(|id| fixtures::company(*id, "Technology", "USA"))
            .collect();
        let page = fixtures::page_of(rows, 1, 20, ids.len() as u64);
        assert_eq!(
            controller.complete_load(&ticket, Ok::<_, String>(page)),
            LoadOutcome::Applied
        );
        controller
    }

    #[test]
    fn test_failed_load_keeps_items_and_clears_loading() {
        let mut controller = loaded(&[1, 2, 3]);
        let ticket = controller.reload();
        assert!(controller.loading);

        let outcome = controller.complete_load(&ticket, Err::<Page<Company>, _>("connection refused"));
        assert_eq!(outcome, LoadOutcome::Failed);
        assert!(!controller.loading);
        assert_eq!(controller.items.len(), 3);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut controller = loaded(&[1]);
        let old = controller.search("ac");
        let new = controller.search("acme");

        let stale = fixtures::page_of(vec![fixtures::company(9, "Retail", "UK")], 1, 20, 1);
        assert_eq!(controller.complete_load(&old, Ok::<_, String>(stale)), LoadOutcome::Stale);
        assert!(controller.loading);
        assert_eq!(controller.items[0].id, 1);

        let fresh = fixtures::page_of(vec![fixtures::company(2, "Retail", "UK")], 1, 20, 1);
        assert_eq!(controller.complete_load(&new, Ok::<_, String>(fresh)), LoadOutcome::Applied);
        assert_eq!(controller.items[0].id, 2);
        assert_eq!(controller.search, "acme");
    }

    #[test]
    fn test_search_resets_to_first_page() {
        let mut controller = loaded(&[1]);
        controller.pagination.page = 3;
        let ticket = controller.search("acme");
        assert_eq!(ticket.request.page, 1);
        assert_eq!(ticket.request.search.as_deref(), Some("acme"));
    }

    #[test]
    fn test_select_all_and_batch_reload() {
        let mut controller = loaded(&[1, 2, 3]);
        controller.toggle_select_all();
        assert_eq!(controller.batch_targets().unwrap().ids, vec![1, 2, 3]);

        let ticket = controller.after_batch();
        assert!(controller.selection.is_empty());
        assert_eq!(ticket.request.page, 1);
        assert!(controller.batch_targets().is_err());
    }

    #[test]
    fn test_select_all_covers_visible_rows_only() {
        let mut controller = Companies::new(20);
        let ticket = controller.begin_load(1, None);
        let rows = vec![
            fixtures::company(1, "Retail", "UK"),
            fixtures::company(2, "Finance", "UK"),
            fixtures::company(3, "Retail", "USA"),
        ];
        controller.complete_load(&ticket, Ok::<_, String>(fixtures::page_of(rows, 1, 20, 3)));
        controller.set_filter(CompanyFilter::default().industry("Retail"));

        controller.toggle_select_all();
        assert_eq!(controller.selection.ids(), vec![1, 3]);
    }

    #[test]
    fn test_merge_replaces_row_by_id() {
        let mut controller = loaded(&[1, 2]);
        let mut updated = fixtures::company(2, "Retail", "UK");
        updated.name = "Renamed".to_string();
        assert!(controller.merge(updated));
        assert_eq!(controller.items[1].name, "Renamed");
        assert!(!controller.merge(fixtures::company(7, "Retail", "UK")));
    }

    #[test]
    fn test_cursor_wraps() {
        let mut controller = loaded(&[1, 2, 3]);
        controller.move_up();
        assert_eq!(controller.selected_id(), Some(3));
        controller.move_down();
        assert_eq!(controller.selected_id(), Some(1));
    }

    #[test]
    fn test_paging_respects_bounds() {
        let mut controller = loaded(&[1]);
        assert!(controller.prev_page().is_none());
        assert!(controller.next_page().is_none());

        controller.pagination.total_pages = 4;
        controller.pagination.page = 2;
        assert_eq!(controller.next_page().map(|t| t.request.page), Some(3));
    }

    #[test]
    fn test_resource_tickets() {
        let mut resource: Resource<u32> = Resource::default();
        let first = resource.begin();
        let second = resource.begin();
        assert_eq!(resource.complete(first, Ok::<_, String>(1)), LoadOutcome::Stale);
        assert_eq!(resource.complete(second, Ok::<_, String>(2)), LoadOutcome::Applied);
        assert_eq!(resource.data, Some(2));
        assert!(!resource.loading);
    }
}
