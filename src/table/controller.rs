//! Table controller
//!
//! Owns the four persisted table fields (search term, sort, current page,
//! page size) over a fixed record set. Every action writes through to
//! storage, re-runs the pipeline and notifies subscribers.

use std::rc::Rc;

use super::pipeline::{ordered_indices, paginate, total_pages};
use super::{PageSummary, SortConfig, SortIndicator, SortKey, TablePage, next_sort};
use crate::consts::*;
use crate::model::Comment;
use crate::persistence::PersistentValue;
use crate::platform::storage::KeyValueStore;

type Listener = Box<dyn FnMut(&TablePage<'_>)>;

pub struct TableController {
    records: Vec<Comment>,
    search_term: PersistentValue<String>,
    sort_config: PersistentValue<Option<SortConfig>>,
    current_page: PersistentValue<usize>,
    page_size: PersistentValue<usize>,
    /// Indices into `records`, filtered and sorted
    ordered: Vec<usize>,
    listeners: Vec<Listener>,
}

impl TableController {
    /// Create with default state. Call `rehydrate` to restore persisted state.
    pub fn new(records: Vec<Comment>, store: Rc<dyn KeyValueStore>) -> Self {
        let mut controller = Self {
            records,
            search_term: PersistentValue::new(SEARCH_TERM_KEY, String::new(), store.clone()),
            sort_config: PersistentValue::new(SORT_CONFIG_KEY, None, store.clone()),
            current_page: PersistentValue::new(CURRENT_PAGE_KEY, 1, store.clone()),
            page_size: PersistentValue::new(PAGE_SIZE_KEY, DEFAULT_PAGE_SIZE, store),
            ordered: Vec::new(),
            listeners: Vec::new(),
        };
        controller.recompute();
        controller
    }

    /// Load all four fields from storage, each on its own. A stored page
    /// beyond the last page is clamped.
    pub fn rehydrate(&mut self) {
        self.search_term.hydrate();
        self.sort_config.hydrate();
        self.page_size.hydrate();
        self.current_page.hydrate();
        if *self.page_size.get() == 0 {
            log::warn!("Stored page size is 0, resetting to {}", DEFAULT_PAGE_SIZE);
            self.page_size.set(DEFAULT_PAGE_SIZE);
        }
        log::info!(
            "Restored table state: search {:?}, sort {:?}, page {}, size {}",
            self.search_term.get(),
            self.sort_config.get(),
            self.current_page.get(),
            self.page_size.get()
        );
        self.refresh();
    }

    /// Register a view callback, invoked after every state change
    pub fn subscribe(&mut self, listener: impl FnMut(&TablePage<'_>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // === Actions ===

    /// Set the search term and go back to the first page
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term.set(term.into());
        self.current_page.set(1);
        self.refresh();
    }

    /// Cycle the sort on `key`: ascending → descending → off
    pub fn toggle_sort(&mut self, key: SortKey) {
        let next = next_sort(*self.sort_config.get(), key);
        self.sort_config.set(next);
        self.refresh();
    }

    /// Jump to `page`; out-of-range values are clamped
    pub fn set_page(&mut self, page: usize) {
        self.current_page.set(page);
        self.refresh();
    }

    pub fn next_page(&mut self) {
        let page = self.current_page();
        if page < self.total_pages() {
            self.set_page(page + 1);
        }
    }

    pub fn previous_page(&mut self) {
        let page = self.current_page();
        if page > 1 {
            self.set_page(page - 1);
        }
    }

    /// Set rows per page (at least 1) and go back to the first page
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size.set(page_size.max(1));
        self.current_page.set(1);
        self.refresh();
    }

    // === Outputs ===

    pub fn search_term(&self) -> &str {
        self.search_term.get()
    }

    pub fn sort_config(&self) -> Option<SortConfig> {
        *self.sort_config.get()
    }

    pub fn sort_indicator(&self, key: SortKey) -> SortIndicator {
        SortIndicator::for_column(self.sort_config(), key)
    }

    pub fn current_page(&self) -> usize {
        *self.current_page.get()
    }

    pub fn page_size(&self) -> usize {
        (*self.page_size.get()).max(1)
    }

    pub fn filtered_count(&self) -> usize {
        self.ordered.len()
    }

    /// Never below 1, even with no results
    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered_count(), self.page_size())
    }

    /// Filtered and sorted rows across all pages
    pub fn sorted_rows(&self) -> Vec<&Comment> {
        self.ordered.iter().map(|&i| &self.records[i]).collect()
    }

    /// The visible page with its footer data
    pub fn page(&self) -> TablePage<'_> {
        let sorted = self.sorted_rows();
        let rows = paginate(&sorted, self.current_page(), self.page_size()).to_vec();
        let summary = PageSummary {
            current_page: self.current_page(),
            total_pages: self.total_pages(),
            page_size: self.page_size(),
            filtered_count: self.filtered_count(),
            visible_count: rows.len(),
        };
        TablePage {
            rows,
            summary,
            sort: self.sort_config(),
            search_term: self.search_term(),
        }
    }

    // === Internals ===

    fn recompute(&mut self) {
        self.ordered = ordered_indices(
            &self.records,
            self.search_term.get(),
            *self.sort_config.get(),
        );
    }

    /// Keep the current page inside `[1, total_pages]`
    fn clamp_page(&mut self) {
        let page = self.current_page();
        let clamped = page.clamp(1, self.total_pages());
        if clamped != page {
            log::debug!("Clamping page {} to {}", page, clamped);
            self.current_page.set(clamped);
        }
    }

    fn refresh(&mut self) {
        self.recompute();
        self.clamp_page();
        self.notify();
    }

    fn notify(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let mut listeners = std::mem::take(&mut self.listeners);
        {
            let page = self.page();
            for listener in listeners.iter_mut() {
                listener(&page);
            }
        }
        self.listeners = listeners;
    }
}

impl std::fmt::Debug for TableController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableController")
            .field("records", &self.records.len())
            .field("search_term", &self.search_term.get())
            .field("sort_config", &self.sort_config.get())
            .field("current_page", &self.current_page.get())
            .field("page_size", &self.page_size.get())
            .field("filtered", &self.ordered.len())
            .finish()
    }
}
