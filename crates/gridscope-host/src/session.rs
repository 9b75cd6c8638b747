//! Explorer session state.
//!
//! The session owns what a table explorer UI holds between keystrokes: the
//! fetched snapshot, the active filter rows, the active query and the pager.
//! Results are recomputed from the full snapshot on every read.

use gridscope_seeker::{Field, FilterCondition, Pagination, ProcessResult, Record, Seeker};

use crate::snapshot::TableSnapshot;

/// Page size a fresh session starts with.
pub const SESSION_PAGE_SIZE: usize = 50;

#[derive(Debug, Clone)]
pub struct ExplorerSession {
    snapshot: TableSnapshot,
    filters: Vec<FilterCondition>,
    query: String,
    pagination: Pagination,
    seeker: Seeker,
}

impl ExplorerSession {
    pub fn new(snapshot: TableSnapshot, seeker: Seeker) -> Self {
        ExplorerSession {
            snapshot,
            filters: Vec::new(),
            query: String::new(),
            pagination: Pagination::new(SESSION_PAGE_SIZE),
            seeker,
        }
    }

    pub fn snapshot(&self) -> &TableSnapshot {
        &self.snapshot
    }

    pub fn fields(&self) -> &[Field] {
        &self.snapshot.fields
    }

    pub fn filters(&self) -> &[FilterCondition] {
        &self.filters
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn seeker(&self) -> &Seeker {
        &self.seeker
    }

    /// Swaps in a fresh fetch, keeping filters, query and page.
    pub fn replace_snapshot(&mut self, snapshot: TableSnapshot) {
        self.snapshot = snapshot;
    }

    /// Replaces the active filter rows and returns to page 1.
    pub fn apply_filters(&mut self, filters: Vec<FilterCondition>) {
        log::debug!("applying {} filter(s)", filters.len());
        self.filters = filters;
        self.pagination.set_page(1);
    }

    pub fn clear_filters(&mut self) {
        self.apply_filters(Vec::new());
    }

    /// Replaces the query and returns to page 1.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.pagination.set_page(1);
    }

    pub fn set_page(&mut self, page: usize) {
        self.pagination.set_page(page);
    }

    /// Changes the page size and returns to page 1.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.pagination.set_page_size(page_size);
    }

    /// Filter-then-search over the whole snapshot.
    pub fn results(&self) -> ProcessResult<'_> {
        self.seeker.process(
            &self.snapshot.records,
            &self.filters,
            &self.query,
            &self.snapshot.fields,
        )
    }

    /// The current page of [`ExplorerSession::results`].
    pub fn page(&self) -> Vec<&Record> {
        let results = self.results();
        self.pagination.slice(&results.records).to_vec()
    }

    pub fn page_count(&self) -> usize {
        self.pagination.page_count(self.results().count)
    }

    /// Result line shown while a search or filter is active.
    ///
    /// `None` when neither is active.
    pub fn summary(&self) -> Option<String> {
        let searching = !self.query.trim().is_empty();
        if !searching && self.filters.is_empty() {
            return None;
        }

        let mut line = format!("{} records found", self.results().count);
        if searching {
            line.push_str(&format!(" (search: \"{}\")", self.query.trim()));
        }
        if !self.filters.is_empty() {
            line.push_str(&format!(" (filters: {})", self.filters.len()));
        }
        Some(line)
    }
}
