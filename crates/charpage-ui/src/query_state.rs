//! Per-fetch query state and its render classification.

use charpage_core::PageNumber;
use charpage_query::{QueryError, QueryResult};

/// Which of the three mutually exclusive screens to show.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderState {
    /// First load, nothing to show yet.
    Loading,
    /// Failed with no data at all.
    Error(String),
    /// Data present; an error may coexist.
    Ready,
}

/// State of the query backing the list view.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub loading: bool,
    pub data: Option<T>,
    pub error: Option<QueryError>,
    /// Page the current `data`/`error` belong to.
    pub page: Option<PageNumber>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            loading: false,
            data: None,
            error: None,
            page: None,
        }
    }
}

impl<T> QueryState<T> {
    /// Start fetching `page`. Data from a different page is dropped; data for
    /// the same page is kept so a refetch never blanks the screen.
    pub fn begin(&mut self, page: PageNumber) {
        if self.page != Some(page) {
            self.data = None;
            self.error = None;
            self.page = Some(page);
        }
        self.loading = true;
    }

    /// Show a cached result for `page` without a fetch.
    pub fn restore(&mut self, page: PageNumber, data: T) {
        self.page = Some(page);
        self.data = Some(data);
        self.error = None;
        self.loading = false;
    }

    /// Fold a completed fetch into the state. A response without data keeps
    /// whatever data was already shown for this page.
    pub fn complete(&mut self, result: QueryResult<T>) {
        self.loading = false;
        self.error = result.error;
        if let Some(data) = result.data {
            self.data = Some(data);
        }
    }

    pub fn render_state(&self) -> RenderState {
        if self.loading && self.data.is_none() {
            return RenderState::Loading;
        }
        if self.data.is_none() {
            if let Some(error) = &self.error {
                return RenderState::Error(error.to_string());
            }
        }
        RenderState::Ready
    }
}
