//! The paginated character list.
//!
//! The view reads the current page from the enclosing [`PageStateProvider`],
//! issues the `Characters` query for it, and turns the query state into a
//! [`Screen`]. Responses are tagged with the page that requested them and are
//! only applied while that page is still the one on display.
//!
//! [`PageStateProvider`]: charpage_core::PageStateProvider

use std::cell::RefCell;
use std::rc::Rc;

use charpage_core::{
    use_page_state, PageNumber, PageStateAccessor, RuntimeHandle, ScopeError, MAX_PAGES,
};
use charpage_query::{
    CharactersData, CharactersQuery, CharactersVariables, ErrorPolicy, FetchPolicy, GraphqlClient,
    QueryResult, ResultCache,
};

use crate::pagination::PaginationControls;
use crate::query_state::{QueryState, RenderState};
use crate::screen::{CharacterRow, Screen};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListViewOptions {
    pub max_pages: PageNumber,
    pub fetch_policy: FetchPolicy,
    pub error_policy: ErrorPolicy,
}

impl Default for ListViewOptions {
    fn default() -> Self {
        Self {
            max_pages: MAX_PAGES,
            fetch_policy: FetchPolicy::CacheFirst,
            error_policy: ErrorPolicy::All,
        }
    }
}

impl ListViewOptions {
    pub fn with_fetch_policy(mut self, policy: FetchPolicy) -> Self {
        self.fetch_policy = policy;
        self
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }
}

#[derive(Default)]
struct ViewState {
    query: QueryState<CharactersData>,
    observed_page: Option<PageNumber>,
    cache: ResultCache<PageNumber, CharactersData>,
    invalidated: bool,
}

impl ViewState {
    fn apply(&mut self, page: PageNumber, result: QueryResult<CharactersData>) -> bool {
        if let Some(data) = &result.data {
            self.cache.insert(page, data.clone());
        }
        if self.observed_page != Some(page) {
            log::debug!(
                "dropping stale response for page {page}; showing {:?}",
                self.observed_page
            );
            return false;
        }
        log::debug!(
            "applying response for page {page} (data: {}, error: {})",
            result.data.is_some(),
            result.error.is_some()
        );
        self.query.complete(result);
        self.invalidated = true;
        true
    }
}

pub struct CharacterListView {
    runtime: RuntimeHandle,
    client: GraphqlClient,
    options: ListViewOptions,
    state: Rc<RefCell<ViewState>>,
    accessor: Option<PageStateAccessor>,
    screen: Option<Screen>,
}

impl CharacterListView {
    pub fn new(runtime: RuntimeHandle, client: GraphqlClient) -> Self {
        Self::with_options(runtime, client, ListViewOptions::default())
    }

    pub fn with_options(
        runtime: RuntimeHandle,
        client: GraphqlClient,
        options: ListViewOptions,
    ) -> Self {
        Self {
            runtime,
            client,
            options,
            state: Rc::new(RefCell::new(ViewState::default())),
            accessor: None,
            screen: None,
        }
    }

    /// Produce the current screen, issuing a fetch if the provided page
    /// changed since the last render.
    ///
    /// # Errors
    /// Returns [`ScopeError`] when called outside a page-state provider.
    pub fn render(&mut self) -> Result<Screen, ScopeError> {
        let accessor = use_page_state()?;
        let page = accessor.current_page();

        let page_changed = self.state.borrow().observed_page != Some(page);
        if page_changed {
            self.state.borrow_mut().observed_page = Some(page);
            self.issue(page, self.options.fetch_policy);
        }

        self.state.borrow_mut().invalidated = false;
        let screen = self.build_screen(page);
        self.accessor = Some(accessor);
        self.screen = Some(screen.clone());
        Ok(screen)
    }

    fn issue(&self, page: PageNumber, policy: FetchPolicy) {
        {
            let mut state = self.state.borrow_mut();
            if policy == FetchPolicy::CacheFirst {
                if let Some(cached) = state.cache.get(&page) {
                    log::debug!("page {page} served from cache");
                    state.query.restore(page, cached);
                    return;
                }
            }
            state.query.begin(page);
            state.invalidated = true;
        }

        log::debug!("fetching page {page} ({policy:?})");
        let client = self.client.clone();
        let error_policy = self.options.error_policy;
        let state = Rc::clone(&self.state);
        self.runtime.launch_background(
            move || {
                let result =
                    client.execute::<CharactersQuery>(CharactersVariables::new(page), error_policy);
                (page, result)
            },
            move |(page, result)| {
                state.borrow_mut().apply(page, result);
            },
        );
    }

    fn build_screen(&self, page: PageNumber) -> Screen {
        let state = self.state.borrow();
        match state.query.render_state() {
            RenderState::Loading => Screen::Loading,
            RenderState::Error(message) => Screen::Error { message },
            RenderState::Ready => {
                let data = state.query.data.clone().unwrap_or_default();
                let rows = data.results().iter().map(CharacterRow::from).collect();
                let pagination =
                    PaginationControls::derive(page, &data.info(), self.options.max_pages);
                let warning = state.query.error.as_ref().map(ToString::to_string);
                Screen::List {
                    rows,
                    pagination,
                    warning,
                }
            }
        }
    }

    /// Activate the Next control of the last rendered screen.
    /// Returns `false` when the control is disabled.
    pub fn press_next(&self) -> bool {
        let Some(target) = self.last_controls().and_then(|c| c.next_target()) else {
            return false;
        };
        self.navigate(target)
    }

    /// Activate the Previous control of the last rendered screen.
    /// Returns `false` when the control is disabled.
    pub fn press_previous(&self) -> bool {
        let Some(target) = self.last_controls().and_then(|c| c.previous_target()) else {
            return false;
        };
        self.navigate(target)
    }

    /// Activate the retry control, present only on the error screen.
    pub fn retry(&self) -> bool {
        match &self.screen {
            Some(Screen::Error { .. }) => self.refetch(),
            _ => false,
        }
    }

    /// Re-issue the query for the observed page, bypassing the cache.
    pub fn refetch(&self) -> bool {
        let page = self.state.borrow().observed_page;
        match page {
            Some(page) => {
                self.issue(page, FetchPolicy::NetworkOnly);
                true
            }
            None => false,
        }
    }

    fn last_controls(&self) -> Option<PaginationControls> {
        self.screen.as_ref().and_then(Screen::pagination).copied()
    }

    fn navigate(&self, target: PageNumber) -> bool {
        match &self.accessor {
            Some(accessor) => {
                log::debug!("navigating {} -> {target}", accessor.current_page());
                accessor.set_current_page(target);
                true
            }
            None => false,
        }
    }

    /// Returns `true` once after a fetch starts or a response is applied.
    pub fn take_invalidated(&self) -> bool {
        std::mem::take(&mut self.state.borrow_mut().invalidated)
    }

    /// Last screen produced by [`render`](Self::render).
    pub fn screen(&self) -> Option<&Screen> {
        self.screen.as_ref()
    }

    pub fn is_cached(&self, page: PageNumber) -> bool {
        self.state.borrow().cache.contains(&page)
    }
}
