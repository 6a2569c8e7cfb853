use std::sync::Arc;

use charpage_core::{PageNumber, PageState, PageStateProvider, Runtime, FIRST_PAGE};
use charpage_query::GraphqlClient;
use charpage_ui::{CharacterListView, ListViewOptions, Screen};

use crate::executor::ManualExecutor;
use crate::transport::ScriptedTransport;

/// Headless harness for exercising the list view in tests.
///
/// `ListTestRule` wires a page state, its provider, and a list view to a
/// scripted transport. Background fetches are parked on a [`ManualExecutor`]
/// so tests decide when, and in which order, responses arrive.
pub struct ListTestRule {
    runtime: Runtime,
    executor: ManualExecutor,
    transport: ScriptedTransport,
    page_state: PageState,
    provider: PageStateProvider,
    view: CharacterListView,
    screen: Option<Screen>,
}

impl ListTestRule {
    pub fn new() -> Self {
        Self::with_options(FIRST_PAGE, ListViewOptions::default())
    }

    pub fn with_initial_page(page: PageNumber) -> Self {
        Self::with_options(page, ListViewOptions::default())
    }

    pub fn with_options(initial_page: PageNumber, options: ListViewOptions) -> Self {
        let executor = ManualExecutor::new();
        let runtime = Runtime::with_executor(Arc::new(executor.clone()));
        let transport = ScriptedTransport::new();
        let client = GraphqlClient::new(Arc::new(transport.clone()));
        let page_state = PageState::new(initial_page);
        let provider = PageStateProvider::new(page_state.clone());
        let view = CharacterListView::with_options(runtime.handle(), client, options);
        Self {
            runtime,
            executor,
            transport,
            page_state,
            provider,
            view,
            screen: None,
        }
    }

    pub fn transport(&self) -> &ScriptedTransport {
        &self.transport
    }

    pub fn executor(&self) -> &ManualExecutor {
        &self.executor
    }

    pub fn page_state(&self) -> &PageState {
        &self.page_state
    }

    pub fn view(&self) -> &CharacterListView {
        &self.view
    }

    /// Render inside the provider scope.
    ///
    /// # Panics
    /// Never in practice; the rule always renders within its provider.
    pub fn render(&mut self) -> Screen {
        let screen = self
            .provider
            .provide(|| self.view.render())
            .expect("list view rendered inside its provider");
        self.screen = Some(screen.clone());
        screen
    }

    /// Re-render if the page or the query state changed since the last render.
    pub fn refresh(&mut self) -> bool {
        let page_changed = self.provider.take_invalidated();
        let query_changed = self.view.take_invalidated();
        if page_changed || query_changed || self.screen.is_none() {
            self.render();
            true
        } else {
            false
        }
    }

    /// Deliver results already handed back by finished jobs, then refresh.
    pub fn drain(&mut self) -> Screen {
        self.runtime.handle().drain_ui();
        self.refresh();
        self.screen().clone()
    }

    /// Run parked jobs and deliver their results until nothing is left.
    pub fn pump_until_idle(&mut self) -> Screen {
        let handle = self.runtime.handle();
        for _ in 0..100 {
            self.refresh();
            let ran_jobs = self.executor.run_all();
            let ran_tasks = handle.drain_ui();
            let rendered = self.refresh();
            if ran_jobs == 0 && ran_tasks == 0 && !rendered {
                return self.screen().clone();
            }
        }
        panic!("pump_until_idle looped too many times");
    }

    /// Last rendered screen.
    ///
    /// # Panics
    /// Panics if nothing has been rendered yet.
    pub fn screen(&self) -> &Screen {
        self.screen.as_ref().expect("render() has not been called")
    }

    pub fn press_next(&mut self) -> bool {
        let pressed = self.view.press_next();
        self.refresh();
        pressed
    }

    pub fn press_previous(&mut self) -> bool {
        let pressed = self.view.press_previous();
        self.refresh();
        pressed
    }

    pub fn retry(&mut self) -> bool {
        let pressed = self.view.retry();
        self.refresh();
        pressed
    }
}

impl Default for ListTestRule {
    fn default() -> Self {
        Self::new()
    }
}
