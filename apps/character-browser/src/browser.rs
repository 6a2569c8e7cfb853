use std::sync::Arc;

use anyhow::Context;
use charpage_core::{
    PageNumber, PageState, PageStateProvider, Runtime, RuntimeHandle, ScopeError, Subscription,
    FIRST_PAGE,
};
use charpage_query::{GraphqlClient, HttpTransport};
use charpage_ui::{CharacterListView, Screen};

use crate::options::AppOptions;
use crate::persistence::PagePersistence;
use crate::terminal::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One page cell, its provider, and the list view rendered inside it.
pub struct Browser {
    runtime: Runtime,
    page_state: PageState,
    provider: PageStateProvider,
    view: CharacterListView,
    persistence: Option<Subscription>,
}

impl Browser {
    /// Wire a browser against the configured HTTP endpoint.
    pub fn from_options(options: &AppOptions) -> anyhow::Result<Self> {
        let mut builder =
            HttpTransport::builder(options.endpoint.clone()).with_timeout(options.timeout);
        if let Some(user_agent) = &options.user_agent {
            builder = builder.with_user_agent(user_agent.clone());
        }
        let transport = builder
            .build()
            .with_context(|| format!("building HTTP client for {}", options.endpoint))?;
        log::info!("browsing characters from {}", transport.endpoint());

        let initial_page = match options.state_file() {
            Some(path) => match PagePersistence::load(path) {
                Ok(page) => page.unwrap_or(FIRST_PAGE),
                Err(err) => {
                    log::warn!("starting from page {FIRST_PAGE}: {err}");
                    FIRST_PAGE
                }
            },
            None => FIRST_PAGE,
        };

        let mut browser = Self::new(
            Runtime::new(),
            GraphqlClient::new(Arc::new(transport)),
            initial_page,
        );
        if let Some(path) = options.state_file() {
            browser.persist_to(path);
        }
        Ok(browser)
    }

    pub fn new(runtime: Runtime, client: GraphqlClient, initial_page: PageNumber) -> Self {
        let page_state = PageState::new(initial_page);
        let provider = PageStateProvider::new(page_state.clone());
        let view = CharacterListView::new(runtime.handle(), client);
        Self {
            runtime,
            page_state,
            provider,
            view,
            persistence: None,
        }
    }

    pub fn persist_to(&mut self, path: impl Into<std::path::PathBuf>) {
        self.persistence = Some(PagePersistence::attach(&self.page_state, path));
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn page_state(&self) -> &PageState {
        &self.page_state
    }

    pub fn render(&mut self) -> Result<Screen, ScopeError> {
        let view = &mut self.view;
        self.provider.provide(|| view.render())
    }

    /// Render again if the page or the query changed. Returns the new screen.
    pub fn refresh(&mut self) -> Result<Option<Screen>, ScopeError> {
        let page_changed = self.provider.take_invalidated();
        let query_changed = self.view.take_invalidated();
        if page_changed || query_changed {
            self.render().map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn handle(&mut self, command: Command) -> Flow {
        let accepted = match command {
            Command::Next => self.view.press_next(),
            Command::Previous => self.view.press_previous(),
            Command::Retry => self.view.retry(),
            Command::Quit => return Flow::Quit,
        };
        if !accepted {
            log::debug!("{command:?} is not available on this screen");
        }
        Flow::Continue
    }
}
