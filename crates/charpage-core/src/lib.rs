#![doc = r"Core state pieces for the character browser: the page cell, its provider scope, and the UI runtime."]

pub mod collections;
pub mod page_state;
pub mod platform;
pub mod runtime;
pub mod scope;

pub use page_state::{PageState, Subscription};
pub use platform::{BackgroundExecutor, ThreadExecutor};
pub use runtime::{Runtime, RuntimeHandle, UiDispatcher};
pub use scope::{
    in_provider_scope, use_page_state, PageStateAccessor, PageStateProvider, ProviderScopeGuard,
    ScopeError,
};

/// One-based page index used as the query parameter.
pub type PageNumber = u32;

/// Page every session starts on.
pub const FIRST_PAGE: PageNumber = 1;

/// Upper bound on navigable pages, independent of the server-reported total.
pub const MAX_PAGES: PageNumber = 2;

#[cfg(test)]
#[path = "tests/page_state_tests.rs"]
mod page_state_tests;

#[cfg(test)]
#[path = "tests/scope_tests.rs"]
mod scope_tests;

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod runtime_tests;
