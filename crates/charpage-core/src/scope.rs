//! Provider scope exposing the page cell to a subtree of consumers.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use thiserror::Error;

use crate::page_state::{PageState, Subscription};
use crate::PageNumber;

// Thread-local stack of active providers; the innermost one wins.
thread_local! {
    static PROVIDER_STACK: RefCell<Vec<Rc<ProviderCore>>> = const { RefCell::new(Vec::new()) };
}

/// Raised when [`use_page_state`] runs outside any [`PageStateProvider::provide`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("use_page_state must be used within a PageStateProvider")]
pub struct ScopeError;

struct ProviderCore {
    state: PageState,
    current: Cell<PageNumber>,
    invalidated: Cell<bool>,
    on_invalidate: RefCell<Option<Rc<dyn Fn()>>>,
}

impl ProviderCore {
    fn handle_change(&self, page: PageNumber) {
        self.current.set(page);
        self.invalidated.set(true);
        let hook = self.on_invalidate.borrow().clone();
        if let Some(hook) = hook {
            hook();
        }
    }
}

/// Owns the single subscription between a [`PageState`] and its consumers.
pub struct PageStateProvider {
    core: Rc<ProviderCore>,
    _subscription: Subscription,
}

impl PageStateProvider {
    pub fn new(state: PageState) -> Self {
        let core = Rc::new(ProviderCore {
            current: Cell::new(state.get()),
            state: state.clone(),
            invalidated: Cell::new(false),
            on_invalidate: RefCell::new(None),
        });
        let weak = Rc::downgrade(&core);
        let subscription = state.subscribe(move |page| {
            if let Some(core) = weak.upgrade() {
                core.handle_change(page);
            }
        });
        Self {
            core,
            _subscription: subscription,
        }
    }

    /// Install a hook that runs whenever the provided page changes.
    pub fn set_on_invalidate(&self, hook: impl Fn() + 'static) {
        *self.core.on_invalidate.borrow_mut() = Some(Rc::new(hook));
    }

    /// Run `content` with this provider at the top of the scope stack.
    pub fn provide<R>(&self, content: impl FnOnce() -> R) -> R {
        let _guard = enter(self);
        content()
    }

    /// Returns `true` once per batch of page changes since the last call.
    pub fn take_invalidated(&self) -> bool {
        self.core.invalidated.replace(false)
    }

    pub fn current_page(&self) -> PageNumber {
        self.core.current.get()
    }

    pub fn state(&self) -> &PageState {
        &self.core.state
    }
}

/// Guard that pops the provider stack on drop.
#[must_use = "ProviderScopeGuard pops the provider stack on drop"]
pub struct ProviderScopeGuard;

impl Drop for ProviderScopeGuard {
    fn drop(&mut self) {
        PROVIDER_STACK.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// Pushes the provider onto the thread-local stack for the duration of the scope.
pub fn enter(provider: &PageStateProvider) -> ProviderScopeGuard {
    PROVIDER_STACK.with(|stack| {
        stack.borrow_mut().push(Rc::clone(&provider.core));
    });
    ProviderScopeGuard
}

/// Snapshot of the provided page plus a setter forwarding to the cell.
#[derive(Clone)]
pub struct PageStateAccessor {
    current_page: PageNumber,
    state: PageState,
}

impl PageStateAccessor {
    pub fn current_page(&self) -> PageNumber {
        self.current_page
    }

    /// Forwards to [`PageState::set`] unchanged; no clamping.
    pub fn set_current_page(&self, page: PageNumber) {
        self.state.set(page);
    }
}

impl std::fmt::Debug for PageStateAccessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageStateAccessor")
            .field("current_page", &self.current_page)
            .finish()
    }
}

/// Read the innermost provided page state.
///
/// # Errors
/// Returns [`ScopeError`] when no provider is active on this thread.
pub fn use_page_state() -> Result<PageStateAccessor, ScopeError> {
    PROVIDER_STACK.with(|stack| {
        let stack = stack.borrow();
        let core = stack.last().ok_or(ScopeError)?;
        Ok(PageStateAccessor {
            current_page: core.current.get(),
            state: core.state.clone(),
        })
    })
}

pub fn in_provider_scope() -> bool {
    PROVIDER_STACK.with(|stack| !stack.borrow().is_empty())
}
