//! Observable cell holding the current page number.
//!
//! `PageState` is a single-threaded subject: `set` notifies every registered
//! subscriber synchronously when the value actually changes. No range checks
//! happen here; callers decide which pages are reachable.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

use crate::PageNumber;

type Subscriber = Rc<dyn Fn(PageNumber)>; // Shared so notification can run without holding the list borrow.

struct SubscriberEntry {
    id: u64,
    callback: Subscriber,
}

struct PageStateInner {
    value: Cell<PageNumber>,
    subscribers: RefCell<SmallVec<[SubscriberEntry; 4]>>,
    next_id: Cell<u64>,
    notifying: Cell<bool>,
}

impl PageStateInner {
    fn remove(&self, id: u64) {
        let mut subscribers = self.subscribers.borrow_mut();
        if let Some(index) = subscribers.iter().position(|entry| entry.id == id) {
            subscribers.remove(index);
        }
    }
}

/// Clears the re-entrancy flag even if a subscriber panics.
struct NotifyGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> NotifyGuard<'a> {
    fn new(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self { flag }
    }
}

impl Drop for NotifyGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// Handle-shared page cell. Clones observe and mutate the same value.
#[derive(Clone)]
pub struct PageState {
    inner: Rc<PageStateInner>,
}

impl PageState {
    pub fn new(initial: PageNumber) -> Self {
        Self {
            inner: Rc::new(PageStateInner {
                value: Cell::new(initial),
                subscribers: RefCell::new(SmallVec::new()),
                next_id: Cell::new(1),
                notifying: Cell::new(false),
            }),
        }
    }

    pub fn get(&self) -> PageNumber {
        self.inner.value.get()
    }

    /// Replace the value and notify subscribers before returning.
    ///
    /// Setting the current value again is a no-op. Calls made from inside a
    /// subscriber callback are rejected and logged.
    pub fn set(&self, value: PageNumber) {
        if self.inner.notifying.get() {
            log::warn!("PageState::set({value}) called during notification; ignored");
            return;
        }
        let previous = self.inner.value.replace(value);
        if previous == value {
            return;
        }
        log::debug!("page state {previous} -> {value}");

        let callbacks: SmallVec<[Subscriber; 4]> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|entry| Rc::clone(&entry.callback))
            .collect();

        let _guard = NotifyGuard::new(&self.inner.notifying);
        for callback in callbacks {
            callback(value);
        }
    }

    /// Register `callback` for every future change. The current value is not
    /// replayed.
    pub fn subscribe(&self, callback: impl Fn(PageNumber) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.subscribers.borrow_mut().push(SubscriberEntry {
            id,
            callback: Rc::new(callback),
        });
        Subscription {
            state: Rc::downgrade(&self.inner),
            id: Some(id),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }
}

impl std::fmt::Debug for PageState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageState")
            .field("value", &self.get())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Registration returned by [`PageState::subscribe`].
///
/// The callback stays registered for as long as this handle lives; calling
/// [`Subscription::unsubscribe`] or dropping the handle removes it.
#[must_use = "dropping a Subscription unregisters its callback"]
pub struct Subscription {
    state: Weak<PageStateInner>,
    id: Option<u64>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.release();
    }

    pub fn is_active(&self) -> bool {
        self.id.is_some() && self.state.strong_count() > 0
    }

    fn release(&mut self) {
        if let Some(id) = self.id.take() {
            if let Some(state) = self.state.upgrade() {
                state.remove(id);
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}
