//! Single-threaded UI runtime with a cross-thread dispatcher.
//!
//! All page-state mutation and rendering happen on the thread that created the
//! [`Runtime`]. Background work reports back through [`UiDispatcher`], and its
//! results are delivered the next time the host calls [`RuntimeHandle::drain_ui`].

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::ThreadId;
use std::time::Duration;

use crate::collections::map::HashMap;
use crate::platform::{BackgroundExecutor, BackgroundJob, ThreadExecutor};

enum UiMessage {
    Task(Box<dyn FnOnce() + Send + 'static>),
    Invoke { id: u64, value: Box<dyn Any + Send> },
}

type UiContinuation = Box<dyn FnOnce(Box<dyn Any>) + 'static>;
type UiContinuationMap = HashMap<u64, UiContinuation>;

struct UiDispatcherInner {
    tx: mpsc::Sender<UiMessage>,
    pending: AtomicUsize,
}

impl UiDispatcherInner {
    fn new(tx: mpsc::Sender<UiMessage>) -> Self {
        Self {
            tx,
            pending: AtomicUsize::new(0),
        }
    }

    fn send(&self, message: UiMessage) {
        self.pending.fetch_add(1, Ordering::SeqCst);
        if self.tx.send(message).is_err() {
            self.pending.fetch_sub(1, Ordering::SeqCst);
            log::debug!("UI runtime gone; dropping message");
        }
    }

    fn has_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst) > 0
    }
}

struct PendingGuard<'a> {
    counter: &'a AtomicUsize,
}

impl<'a> PendingGuard<'a> {
    fn new(counter: &'a AtomicUsize) -> Self {
        Self { counter }
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let previous = self.counter.fetch_sub(1, Ordering::SeqCst);
        debug_assert!(previous > 0, "UI dispatcher pending count underflowed");
    }
}

/// Thread-safe handle for posting work back onto the UI thread.
#[derive(Clone)]
pub struct UiDispatcher {
    inner: Arc<UiDispatcherInner>,
}

impl UiDispatcher {
    pub fn post(&self, task: impl FnOnce() + Send + 'static) {
        self.inner.send(UiMessage::Task(Box::new(task)));
    }

    pub fn post_invoke<T>(&self, id: u64, value: T)
    where
        T: Send + 'static,
    {
        self.inner.send(UiMessage::Invoke {
            id,
            value: Box::new(value),
        });
    }

    pub fn has_pending(&self) -> bool {
        self.inner.has_pending()
    }
}

struct RuntimeInner {
    dispatcher: Arc<UiDispatcherInner>,
    ui_rx: mpsc::Receiver<UiMessage>,
    local_tasks: RefCell<VecDeque<Box<dyn FnOnce() + 'static>>>,
    // Messages already taken off the channel by `wait_for_work`.
    received: RefCell<VecDeque<UiMessage>>,
    ui_conts: RefCell<UiContinuationMap>,
    next_cont_id: Cell<u64>,
    executor: Arc<dyn BackgroundExecutor>,
    ui_thread_id: ThreadId,
}

/// Owner of the UI-side queues. Dropping it disconnects every dispatcher.
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    /// Runtime that runs background work on fresh OS threads.
    pub fn new() -> Self {
        Self::with_executor(Arc::new(ThreadExecutor))
    }

    pub fn with_executor(executor: Arc<dyn BackgroundExecutor>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            inner: Rc::new(RuntimeInner {
                dispatcher: Arc::new(UiDispatcherInner::new(tx)),
                ui_rx: rx,
                local_tasks: RefCell::new(VecDeque::new()),
                received: RefCell::new(VecDeque::new()),
                ui_conts: RefCell::new(UiContinuationMap::default()),
                next_cont_id: Cell::new(1),
                executor,
                ui_thread_id: std::thread::current().id(),
            }),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable UI-thread handle to a [`Runtime`].
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Rc<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn dispatcher(&self) -> UiDispatcher {
        UiDispatcher {
            inner: Arc::clone(&self.inner.dispatcher),
        }
    }

    pub fn assert_ui_thread(&self) {
        debug_assert_eq!(
            std::thread::current().id(),
            self.inner.ui_thread_id,
            "runtime accessed off the UI thread"
        );
    }

    /// Queue UI-only work; it runs during the next [`drain_ui`](Self::drain_ui).
    pub fn enqueue_ui_task(&self, task: Box<dyn FnOnce() + 'static>) {
        self.inner.local_tasks.borrow_mut().push_back(task);
    }

    /// Runs `work` on the background executor and delivers its value to
    /// `on_ui` on the UI thread.
    ///
    /// `on_ui` never crosses threads, so it may capture `Rc`/`RefCell` state.
    pub fn launch_background<T, Work, Ui>(&self, work: Work, on_ui: Ui)
    where
        T: Send + 'static,
        Work: FnOnce() -> T + Send + 'static,
        Ui: FnOnce(T) + 'static,
    {
        self.assert_ui_thread();
        let id = self.register_ui_cont(on_ui);
        let dispatcher = self.dispatcher();
        let job: BackgroundJob = Box::new(move || {
            let value = work();
            dispatcher.post_invoke(id, value);
        });
        if let Err(job) = self.inner.executor.spawn(job) {
            log::warn!("background executor rejected job {id}; running it on the UI thread");
            job();
        }
    }

    fn register_ui_cont<T: 'static>(&self, on_ui: impl FnOnce(T) + 'static) -> u64 {
        let id = self.inner.next_cont_id.get();
        self.inner.next_cont_id.set(id + 1);
        let continuation: UiContinuation = Box::new(move |value: Box<dyn Any>| {
            match value.downcast::<T>() {
                Ok(value) => on_ui(*value),
                Err(_) => log::error!("background result {id} had an unexpected type"),
            }
        });
        self.inner.ui_conts.borrow_mut().insert(id, continuation);
        id
    }

    /// Background continuations registered but not yet delivered.
    pub fn pending_background(&self) -> usize {
        self.inner.ui_conts.borrow().len()
    }

    pub fn has_pending(&self) -> bool {
        !self.inner.local_tasks.borrow().is_empty() || self.inner.dispatcher.has_pending()
    }

    /// Run every queued task and delivered result until both queues are empty.
    /// Returns how many items ran.
    pub fn drain_ui(&self) -> usize {
        self.assert_ui_thread();
        let mut ran = 0;
        loop {
            let local = self.inner.local_tasks.borrow_mut().pop_front();
            if let Some(task) = local {
                task();
                ran += 1;
                continue;
            }
            let received = self.inner.received.borrow_mut().pop_front();
            if let Some(message) = received {
                self.run_message(message);
                ran += 1;
                continue;
            }
            match self.inner.ui_rx.try_recv() {
                Ok(message) => {
                    self.run_message(message);
                    ran += 1;
                }
                Err(_) => break,
            }
        }
        ran
    }

    /// Block until a message arrives from another thread or `timeout` passes.
    /// The message is kept for the next [`drain_ui`](Self::drain_ui).
    pub fn wait_for_work(&self, timeout: Duration) -> bool {
        let queued =
            !self.inner.local_tasks.borrow().is_empty() || !self.inner.received.borrow().is_empty();
        if queued {
            return true;
        }
        match self.inner.ui_rx.recv_timeout(timeout) {
            Ok(message) => {
                self.inner.received.borrow_mut().push_back(message);
                true
            }
            Err(_) => false,
        }
    }

    fn run_message(&self, message: UiMessage) {
        let _guard = PendingGuard::new(&self.inner.dispatcher.pending);
        match message {
            UiMessage::Task(task) => task(),
            UiMessage::Invoke { id, value } => {
                let continuation = self.inner.ui_conts.borrow_mut().remove(&id);
                match continuation {
                    Some(continuation) => continuation(value),
                    None => log::debug!("no continuation registered for {id}"),
                }
            }
        }
    }
}
