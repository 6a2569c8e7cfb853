use super::*;
use crate::platform::BackgroundJob;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct QueueExecutor {
    jobs: Mutex<VecDeque<BackgroundJob>>,
}

impl QueueExecutor {
    fn run_all(&self) {
        loop {
            let job = self.jobs.lock().expect("job queue poisoned").pop_front();
            match job {
                Some(job) => job(),
                None => break,
            }
        }
    }
}

impl BackgroundExecutor for QueueExecutor {
    fn spawn(&self, job: BackgroundJob) -> Result<(), BackgroundJob> {
        self.jobs.lock().expect("job queue poisoned").push_back(job);
        Ok(())
    }
}

#[test]
fn background_result_arrives_on_drain() {
    let executor = Arc::new(QueueExecutor::default());
    let runtime = Runtime::with_executor(executor.clone());
    let handle = runtime.handle();
    let received = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&received);

    handle.launch_background(|| 21 * 2, move |value: i32| *sink.borrow_mut() = Some(value));
    assert_eq!(handle.pending_background(), 1);

    executor.run_all();
    assert!(received.borrow().is_none());

    handle.drain_ui();
    assert_eq!(*received.borrow(), Some(42));
    assert_eq!(handle.pending_background(), 0);
}

#[test]
fn results_are_delivered_in_completion_order() {
    let executor = Arc::new(QueueExecutor::default());
    let runtime = Runtime::with_executor(executor.clone());
    let handle = runtime.handle();
    let order = Rc::new(RefCell::new(Vec::new()));

    for label in ["first", "second"] {
        let sink = Rc::clone(&order);
        handle.launch_background(move || label, move |value| sink.borrow_mut().push(value));
    }
    let second = executor.jobs.lock().unwrap().pop_back().unwrap();
    second();
    executor.run_all();
    handle.drain_ui();

    assert_eq!(*order.borrow(), vec!["second", "first"]);
}

#[test]
fn enqueued_tasks_run_during_drain() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let ran = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&ran);
    handle.enqueue_ui_task(Box::new(move || *counter.borrow_mut() += 1));

    assert!(handle.has_pending());
    assert_eq!(handle.drain_ui(), 1);
    assert_eq!(*ran.borrow(), 1);
    assert!(!handle.has_pending());
}

#[test]
fn dispatcher_posts_from_other_threads() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let dispatcher = handle.dispatcher();
    let flag = Arc::new(Mutex::new(false));
    let flag_for_task = Arc::clone(&flag);

    std::thread::spawn(move || {
        dispatcher.post(move || *flag_for_task.lock().unwrap() = true);
    })
    .join()
    .expect("poster thread");

    assert!(handle.wait_for_work(Duration::from_secs(1)));
    handle.drain_ui();
    assert!(*flag.lock().unwrap());
    assert!(!handle.has_pending());
}

#[test]
fn thread_executor_delivers_result() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let received = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&received);

    handle.launch_background(|| "done".to_string(), move |value| *sink.borrow_mut() = Some(value));

    assert!(handle.wait_for_work(Duration::from_secs(5)));
    handle.drain_ui();
    assert_eq!(received.borrow().as_deref(), Some("done"));
}

#[test]
fn wait_for_work_times_out_when_idle() {
    let runtime = Runtime::new();
    assert!(!runtime.handle().wait_for_work(Duration::from_millis(10)));
}

struct RejectingExecutor;

impl BackgroundExecutor for RejectingExecutor {
    fn spawn(&self, job: BackgroundJob) -> Result<(), BackgroundJob> {
        Err(job)
    }
}

#[test]
fn rejected_job_still_delivers_its_result() {
    let runtime = Runtime::with_executor(Arc::new(RejectingExecutor));
    let handle = runtime.handle();
    let received = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&received);

    handle.launch_background(|| 7, move |value: i32| *sink.borrow_mut() = Some(value));

    assert!(handle.has_pending());
    handle.drain_ui();
    assert_eq!(*received.borrow(), Some(7));
    assert_eq!(handle.pending_background(), 0);
}

#[test]
fn waited_message_is_released_with_the_runtime() {
    let token = Arc::new(());
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let dispatcher = handle.dispatcher();
    let held = Arc::clone(&token);
    dispatcher.post(move || drop(held));

    assert!(handle.wait_for_work(Duration::from_secs(1)));
    assert_eq!(Arc::strong_count(&token), 2);

    drop(handle);
    drop(runtime);
    drop(dispatcher);
    assert_eq!(Arc::strong_count(&token), 1);
}

#[test]
fn waited_message_runs_before_later_ones() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let dispatcher = handle.dispatcher();
    let order = Arc::new(Mutex::new(Vec::new()));

    let first = Arc::clone(&order);
    dispatcher.post(move || first.lock().unwrap().push(1));
    assert!(handle.wait_for_work(Duration::from_secs(1)));
    let second = Arc::clone(&order);
    dispatcher.post(move || second.lock().unwrap().push(2));

    assert_eq!(handle.drain_ui(), 2);
    assert_eq!(*order.lock().unwrap(), vec![1, 2]);
    assert!(!handle.has_pending());
}
