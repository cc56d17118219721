//! Deterministic single-threaded event loop.
//!
//! The loop owns two FIFO lanes. Macrotasks model timer-like deferral: a task
//! queued now runs after every macrotask queued before it. Microtasks model
//! same-turn deferral: the microtask lane is drained completely before each
//! macrotask and again after it. Eventual reactions go to whichever lane
//! [`LoopConfig::dispatch`] names.
//!
//! Nothing here touches wall-clock time or threads, so a given sequence of
//! enqueues always produces the same execution order.
//!
//! ```
//! use eventual::{Eventual, Reason, runtime::EventLoop};
//!
//! let event_loop = EventLoop::new();
//! let dispatcher = event_loop.dispatcher();
//!
//! let doubled = Eventual::<u32, Reason>::fulfilled(&dispatcher, 21).map(|v| v * 2);
//! event_loop.run_until_idle().expect("run");
//! assert_eq!(doubled.outcome(), Some(Ok(42)));
//! ```

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use super::{Dispatcher, Schedule, Task};
use crate::config::{DispatchMode, LoopConfig};
use crate::error::{Error, Result};
use crate::tracing_compat::{debug, trace};
use crate::types::TaskId;

/// One of the loop's two queues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    /// Timer-like queue; one task per loop turn.
    Macrotask,
    /// Same-turn queue; drained around every macrotask.
    Microtask,
}

impl From<DispatchMode> for Lane {
    fn from(mode: DispatchMode) -> Self {
        match mode {
            DispatchMode::Macrotask => Self::Macrotask,
            DispatchMode::Microtask => Self::Microtask,
        }
    }
}

/// A task the loop has started running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchRecord {
    /// The task id.
    pub task: TaskId,
    /// The task label.
    pub label: &'static str,
    /// The lane the task came from.
    pub lane: Lane,
}

/// Lifetime counters for a loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    /// Macrotasks run.
    pub macrotasks_run: u64,
    /// Microtasks run.
    pub microtasks_run: u64,
}

impl LoopStats {
    /// Total tasks run.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.macrotasks_run + self.microtasks_run
    }
}

/// Summary of a single `run_until_idle` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Macrotasks run during the call.
    pub macrotasks: u64,
    /// Microtasks run during the call.
    pub microtasks: u64,
}

impl RunReport {
    /// Total tasks run during the call.
    #[must_use]
    pub const fn steps(&self) -> u64 {
        self.macrotasks + self.microtasks
    }

    fn count(&mut self, lane: Lane) {
        match lane {
            Lane::Macrotask => self.macrotasks += 1,
            Lane::Microtask => self.microtasks += 1,
        }
    }
}

struct LoopCore {
    dispatch_lane: Lane,
    macrotasks: RefCell<VecDeque<Task>>,
    microtasks: RefCell<VecDeque<Task>>,
    stats: Cell<LoopStats>,
    trace: RefCell<VecDeque<DispatchRecord>>,
    trace_capacity: usize,
}

impl LoopCore {
    fn lane(&self, lane: Lane) -> &RefCell<VecDeque<Task>> {
        match lane {
            Lane::Macrotask => &self.macrotasks,
            Lane::Microtask => &self.microtasks,
        }
    }

    fn push(&self, lane: Lane, task: Task) {
        trace!(task = %task.id(), label = task.label(), ?lane, "task queued");
        self.lane(lane).borrow_mut().push_back(task);
    }

    fn pending(&self) -> usize {
        self.macrotasks.borrow().len() + self.microtasks.borrow().len()
    }

    /// Runs the next task: a microtask if any is queued, else a macrotask.
    fn step(&self) -> Option<Lane> {
        let lane = if self.microtasks.borrow().is_empty() {
            Lane::Macrotask
        } else {
            Lane::Microtask
        };
        // The borrow ends here so the task can enqueue more work.
        let task = self.lane(lane).borrow_mut().pop_front()?;
        self.run(lane, task);
        Some(lane)
    }

    fn drain_microtasks(&self, report: &mut RunReport) {
        loop {
            let Some(task) = self.microtasks.borrow_mut().pop_front() else {
                break;
            };
            self.run(Lane::Microtask, task);
            report.count(Lane::Microtask);
        }
    }

    fn run(&self, lane: Lane, task: Task) {
        self.record(DispatchRecord {
            task: task.id(),
            label: task.label(),
            lane,
        });
        let mut stats = self.stats.get();
        match lane {
            Lane::Macrotask => stats.macrotasks_run += 1,
            Lane::Microtask => stats.microtasks_run += 1,
        }
        self.stats.set(stats);
        task.run();
    }

    fn record(&self, record: DispatchRecord) {
        if self.trace_capacity == 0 {
            return;
        }
        let mut trace = self.trace.borrow_mut();
        if trace.len() == self.trace_capacity {
            trace.pop_front();
        }
        trace.push_back(record);
    }
}

impl Schedule for LoopCore {
    fn enqueue(&self, task: Task) {
        self.push(self.dispatch_lane, task);
    }
}

/// A deterministic event loop that implements deferred dispatch.
pub struct EventLoop {
    core: Rc<LoopCore>,
    dispatcher: Dispatcher,
    config: LoopConfig,
}

impl EventLoop {
    /// Creates a loop with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::build(LoopConfig::default())
    }

    /// Creates a loop after validating `config`.
    pub fn with_config(config: LoopConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: LoopConfig) -> Self {
        let core = Rc::new(LoopCore {
            dispatch_lane: config.dispatch.into(),
            macrotasks: RefCell::new(VecDeque::new()),
            microtasks: RefCell::new(VecDeque::new()),
            stats: Cell::new(LoopStats::default()),
            trace: RefCell::new(VecDeque::with_capacity(config.trace_capacity)),
            trace_capacity: config.trace_capacity,
        });
        let shared: Rc<dyn Schedule> = core.clone();
        debug!(dispatch = %config.dispatch, max_steps = ?config.max_steps, "event loop created");
        Self {
            core,
            dispatcher: Dispatcher::from_rc(shared),
            config,
        }
    }

    /// Returns the dispatcher eventuals should be created with.
    #[must_use]
    pub fn dispatcher(&self) -> Dispatcher {
        self.dispatcher.clone()
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &LoopConfig {
        &self.config
    }

    /// Queues host work on the macrotask lane.
    pub fn queue_macrotask<F>(&self, label: &'static str, run: F)
    where
        F: FnOnce() + 'static,
    {
        self.core.push(Lane::Macrotask, Task::new(label, run));
    }

    /// Queues host work on the microtask lane.
    pub fn queue_microtask<F>(&self, label: &'static str, run: F)
    where
        F: FnOnce() + 'static,
    {
        self.core.push(Lane::Microtask, Task::new(label, run));
    }

    /// Runs one loop turn: pending microtasks, one macrotask, then the
    /// microtasks that produced.
    ///
    /// Returns true if any task ran.
    pub fn run_once(&self) -> bool {
        let mut report = RunReport::default();
        self.core.drain_microtasks(&mut report);
        let task = self.core.macrotasks.borrow_mut().pop_front();
        if let Some(task) = task {
            self.core.run(Lane::Macrotask, task);
            report.count(Lane::Macrotask);
        }
        self.core.drain_microtasks(&mut report);
        report.steps() > 0
    }

    /// Runs until both lanes are empty.
    ///
    /// With a configured step budget, stops with
    /// [`Error::StepBudgetExhausted`] once the budget is spent and work is
    /// still queued.
    pub fn run_until_idle(&self) -> Result<RunReport> {
        let mut report = RunReport::default();
        loop {
            if let Some(budget) = self.config.max_steps {
                if report.steps() >= budget && !self.is_idle() {
                    let remaining = self.pending();
                    debug!(budget, remaining, "step budget exhausted");
                    return Err(Error::StepBudgetExhausted { budget, remaining });
                }
            }
            match self.core.step() {
                Some(lane) => report.count(lane),
                None => break,
            }
        }
        trace!(
            macrotasks = report.macrotasks,
            microtasks = report.microtasks,
            "event loop idle"
        );
        Ok(report)
    }

    /// Returns the number of queued tasks across both lanes.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.core.pending()
    }

    /// Returns true if no task is queued.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending() == 0
    }

    /// Returns lifetime counters.
    #[must_use]
    pub fn stats(&self) -> LoopStats {
        self.core.stats.get()
    }

    /// Returns the most recent dispatch records, oldest first.
    #[must_use]
    pub fn trace(&self) -> Vec<DispatchRecord> {
        self.core.trace.borrow().iter().copied().collect()
    }
}

impl Drop for EventLoop {
    fn drop(&mut self) {
        // Queued tasks hold dispatchers that point back at the core.
        let macrotasks = std::mem::take(&mut *self.core.macrotasks.borrow_mut());
        let microtasks = std::mem::take(&mut *self.core.microtasks.borrow_mut());
        drop(macrotasks);
        drop(microtasks);
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventLoop")
            .field("config", &self.config)
            .field("pending", &self.pending())
            .field("stats", &self.stats())
            .finish()
    }
}
