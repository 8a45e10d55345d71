//! Periodic task scheduling

use chrono::{DateTime, Local};
use tracing::debug;

use crate::CoreEvent;

/// A feature that polls the clock on a fixed interval
pub trait ScheduledTask: Send {
    fn name(&self) -> &'static str;

    /// Run one poll at `now`, returning any events it produced
    fn tick(&mut self, now: DateTime<Local>) -> Vec<CoreEvent>;
}

/// Ticks registered tasks in registration order.
///
/// Knows nothing about the streak engine; the host decides when to tick.
#[derive(Default)]
pub struct TaskScheduler {
    tasks: Vec<Box<dyn ScheduledTask>>,
}

impl TaskScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, task: Box<dyn ScheduledTask>) {
        debug!(task = task.name(), "Task registered");
        self.tasks.push(task);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tick every task once
    pub fn tick(&mut self, now: DateTime<Local>) -> Vec<CoreEvent> {
        let mut events = Vec::new();
        for task in &mut self.tasks {
            let produced = task.tick(now);
            if !produced.is_empty() {
                debug!(task = task.name(), count = produced.len(), "Task produced events");
            }
            events.extend(produced);
        }
        events
    }
}
