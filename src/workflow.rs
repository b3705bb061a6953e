// Copyright (c) 2025 - Cowboy AI, Inc.
//! Workflow Task Tracking
//!
//! The common process-manager specialization: alongside its business state, a
//! workflow tracks named tasks through a fixed lifecycle.
//!
//! ```text
//!  absent ──TaskStarted──> started ──TaskCompleted──> finished
//! ```
//!
//! `finished` is terminal. The engine does not deduplicate: a decide function
//! that wants idempotency asks the state first, which is what
//! [`WorkflowState::start_task`] and [`WorkflowState::complete_task`] do.
//!
//! Timestamps are always supplied by the caller, usually carried on the action
//! result being decided. Nothing here reads the clock, so replaying a history
//! yields the same events every time.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::process::AggregateProcess;

/// Lifecycle position of a single named task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// No TaskStarted recorded yet
    #[default]
    NotStarted,
    /// Started and awaiting completion
    Started,
    /// Completed; terminal
    Finished,
}

/// A task was started
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStarted {
    /// Name identifying the task within its workflow
    pub task_name: String,
    /// When the task started, as supplied by the caller
    pub timestamp: Option<DateTime<Utc>>,
    /// Free-form data `react` and `pending` need on the other side of the event
    pub metadata: Option<Value>,
}

impl TaskStarted {
    /// Start event for `task_name` with no timestamp or metadata
    pub fn new(task_name: impl Into<String>) -> Self {
        Self {
            task_name: task_name.into(),
            timestamp: None,
            metadata: None,
        }
    }

    /// Stamp the event with a caller-supplied time
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Attach metadata for `react` and `pending`
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// A started task finished, optionally with a result payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskCompleted {
    /// Name of the task that finished
    pub task_name: String,
    /// When the task finished, as supplied by the caller
    pub timestamp: Option<DateTime<Utc>>,
    /// Free-form data carried alongside the completion
    pub metadata: Option<Value>,
    /// Outcome payload of the finished task
    pub result: Option<Value>,
}

impl TaskCompleted {
    /// Completion event for `task_name` with no timestamp, metadata or result
    pub fn new(task_name: impl Into<String>) -> Self {
        Self {
            task_name: task_name.into(),
            timestamp: None,
            metadata: None,
            result: None,
        }
    }

    /// Stamp the event with a caller-supplied time
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Attach free-form metadata
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Attach the task's outcome
    pub fn with_result(mut self, result: Value) -> Self {
        self.result = Some(result);
        self
    }
}

/// The two events that drive task transitions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TaskEvent {
    /// See [`TaskStarted`]
    Started(TaskStarted),
    /// See [`TaskCompleted`]
    Completed(TaskCompleted),
}

impl TaskEvent {
    /// Name of the task this event moves
    pub fn task_name(&self) -> &str {
        match self {
            TaskEvent::Started(started) => &started.task_name,
            TaskEvent::Completed(completed) => &completed.task_name,
        }
    }
}

impl From<TaskStarted> for TaskEvent {
    fn from(started: TaskStarted) -> Self {
        TaskEvent::Started(started)
    }
}

impl From<TaskCompleted> for TaskEvent {
    fn from(completed: TaskCompleted) -> Self {
        TaskEvent::Completed(completed)
    }
}

/// Implemented by a workflow's event type to expose its task events
///
/// Business events return `None` and leave the task map untouched.
pub trait AsTaskEvent {
    /// The task event inside this event, if any
    fn as_task_event(&self) -> Option<&TaskEvent>;
}

impl AsTaskEvent for TaskEvent {
    fn as_task_event(&self) -> Option<&TaskEvent> {
        Some(self)
    }
}

/// Task name to lifecycle position; an absent name is [`TaskStatus::NotStarted`]
pub type TaskMap = BTreeMap<String, TaskStatus>;

/// Apply one task event to a task map
pub fn evolve_tasks(tasks: &TaskMap, event: &TaskEvent) -> TaskMap {
    let mut tasks = tasks.clone();
    match event {
        TaskEvent::Started(started) => {
            tasks.insert(started.task_name.clone(), TaskStatus::Started);
        }
        TaskEvent::Completed(completed) => {
            tasks.insert(completed.task_name.clone(), TaskStatus::Finished);
        }
    }
    tasks
}

/// Workflow state: the task map next to the business state
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkflowState<S> {
    /// Lifecycle position of every task seen so far
    pub tasks: TaskMap,
    /// Business state, evolved by the workflow's own evolve function
    pub state: S,
}

impl<S> WorkflowState<S> {
    /// Fresh workflow with no tasks started
    pub fn new(state: S) -> Self {
        Self {
            tasks: TaskMap::new(),
            state,
        }
    }

    /// Lifecycle position of `task_name`
    pub fn task_status(&self, task_name: &str) -> TaskStatus {
        self.tasks.get(task_name).copied().unwrap_or_default()
    }

    /// Whether `task_name` has never been started
    pub fn is_not_started(&self, task_name: &str) -> bool {
        self.task_status(task_name) == TaskStatus::NotStarted
    }

    /// Whether `task_name` is started and not yet finished
    pub fn is_started(&self, task_name: &str) -> bool {
        self.task_status(task_name) == TaskStatus::Started
    }

    /// Whether `task_name` has finished
    pub fn is_finished(&self, task_name: &str) -> bool {
        self.task_status(task_name) == TaskStatus::Finished
    }

    /// Hand back `started` only if its task has not been started yet
    pub fn start_task(&self, started: TaskStarted) -> Option<TaskStarted> {
        self.is_not_started(&started.task_name).then_some(started)
    }

    /// Hand back `completed` only if its task is currently started
    pub fn complete_task(&self, completed: TaskCompleted) -> Option<TaskCompleted> {
        self.is_started(&completed.task_name).then_some(completed)
    }
}

/// Build a workflow process with task bookkeeping folded in
///
/// `evolve` sees every event and only ever updates the business state; task
/// events are applied to the task map by [`evolve_tasks`] first.
pub fn workflow_process<AR, S, E, A, Err, D, F, R, P>(
    decide: D,
    evolve: F,
    react: R,
    pending: P,
    initial_state: S,
) -> AggregateProcess<AR, WorkflowState<S>, E, A, Err>
where
    S: 'static,
    E: AsTaskEvent + 'static,
    D: Fn(&AR, &WorkflowState<S>) -> Result<Vec<E>, Err> + Send + Sync + 'static,
    F: Fn(&S, &E) -> S + Send + Sync + 'static,
    R: Fn(&WorkflowState<S>, &E) -> Vec<A> + Send + Sync + 'static,
    P: Fn(&WorkflowState<S>) -> Vec<A> + Send + Sync + 'static,
{
    AggregateProcess::new(
        decide,
        move |current: &WorkflowState<S>, event: &E| {
            let tasks = match event.as_task_event() {
                Some(task_event) => evolve_tasks(&current.tasks, task_event),
                None => current.tasks.clone(),
            };
            WorkflowState {
                tasks,
                state: evolve(&current.state, event),
            }
        },
        react,
        pending,
        WorkflowState::new(initial_state),
    )
}
