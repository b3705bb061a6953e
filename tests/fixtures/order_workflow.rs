// Copyright (c) 2025 - Cowboy AI, Inc.
//! Order fulfilment workflow: a process manager over task state
//!
//! ```text
//! OrderPlaced ──> start createOrder ──> CreateOrder
//! OrderCreated ──> finish createOrder, start capturePayment ──> CapturePayment
//! PaymentCaptured ──> finish capturePayment
//! ```
//!
//! `react` reads the order id from the task metadata carried on the event;
//! `pending` reads it from the workflow's business state.

use chrono::{DateTime, Utc};
use cim_decider::application::Identifier;
use cim_decider::workflow::{
    workflow_process, AsTaskEvent, TaskCompleted, TaskEvent, TaskStarted, TaskStatus, WorkflowState,
};
use cim_decider::AggregateProcess;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

pub const CREATE_ORDER: &str = "createOrder";
pub const CAPTURE_PAYMENT: &str = "capturePayment";

/// Results of earlier actions, fed back into the workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OrderActionResult {
    OrderPlaced { order_id: String, at: DateTime<Utc> },
    OrderCreated { order_id: String, at: DateTime<Utc> },
    PaymentCaptured { order_id: String, at: DateTime<Utc> },
}

impl OrderActionResult {
    pub fn order_id(&self) -> &str {
        match self {
            OrderActionResult::OrderPlaced { order_id, .. }
            | OrderActionResult::OrderCreated { order_id, .. }
            | OrderActionResult::PaymentCaptured { order_id, .. } => order_id,
        }
    }
}

impl Identifier for OrderActionResult {
    fn identifier(&self) -> String {
        self.order_id().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum OrderWorkflowEvent {
    Task(TaskEvent),
}

impl AsTaskEvent for OrderWorkflowEvent {
    fn as_task_event(&self) -> Option<&TaskEvent> {
        match self {
            OrderWorkflowEvent::Task(event) => Some(event),
        }
    }
}

impl Identifier for OrderWorkflowEvent {
    fn identifier(&self) -> String {
        match self {
            OrderWorkflowEvent::Task(event) => metadata_order_id(event).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OrderAction {
    CreateOrder { order_id: String },
    CapturePayment { order_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderSaga {
    pub order_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderWorkflowError {
    #[error("workflow does not track order {0}")]
    UnknownOrder(String),
}

pub type OrderWorkflow =
    AggregateProcess<OrderActionResult, WorkflowState<OrderSaga>, OrderWorkflowEvent, OrderAction, OrderWorkflowError>;

fn order_metadata(order_id: &str) -> Value {
    json!({ "order_id": order_id })
}

fn metadata_order_id(event: &TaskEvent) -> Option<String> {
    let metadata = match event {
        TaskEvent::Started(started) => started.metadata.as_ref(),
        TaskEvent::Completed(completed) => completed.metadata.as_ref(),
    }?;
    metadata.get("order_id")?.as_str().map(str::to_string)
}

fn action_for(task_name: &str, order_id: String) -> Option<OrderAction> {
    match task_name {
        CREATE_ORDER => Some(OrderAction::CreateOrder { order_id }),
        CAPTURE_PAYMENT => Some(OrderAction::CapturePayment { order_id }),
        _ => None,
    }
}

fn tracks(state: &WorkflowState<OrderSaga>, order_id: &str) -> Result<(), OrderWorkflowError> {
    match &state.state.order_id {
        Some(tracked) if tracked == order_id => Ok(()),
        _ => Err(OrderWorkflowError::UnknownOrder(order_id.to_string())),
    }
}

fn decide(
    result: &OrderActionResult,
    state: &WorkflowState<OrderSaga>,
) -> Result<Vec<OrderWorkflowEvent>, OrderWorkflowError> {
    let mut events: Vec<TaskEvent> = Vec::new();
    match result {
        OrderActionResult::OrderPlaced { order_id, at } => {
            if state.state.order_id.is_some() {
                tracks(state, order_id)?;
            }
            events.extend(
                state
                    .start_task(TaskStarted::new(CREATE_ORDER).at(*at).with_metadata(order_metadata(order_id)))
                    .map(TaskEvent::from),
            );
        }
        OrderActionResult::OrderCreated { order_id, at } => {
            tracks(state, order_id)?;
            if let Some(completed) = state.complete_task(
                TaskCompleted::new(CREATE_ORDER)
                    .at(*at)
                    .with_metadata(order_metadata(order_id))
                    .with_result(json!({ "created": true })),
            ) {
                events.push(completed.into());
                events.extend(
                    state
                        .start_task(TaskStarted::new(CAPTURE_PAYMENT).at(*at).with_metadata(order_metadata(order_id)))
                        .map(TaskEvent::from),
                );
            }
        }
        OrderActionResult::PaymentCaptured { order_id, at } => {
            tracks(state, order_id)?;
            events.extend(
                state
                    .complete_task(TaskCompleted::new(CAPTURE_PAYMENT).at(*at).with_metadata(order_metadata(order_id)))
                    .map(TaskEvent::from),
            );
        }
    }
    Ok(events.into_iter().map(OrderWorkflowEvent::Task).collect())
}

fn evolve(saga: &OrderSaga, event: &OrderWorkflowEvent) -> OrderSaga {
    match event {
        OrderWorkflowEvent::Task(task @ TaskEvent::Started(started)) if started.task_name == CREATE_ORDER => {
            OrderSaga {
                order_id: metadata_order_id(task),
            }
        }
        OrderWorkflowEvent::Task(_) => saga.clone(),
    }
}

fn react(_state: &WorkflowState<OrderSaga>, event: &OrderWorkflowEvent) -> Vec<OrderAction> {
    match event {
        OrderWorkflowEvent::Task(task @ TaskEvent::Started(started)) => metadata_order_id(task)
            .and_then(|order_id| action_for(&started.task_name, order_id))
            .into_iter()
            .collect(),
        OrderWorkflowEvent::Task(TaskEvent::Completed(_)) => Vec::new(),
    }
}

fn pending(state: &WorkflowState<OrderSaga>) -> Vec<OrderAction> {
    let Some(order_id) = &state.state.order_id else {
        return Vec::new();
    };
    state
        .tasks
        .iter()
        .filter(|(_, status)| **status == TaskStatus::Started)
        .filter_map(|(task_name, _)| action_for(task_name, order_id.clone()))
        .collect()
}

pub fn order_workflow() -> OrderWorkflow {
    workflow_process(decide, evolve, react, pending, OrderSaga::default())
}

pub fn order_placed(order_id: &str, at: DateTime<Utc>) -> OrderActionResult {
    OrderActionResult::OrderPlaced {
        order_id: order_id.to_string(),
        at,
    }
}

pub fn order_created(order_id: &str, at: DateTime<Utc>) -> OrderActionResult {
    OrderActionResult::OrderCreated {
        order_id: order_id.to_string(),
        at,
    }
}

pub fn payment_captured(order_id: &str, at: DateTime<Utc>) -> OrderActionResult {
    OrderActionResult::PaymentCaptured {
        order_id: order_id.to_string(),
        at,
    }
}
