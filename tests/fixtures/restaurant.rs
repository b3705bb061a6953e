// Copyright (c) 2025 - Cowboy AI, Inc.
//! Restaurant domain: an order decider that reads menu events it never emits
//!
//! The order decider's input events (`RestaurantEvent`) are wider than its
//! output events (`OrderEvent`), so it lives at the event-sourced level.

use std::collections::BTreeSet;

use cim_decider::application::Identifier;
use cim_decider::{DcbDecider, Projection};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const RESTAURANT_ID: &str = "restaurant-1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OrderCommand {
    PlaceOrder {
        order_id: String,
        menu_item_id: String,
        quantity: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCreated {
    pub version: u32,
    pub order_id: String,
    pub menu_item_id: String,
    pub quantity: u32,
    pub total_amount: f64,
}

/// Events the order decider emits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OrderEvent {
    OrderCreated(OrderCreated),
}

/// Everything recorded in a restaurant's stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RestaurantEvent {
    MenuPublished { version: u32, items: Vec<MenuItem> },
    OrderCreated(OrderCreated),
}

impl From<OrderEvent> for RestaurantEvent {
    fn from(event: OrderEvent) -> Self {
        match event {
            OrderEvent::OrderCreated(created) => RestaurantEvent::OrderCreated(created),
        }
    }
}

impl Identifier for OrderCommand {
    fn identifier(&self) -> String {
        RESTAURANT_ID.to_string()
    }
}

impl Identifier for OrderEvent {
    fn identifier(&self) -> String {
        RESTAURANT_ID.to_string()
    }
}

impl Identifier for RestaurantEvent {
    fn identifier(&self) -> String {
        RESTAURANT_ID.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RestaurantState {
    pub menu: Vec<MenuItem>,
    pub orders: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestaurantError {
    #[error("item {0} is not on the menu")]
    ItemNotOnMenu(String),

    #[error("item {0} is not available")]
    ItemUnavailable(String),
}

pub fn order_decider() -> DcbDecider<OrderCommand, RestaurantState, RestaurantEvent, OrderEvent, RestaurantError> {
    DcbDecider::new(
        |command: &OrderCommand, state: &RestaurantState| match command {
            // Duplicate orders are dropped silently.
            OrderCommand::PlaceOrder { order_id, .. } if state.orders.contains(order_id) => Ok(Vec::new()),
            OrderCommand::PlaceOrder {
                order_id,
                menu_item_id,
                quantity,
            } => {
                let item = state
                    .menu
                    .iter()
                    .find(|item| &item.id == menu_item_id)
                    .ok_or_else(|| RestaurantError::ItemNotOnMenu(menu_item_id.clone()))?;
                if !item.available {
                    return Err(RestaurantError::ItemUnavailable(menu_item_id.clone()));
                }
                Ok(vec![OrderEvent::OrderCreated(OrderCreated {
                    version: 1,
                    order_id: order_id.clone(),
                    menu_item_id: menu_item_id.clone(),
                    quantity: *quantity,
                    total_amount: item.price * f64::from(*quantity),
                })])
            }
        },
        |state: &RestaurantState, event: &RestaurantEvent| {
            let mut state = state.clone();
            match event {
                RestaurantEvent::MenuPublished { items, .. } => state.menu = items.clone(),
                RestaurantEvent::OrderCreated(created) => {
                    state.orders.insert(created.order_id.clone());
                }
            }
            state
        },
        RestaurantState::default(),
    )
}

/// Running revenue over every order created
pub fn revenue_projection() -> Projection<f64, RestaurantEvent> {
    Projection::new(
        |revenue: &f64, event: &RestaurantEvent| match event {
            RestaurantEvent::OrderCreated(created) => revenue + created.total_amount,
            RestaurantEvent::MenuPublished { .. } => *revenue,
        },
        0.0,
    )
}

pub fn burger() -> MenuItem {
    MenuItem {
        id: "item-789".to_string(),
        name: "Burger".to_string(),
        price: 12.99,
        available: true,
    }
}

pub fn menu_published() -> RestaurantEvent {
    RestaurantEvent::MenuPublished {
        version: 1,
        items: vec![burger()],
    }
}

pub fn place_order(order_id: &str, menu_item_id: &str, quantity: u32) -> OrderCommand {
    OrderCommand::PlaceOrder {
        order_id: order_id.to_string(),
        menu_item_id: menu_item_id.to_string(),
        quantity,
    }
}

pub fn order_created(order_id: &str, quantity: u32) -> OrderCreated {
    OrderCreated {
        version: 1,
        order_id: order_id.to_string(),
        menu_item_id: "item-789".to_string(),
        quantity,
        total_amount: 12.99 * f64::from(quantity),
    }
}
