//! Lakehouse common types, IDs, and errors.
//!
//! This crate provides foundational types shared across the lakehouse crates:
//! - Identifier newtypes for bronze entities
//! - Entity records (users, events, subscriptions, invoices) and the plan catalog
//! - Common error types
//! - Output format specifications

pub mod entity;
pub mod error;
pub mod id;
pub mod output;

pub use entity::{Event, EventType, Invoice, InvoiceStatus, Plan, Subscription, User};
pub use error::{Error, Result};
pub use id::{AccountId, EventId, InvoiceId, SubscriptionId, UserId};
pub use output::OutputFormat;
