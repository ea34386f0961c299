//! Bronze entity records.
//!
//! Records are created once per generator run and never mutated afterwards.
//! Prices and amounts are copied at creation time, so a later change to the
//! plan catalog does not rewrite existing subscriptions or invoices.

use crate::error::{Error, Result};
use crate::id::{AccountId, EventId, InvoiceId, SubscriptionId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A synthetic user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub account_id: AccountId,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Email address derived from a user id.
    pub fn email_for(user_id: UserId) -> String {
        format!("user{}@example.com", user_id)
    }
}

/// Event category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Login,
    Click,
    Purchase,
}

impl EventType {
    pub const ALL: [EventType; 3] = [EventType::Login, EventType::Click, EventType::Purchase];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Login => "login",
            EventType::Click => "click",
            EventType::Purchase => "purchase",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        EventType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::invalid("event_type", s))
    }
}

/// A synthetic activity event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_id: EventId,
    /// Not guaranteed to reference an existing user.
    pub user_id: UserId,
    pub event_type: EventType,
    pub event_ts: DateTime<Utc>,
}

/// Subscription plan tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    Basic,
    Pro,
    Enterprise,
}

impl Plan {
    pub const ALL: [Plan; 3] = [Plan::Basic, Plan::Pro, Plan::Enterprise];

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Basic => "basic",
            Plan::Pro => "pro",
            Plan::Enterprise => "enterprise",
        }
    }

    /// Catalog price per month.
    pub fn monthly_price(&self) -> f64 {
        match self {
            Plan::Basic => 9.99,
            Plan::Pro => 29.99,
            Plan::Enterprise => 99.99,
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Plan::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| Error::invalid("plan", s))
    }
}

/// One subscription per account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub subscription_id: SubscriptionId,
    pub account_id: AccountId,
    pub plan: Plan,
    pub start_date: NaiveDate,
    /// Set when the subscription churned.
    pub end_date: Option<NaiveDate>,
    pub monthly_price: f64,
}

impl Subscription {
    pub fn is_active(&self) -> bool {
        self.end_date.is_none()
    }

    /// Last day that can carry an invoice: the end date, or `today` while active.
    pub fn billing_end(&self, today: NaiveDate) -> NaiveDate {
        self.end_date.unwrap_or(today)
    }
}

/// Invoice payment status. Only settled invoices are modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A monthly invoice for a subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub invoice_id: InvoiceId,
    pub account_id: AccountId,
    pub subscription_id: SubscriptionId,
    pub invoice_date: NaiveDate,
    pub amount: f64,
    pub status: InvoiceStatus,
}
