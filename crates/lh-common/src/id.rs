//! Identifier types for bronze entities.
//!
//! Integer ids are sequential per run and start at 1. Subscription and
//! invoice ids are opaque UUID tokens so they stay unique across runs.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! int_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                $name(id)
            }
        }
    };
}

int_id!(
    /// User identifier, sequential from 1.
    UserId
);
int_id!(
    /// Account identifier. Accounts have no record of their own; they exist
    /// only as the value users and subscriptions point at.
    AccountId
);
int_id!(
    /// Event identifier, sequential from 1.
    EventId
);

/// Subscription token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(pub Uuid);

impl SubscriptionId {
    /// Build a token from 16 random bytes (RFC 4122 version 4 layout).
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        SubscriptionId(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Invoice token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(pub Uuid);

impl InvoiceId {
    /// Build a token from 16 random bytes (RFC 4122 version 4 layout).
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        InvoiceId(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }
}

impl fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
