//! Bills: the settlement record closing out a session.

use crate::model::{OrderId, OrderItem, TableId};
use crate::session::SessionId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Bills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BillId(pub u32);

impl From<u32> for BillId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for BillId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "bill_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Pending,
    Paid,
}

/// Recorded on the bill only; no payment is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
}

/// Bill contents computed from a session's orders, before anything is written.
#[derive(Debug, Clone, PartialEq)]
pub struct BillDraft {
    pub table_id: TableId,
    pub table_number: u32,
    pub guest_name: String,
    pub session_id: SessionId,
    pub orders: Vec<OrderId>,
    pub items: Vec<OrderItem>,
    pub subtotal: Decimal,
    pub tax_rate: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: BillId,
    pub table_id: TableId,
    pub table_number: u32,
    pub guest_name: String,
    pub session_id: SessionId,
    pub orders: Vec<OrderId>,
    pub items: Vec<OrderItem>,
    pub subtotal: Decimal,
    pub tax_rate: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub status: BillStatus,
    pub payment_method: Option<PaymentMethod>,
    pub generated_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
    pub revision: u64,
}

/// Payload for recording a bill. Bills are issued already paid.
#[derive(Debug, Clone)]
pub struct BillCreate {
    pub draft: BillDraft,
    pub payment_method: PaymentMethod,
    pub at: DateTime<Utc>,
}

/// Bills are never edited after they are issued.
#[derive(Debug)]
pub enum BillUpdate {}

/// Bills accept no actions.
#[derive(Debug)]
pub enum BillAction {}
