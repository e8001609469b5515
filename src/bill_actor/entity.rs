//! [`Document`] implementation for [`Bill`].
//!
//! Bills are append-only: they are issued paid, keyed by session (one bill per
//! session) and accept neither updates nor actions.

use super::error::BillError;
use crate::model::{Bill, BillAction, BillCreate, BillId, BillStatus, BillUpdate};
use async_trait::async_trait;
use resource_store::Document;
use rust_decimal::Decimal;

#[async_trait]
impl Document for Bill {
    type Id = BillId;
    type Create = BillCreate;
    type Update = BillUpdate;
    type Action = BillAction;
    type ActionResult = ();
    type Context = ();
    type Error = BillError;

    fn from_create_params(id: BillId, params: BillCreate) -> Result<Self, BillError> {
        let draft = params.draft;
        if draft.orders.is_empty() || draft.items.is_empty() {
            return Err(BillError::Validation(format!(
                "Nothing to bill for table {}",
                draft.table_number
            )));
        }
        if draft.total <= Decimal::ZERO || draft.subtotal + draft.tax != draft.total {
            return Err(BillError::Validation(format!(
                "Bill totals for table {} do not add up",
                draft.table_number
            )));
        }
        Ok(Self {
            id,
            table_id: draft.table_id,
            table_number: draft.table_number,
            guest_name: draft.guest_name,
            session_id: draft.session_id,
            orders: draft.orders,
            items: draft.items,
            subtotal: draft.subtotal,
            tax_rate: draft.tax_rate,
            tax: draft.tax,
            total: draft.total,
            status: BillStatus::Paid,
            payment_method: Some(params.payment_method),
            generated_at: params.at,
            paid_at: Some(params.at),
            revision: 0,
        })
    }

    fn revision(&self) -> u64 {
        self.revision
    }

    fn set_revision(&mut self, revision: u64) {
        self.revision = revision;
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.session_id.to_string())
    }

    async fn on_update(&mut self, update: BillUpdate, _ctx: &()) -> Result<(), BillError> {
        match update {}
    }

    async fn handle_action(&mut self, action: BillAction, _ctx: &()) -> Result<(), BillError> {
        match action {}
    }
}
