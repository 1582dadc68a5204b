use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable};

/// The aggregated monthly bill for a credit card.
///
/// At most one invoice exists per (card, reference month); invoices are
/// created lazily the first time a purchase needs one. `total_amount` is
/// derived from the linked card transactions and overwritten on every
/// recalculation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    pub id: Uuid,
    pub card_id: Uuid,
    /// First day of the calendar month this invoice represents.
    pub reference_month: NaiveDate,
    pub closing_date: NaiveDate,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub paid_amount: f64,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub is_closed: bool,
}

impl Invoice {
    pub fn new(
        card_id: Uuid,
        reference_month: NaiveDate,
        closing_date: NaiveDate,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            card_id,
            reference_month,
            closing_date,
            due_date,
            total_amount: 0.0,
            paid_amount: 0.0,
            is_paid: false,
            is_closed: false,
        }
    }

    /// Adds a payment, flipping `is_paid` once the total is covered.
    pub fn register_payment(&mut self, amount: f64) {
        self.paid_amount += amount;
        if self.paid_amount >= self.total_amount {
            self.is_paid = true;
        }
    }

    pub fn remaining(&self) -> f64 {
        (self.total_amount - self.paid_amount).max(0.0)
    }

    pub fn status(&self) -> InvoiceStatus {
        if self.is_paid {
            InvoiceStatus::Paid
        } else if self.is_closed {
            InvoiceStatus::Closed
        } else {
            InvoiceStatus::Open
        }
    }
}

impl Identifiable for Invoice {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Invoice {
    fn display_label(&self) -> String {
        format!(
            "{} ({:?})",
            self.reference_month.format("%Y-%m"),
            self.status()
        )
    }
}

/// Lifecycle of an invoice: open for new purchases, closed awaiting payment,
/// then paid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum InvoiceStatus {
    Open,
    Closed,
    Paid,
}
