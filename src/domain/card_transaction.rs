use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable};

/// A single charge on a credit card invoice.
///
/// Installment purchases produce one row per month, all sharing the original
/// `purchase_date` and description; only the invoice assignment advances
/// month by month. The first row of a group is the parent the siblings link
/// to for grouped deletion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardTransaction {
    pub id: Uuid,
    pub card_id: Uuid,
    pub invoice_id: Uuid,
    pub description: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    /// Original purchase date, shared by every installment of a purchase.
    pub purchase_date: NaiveDate,
    #[serde(default)]
    pub is_installment: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installment_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_installments: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_transaction_id: Option<Uuid>,
}

impl CardTransaction {
    pub fn new(
        card_id: Uuid,
        invoice_id: Uuid,
        description: impl Into<String>,
        amount: f64,
        purchase_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            card_id,
            invoice_id,
            description: description.into(),
            amount,
            category_id: None,
            purchase_date,
            is_installment: false,
            installment_number: None,
            total_installments: None,
            parent_transaction_id: None,
        }
    }

    /// Creates one row of an installment group.
    pub fn installment(
        card_id: Uuid,
        invoice_id: Uuid,
        description: impl Into<String>,
        amount: f64,
        purchase_date: NaiveDate,
        number: u32,
        total: u32,
    ) -> Self {
        let mut txn = Self::new(card_id, invoice_id, description, amount, purchase_date);
        txn.is_installment = true;
        txn.installment_number = Some(number);
        txn.total_installments = Some(total);
        txn
    }

    pub fn with_category(mut self, category_id: Option<Uuid>) -> Self {
        self.category_id = category_id;
        self
    }

    /// "3/12" style label for installment rows.
    pub fn installment_label(&self) -> Option<String> {
        match (self.installment_number, self.total_installments) {
            (Some(number), Some(total)) if self.is_installment => {
                Some(format!("{}/{}", number, total))
            }
            _ => None,
        }
    }
}

impl Identifiable for CardTransaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for CardTransaction {
    fn display_label(&self) -> String {
        match self.installment_label() {
            Some(label) => format!("{} ({})", self.description, label),
            None => self.description.clone(),
        }
    }
}
