use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable, NamedEntity};

/// A credit card whose purchases aggregate into monthly invoices.
///
/// `closing_day` is the last day of the month a purchase still lands on the
/// current invoice; `due_day` is when that invoice's payment is due. Both are
/// days of month in `1..=31` and are clamped to shorter months when dates are
/// derived.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Card {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,
    pub brand: CardBrand,
    pub card_limit: f64,
    pub closing_day: u32,
    pub due_day: u32,
    #[serde(default = "Card::active_default")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Account the invoice is usually paid from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,
}

impl Card {
    pub fn new(
        name: impl Into<String>,
        brand: CardBrand,
        card_limit: f64,
        closing_day: u32,
        due_day: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            bank: None,
            brand,
            card_limit,
            closing_day,
            due_day,
            is_active: true,
            color: None,
            account_id: None,
        }
    }

    pub fn with_bank(mut self, bank: impl Into<String>) -> Self {
        self.bank = Some(bank.into());
        self
    }

    pub fn with_account(mut self, account_id: Uuid) -> Self {
        self.account_id = Some(account_id);
        self
    }

    fn active_default() -> bool {
        true
    }
}

impl Identifiable for Card {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Card {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Card {
    fn display_label(&self) -> String {
        format!("{} ({:?})", self.name, self.brand)
    }
}

/// Card network brands recognized by the tracker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CardBrand {
    Visa,
    Mastercard,
    Amex,
    Elo,
    Hipercard,
    Other,
}
