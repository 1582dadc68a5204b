//! The `Book` aggregate: one user's complete finance data set.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    Account, Card, CardTransaction, Category, FixedBill, Invoice, Profile, Tag, Transaction,
};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Everything the tracker knows for one user, persisted as a single JSON
/// document. Services mutate it through the accessors below; `updated_at`
/// follows every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub invoices: Vec<Invoice>,
    #[serde(default)]
    pub card_transactions: Vec<CardTransaction>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub fixed_bills: Vec<FixedBill>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Book::schema_version_default")]
    pub schema_version: u8,
}

impl Book {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            accounts: Vec::new(),
            cards: Vec::new(),
            invoices: Vec::new(),
            card_transactions: Vec::new(),
            transactions: Vec::new(),
            fixed_bills: Vec::new(),
            categories: Vec::new(),
            tags: Vec::new(),
            profile: None,
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_account(&mut self, account: Account) -> Uuid {
        let id = account.id;
        self.accounts.push(account);
        self.touch();
        id
    }

    pub fn add_card(&mut self, card: Card) -> Uuid {
        let id = card.id;
        self.cards.push(card);
        self.touch();
        id
    }

    pub fn add_invoice(&mut self, invoice: Invoice) -> Uuid {
        let id = invoice.id;
        self.invoices.push(invoice);
        self.touch();
        id
    }

    pub fn add_card_transaction(&mut self, transaction: CardTransaction) -> Uuid {
        let id = transaction.id;
        self.card_transactions.push(transaction);
        self.touch();
        id
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.transactions.push(transaction);
        self.touch();
        id
    }

    pub fn add_fixed_bill(&mut self, bill: FixedBill) -> Uuid {
        let id = bill.id;
        self.fixed_bills.push(bill);
        self.touch();
        id
    }

    pub fn add_category(&mut self, category: Category) -> Uuid {
        let id = category.id;
        self.categories.push(category);
        self.touch();
        id
    }

    pub fn add_tag(&mut self, tag: Tag) -> Uuid {
        let id = tag.id;
        self.tags.push(tag);
        self.touch();
        id
    }

    pub fn set_profile(&mut self, profile: Profile) {
        self.profile = Some(profile);
        self.touch();
    }

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    pub fn account_mut(&mut self, id: Uuid) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|account| account.id == id)
    }

    pub fn card(&self, id: Uuid) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn card_mut(&mut self, id: Uuid) -> Option<&mut Card> {
        self.cards.iter_mut().find(|card| card.id == id)
    }

    pub fn invoice(&self, id: Uuid) -> Option<&Invoice> {
        self.invoices.iter().find(|invoice| invoice.id == id)
    }

    pub fn invoice_mut(&mut self, id: Uuid) -> Option<&mut Invoice> {
        self.invoices.iter_mut().find(|invoice| invoice.id == id)
    }

    /// Invoice lookup by the (card, reference month) uniqueness key.
    pub fn invoice_for_month(&self, card_id: Uuid, reference_month: NaiveDate) -> Option<&Invoice> {
        self.invoices
            .iter()
            .find(|invoice| invoice.card_id == card_id && invoice.reference_month == reference_month)
    }

    pub fn card_transaction(&self, id: Uuid) -> Option<&CardTransaction> {
        self.card_transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn fixed_bill(&self, id: Uuid) -> Option<&FixedBill> {
        self.fixed_bills.iter().find(|bill| bill.id == id)
    }

    pub fn fixed_bill_mut(&mut self, id: Uuid) -> Option<&mut FixedBill> {
        self.fixed_bills.iter_mut().find(|bill| bill.id == id)
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn tag(&self, id: Uuid) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.id == id)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}
