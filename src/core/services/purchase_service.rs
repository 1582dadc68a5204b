//! Recording and deleting card purchases, single or in installments.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::billing::installments::{split_amounts, InstallmentError};
use crate::billing::schedule::installment_invoice_date;
use crate::book::Book;
use crate::domain::card_transaction::CardTransaction;
use crate::errors::FinanceError;

use super::{InvoiceService, ServiceError, ServiceResult};

/// Input describing a new card purchase.
#[derive(Debug, Clone)]
pub struct NewPurchase {
    pub card_id: Uuid,
    pub description: String,
    pub amount: f64,
    pub category_id: Option<Uuid>,
    pub purchase_date: NaiveDate,
    pub installments: Option<InstallmentRequest>,
}

/// Optional installment configuration for a purchase.
#[derive(Debug, Clone)]
pub struct InstallmentRequest {
    pub count: u32,
    /// Per-installment amounts chosen by the user instead of an equal split.
    pub custom_values: Option<Vec<f64>>,
}

pub struct PurchaseService;

impl PurchaseService {
    /// Validates the purchase, resolves one invoice per installment, inserts
    /// the rows, and refreshes the card's invoice totals. Returns the ids of
    /// the inserted rows, first installment first.
    ///
    /// Nothing is inserted when validation fails; the book is only mutated
    /// once the whole purchase is known to be well-formed.
    pub fn create(book: &mut Book, purchase: NewPurchase) -> ServiceResult<Vec<Uuid>> {
        let card = book
            .card(purchase.card_id)
            .ok_or_else(|| FinanceError::CardNotFound(purchase.card_id.to_string()))?;
        if !card.is_active {
            return Err(ServiceError::Invalid(format!(
                "Card `{}` is inactive",
                card.name
            )));
        }
        if purchase.description.trim().is_empty() {
            return Err(ServiceError::Invalid(
                "Purchase description must not be empty".into(),
            ));
        }
        if !purchase.amount.is_finite() || purchase.amount <= 0.0 {
            return Err(ServiceError::Invalid(
                "Purchase amount must be positive".into(),
            ));
        }
        if let Some(category_id) = purchase.category_id {
            if book.category(category_id).is_none() {
                return Err(FinanceError::CategoryNotFound(category_id.to_string()).into());
            }
        }

        let ids = match &purchase.installments {
            Some(request) if request.count == 0 => {
                return Err(InstallmentError::InvalidCount(0).into());
            }
            Some(request) if request.count == 1 => {
                // A one-installment request is stored as a plain purchase,
                // but its custom value must still reconcile with the total.
                split_amounts(purchase.amount, 1, request.custom_values.as_deref())?;
                vec![Self::insert_single(book, &purchase)?]
            }
            Some(request) => Self::insert_installments(book, &purchase, request)?,
            None => vec![Self::insert_single(book, &purchase)?],
        };
        InvoiceService::recalculate_totals(book, purchase.card_id)?;
        tracing::debug!(card_id = %purchase.card_id, rows = ids.len(), "recorded purchase");
        Ok(ids)
    }

    fn insert_single(book: &mut Book, purchase: &NewPurchase) -> ServiceResult<Uuid> {
        let invoice_id = InvoiceService::resolve(book, purchase.card_id, purchase.purchase_date)?;
        let txn = CardTransaction::new(
            purchase.card_id,
            invoice_id,
            purchase.description.clone(),
            purchase.amount,
            purchase.purchase_date,
        )
        .with_category(purchase.category_id);
        Ok(book.add_card_transaction(txn))
    }

    fn insert_installments(
        book: &mut Book,
        purchase: &NewPurchase,
        request: &InstallmentRequest,
    ) -> ServiceResult<Vec<Uuid>> {
        let amounts = split_amounts(
            purchase.amount,
            request.count,
            request.custom_values.as_deref(),
        )?;
        let mut ids = Vec::with_capacity(amounts.len());
        let mut parent: Option<Uuid> = None;
        for (index, amount) in amounts.iter().enumerate() {
            let number = index as u32 + 1;
            // Invoice assignment advances month by month; the stored row
            // keeps the original purchase date for display and grouping.
            let invoice_date = installment_invoice_date(purchase.purchase_date, number);
            let invoice_id = InvoiceService::resolve(book, purchase.card_id, invoice_date)?;
            let mut txn = CardTransaction::installment(
                purchase.card_id,
                invoice_id,
                purchase.description.clone(),
                *amount,
                purchase.purchase_date,
                number,
                request.count,
            )
            .with_category(purchase.category_id);
            txn.parent_transaction_id = parent;
            let id = book.add_card_transaction(txn);
            if parent.is_none() {
                parent = Some(id);
            }
            ids.push(id);
        }
        Ok(ids)
    }

    /// Removes one row, or the whole installment group when `whole_group` is
    /// set, then refreshes the card's invoice totals. Returns how many rows
    /// were removed.
    pub fn delete(book: &mut Book, id: Uuid, whole_group: bool) -> ServiceResult<usize> {
        let txn = book
            .card_transaction(id)
            .ok_or_else(|| ServiceError::Invalid("Card transaction not found".into()))?;
        let card_id = txn.card_id;
        let group_id = txn.parent_transaction_id.unwrap_or(txn.id);

        let before = book.card_transactions.len();
        if whole_group {
            book.card_transactions.retain(|row| {
                row.id != group_id && row.parent_transaction_id != Some(group_id)
            });
        } else {
            book.card_transactions.retain(|row| row.id != id);
        }
        let removed = before - book.card_transactions.len();
        book.touch();
        InvoiceService::recalculate_totals(book, card_id)?;
        Ok(removed)
    }

    /// Rows charged to one invoice, insertion order preserved.
    pub fn list_for_invoice(book: &Book, invoice_id: Uuid) -> Vec<&CardTransaction> {
        book.card_transactions
            .iter()
            .filter(|txn| txn.invoice_id == invoice_id)
            .collect()
    }

    /// Rows for one card, most recent purchase first.
    pub fn list_for_card(book: &Book, card_id: Uuid) -> Vec<&CardTransaction> {
        let mut rows: Vec<&CardTransaction> = book
            .card_transactions
            .iter()
            .filter(|txn| txn.card_id == card_id)
            .collect();
        rows.sort_by(|a, b| b.purchase_date.cmp(&a.purchase_date));
        rows
    }
}
