//! Invoice resolution, derived totals, and the payment lifecycle.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::billing::schedule::InvoiceSchedule;
use crate::book::Book;
use crate::domain::invoice::Invoice;
use crate::errors::FinanceError;

use super::{ServiceError, ServiceResult};

pub struct InvoiceService;

impl InvoiceService {
    /// Returns the invoice receiving a purchase made on `purchase_date`,
    /// creating it on first use with zero totals.
    ///
    /// Idempotent per (card, reference month): repeated calls return the
    /// same invoice id. The book aggregate is mutated atomically within one
    /// call, so no duplicate can be created for the same month.
    pub fn resolve(book: &mut Book, card_id: Uuid, purchase_date: NaiveDate) -> ServiceResult<Uuid> {
        let card = book
            .card(card_id)
            .ok_or_else(|| FinanceError::CardNotFound(card_id.to_string()))?;
        let schedule = InvoiceSchedule::for_purchase(purchase_date, card.closing_day, card.due_day);
        if let Some(existing) = book.invoice_for_month(card_id, schedule.reference_month) {
            return Ok(existing.id);
        }
        let invoice = Invoice::new(
            card_id,
            schedule.reference_month,
            schedule.closing_date,
            schedule.due_date,
        );
        let id = book.add_invoice(invoice);
        tracing::debug!(%card_id, reference_month = %schedule.reference_month, "created invoice");
        Ok(id)
    }

    /// Overwrites every invoice total for `card_id` with the sum of its
    /// linked card transactions. Callers invoke this after any insert or
    /// delete so the derived totals never drift from the rows.
    pub fn recalculate_totals(book: &mut Book, card_id: Uuid) -> ServiceResult<()> {
        if book.card(card_id).is_none() {
            return Err(FinanceError::CardNotFound(card_id.to_string()).into());
        }
        let invoice_ids: Vec<Uuid> = book
            .invoices
            .iter()
            .filter(|invoice| invoice.card_id == card_id)
            .map(|invoice| invoice.id)
            .collect();
        for invoice_id in invoice_ids {
            let total: f64 = book
                .card_transactions
                .iter()
                .filter(|txn| txn.invoice_id == invoice_id)
                .map(|txn| txn.amount)
                .sum();
            if let Some(invoice) = book.invoice_mut(invoice_id) {
                invoice.total_amount = total;
            }
        }
        book.touch();
        Ok(())
    }

    /// Registers a payment against an invoice; `is_paid` flips once the
    /// paid amount covers the total.
    pub fn pay(book: &mut Book, invoice_id: Uuid, amount: f64) -> ServiceResult<()> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ServiceError::Invalid(
                "Payment amount must be positive".into(),
            ));
        }
        let invoice = book
            .invoice_mut(invoice_id)
            .ok_or_else(|| FinanceError::InvoiceNotFound(invoice_id.to_string()))?;
        invoice.register_payment(amount);
        book.touch();
        Ok(())
    }

    /// Closing is an explicit action; nothing closes invoices by calendar.
    pub fn mark_closed(book: &mut Book, invoice_id: Uuid) -> ServiceResult<()> {
        let invoice = book
            .invoice_mut(invoice_id)
            .ok_or_else(|| FinanceError::InvoiceNotFound(invoice_id.to_string()))?;
        invoice.is_closed = true;
        book.touch();
        Ok(())
    }

    /// Invoices for one card, most recent reference month first.
    pub fn list_for_card(book: &Book, card_id: Uuid) -> Vec<&Invoice> {
        let mut invoices: Vec<&Invoice> = book
            .invoices
            .iter()
            .filter(|invoice| invoice.card_id == card_id)
            .collect();
        invoices.sort_by(|a, b| b.reference_month.cmp(&a.reference_month));
        invoices
    }
}
