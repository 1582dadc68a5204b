//! Fixed recurring bills and their payment flow.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::book::Book;
use crate::domain::fixed_bill::FixedBill;
use crate::domain::transaction::{Transaction, TransactionKind};

use super::{ServiceError, ServiceResult, TransactionService};

pub struct FixedBillService;

impl FixedBillService {
    pub fn add(book: &mut Book, bill: FixedBill) -> ServiceResult<Uuid> {
        Self::validate(book, None, &bill)?;
        Ok(book.add_fixed_bill(bill))
    }

    pub fn edit(book: &mut Book, id: Uuid, changes: FixedBill) -> ServiceResult<()> {
        Self::validate(book, Some(id), &changes)?;
        let bill = book
            .fixed_bill_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Fixed bill not found".into()))?;
        bill.name = changes.name;
        bill.amount = changes.amount;
        bill.due_day = changes.due_day;
        bill.frequency = changes.frequency;
        bill.next_due_date = changes.next_due_date;
        bill.account_id = changes.account_id;
        bill.category_id = changes.category_id;
        bill.importance = changes.importance;
        book.touch();
        Ok(())
    }

    pub fn remove(book: &mut Book, id: Uuid) -> ServiceResult<()> {
        let before = book.fixed_bills.len();
        book.fixed_bills.retain(|bill| bill.id != id);
        if book.fixed_bills.len() == before {
            return Err(ServiceError::Invalid("Fixed bill not found".into()));
        }
        book.touch();
        Ok(())
    }

    pub fn list(book: &Book) -> Vec<&FixedBill> {
        book.fixed_bills.iter().collect()
    }

    /// Bills not yet paid whose next due date is on or before `date`.
    pub fn due_by(book: &Book, date: NaiveDate) -> Vec<&FixedBill> {
        book.fixed_bills
            .iter()
            .filter(|bill| !bill.is_paid && bill.next_due_date <= date)
            .collect()
    }

    /// Records the bill payment as an expense movement against the chosen
    /// account (falling back to the bill's own account), then rolls the bill
    /// forward to its next occurrence. Returns the id of the recorded
    /// movement.
    pub fn mark_paid(
        book: &mut Book,
        bill_id: Uuid,
        account_id: Option<Uuid>,
        paid_on: NaiveDate,
    ) -> ServiceResult<Uuid> {
        let bill = book
            .fixed_bill(bill_id)
            .cloned()
            .ok_or_else(|| ServiceError::Invalid("Fixed bill not found".into()))?;

        let mut payment = Transaction::new(
            format!("Payment: {}", bill.name),
            bill.amount,
            TransactionKind::Expense,
            paid_on,
        );
        payment.account_id = account_id.or(bill.account_id);
        payment.category_id = bill.category_id;
        payment.is_fixed = true;
        let payment_id = TransactionService::add(book, payment)?;

        let next = bill.next_occurrence();
        if let Some(stored) = book.fixed_bill_mut(bill_id) {
            stored.next_due_date = next;
            stored.is_paid = false;
        }
        book.touch();
        tracing::debug!(%bill_id, next_due = %next, "fixed bill paid and rolled forward");
        Ok(payment_id)
    }

    fn validate(book: &Book, exclude: Option<Uuid>, bill: &FixedBill) -> ServiceResult<()> {
        if bill.name.trim().is_empty() {
            return Err(ServiceError::Invalid("Bill name must not be empty".into()));
        }
        if !bill.amount.is_finite() || bill.amount <= 0.0 {
            return Err(ServiceError::Invalid(
                "Bill amount must be positive".into(),
            ));
        }
        if !(1..=31).contains(&bill.due_day) {
            return Err(ServiceError::Invalid(
                "Due day must be between 1 and 31".into(),
            ));
        }
        if let Some(account_id) = bill.account_id {
            if book.account(account_id).is_none() {
                return Err(ServiceError::Invalid(
                    "Linked account does not exist".into(),
                ));
            }
        }
        let normalized = bill.name.trim().to_ascii_lowercase();
        let duplicate = book.fixed_bills.iter().any(|existing| {
            let name = existing.name.trim().to_ascii_lowercase();
            name == normalized && exclude.map_or(true, |id| existing.id != id)
        });
        if duplicate {
            Err(ServiceError::Invalid(format!(
                "Fixed bill `{}` already exists",
                bill.name
            )))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::{Account, AccountKind};
    use crate::domain::fixed_bill::BillFrequency;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn mark_paid_records_expense_and_rolls_forward() {
        let mut book = Book::new("Bills");
        let account_id = book.add_account(
            Account::new("Checking", AccountKind::Checking).with_balance(1000.0),
        );
        let mut bill = FixedBill::new("Rent", 900.0, 5, BillFrequency::Monthly, date(2024, 3, 5));
        bill.account_id = Some(account_id);
        let bill_id = FixedBillService::add(&mut book, bill).unwrap();

        let payment_id =
            FixedBillService::mark_paid(&mut book, bill_id, None, date(2024, 3, 5)).unwrap();

        let payment = book.transaction(payment_id).unwrap();
        assert_eq!(payment.description, "Payment: Rent");
        assert!(payment.is_fixed);
        assert_eq!(book.account(account_id).unwrap().balance, 100.0);

        let bill = book.fixed_bill(bill_id).unwrap();
        assert_eq!(bill.next_due_date, date(2024, 4, 5));
        assert!(!bill.is_paid);
    }

    #[test]
    fn due_by_skips_paid_and_future_bills() {
        let mut book = Book::new("Bills");
        let rent = FixedBill::new("Rent", 900.0, 5, BillFrequency::Monthly, date(2024, 3, 5));
        let later = FixedBill::new("Tax", 120.0, 20, BillFrequency::Yearly, date(2024, 6, 20));
        let mut paid = FixedBill::new("Gym", 60.0, 1, BillFrequency::Monthly, date(2024, 3, 1));
        paid.is_paid = true;
        FixedBillService::add(&mut book, rent).unwrap();
        FixedBillService::add(&mut book, later).unwrap();
        FixedBillService::add(&mut book, paid).unwrap();

        let due = FixedBillService::due_by(&book, date(2024, 3, 10));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].name, "Rent");
    }

    #[test]
    fn rejects_invalid_amount_and_duplicate_name() {
        let mut book = Book::new("Bills");
        let bill = FixedBill::new("Rent", 0.0, 5, BillFrequency::Monthly, date(2024, 3, 5));
        assert!(FixedBillService::add(&mut book, bill).is_err());

        let rent = FixedBill::new("Rent", 900.0, 5, BillFrequency::Monthly, date(2024, 3, 5));
        FixedBillService::add(&mut book, rent).unwrap();
        let dup = FixedBill::new("rent", 400.0, 6, BillFrequency::Monthly, date(2024, 3, 6));
        assert!(FixedBillService::add(&mut book, dup).is_err());
    }
}
