//! Ordinary account movements, with balances kept in step.

use uuid::Uuid;

use crate::book::Book;
use crate::domain::transaction::Transaction;
use crate::errors::FinanceError;

use super::{ServiceError, ServiceResult};

pub struct TransactionService;

impl TransactionService {
    /// Inserts a movement and applies its signed amount to the linked
    /// account balance, when one is linked.
    pub fn add(book: &mut Book, transaction: Transaction) -> ServiceResult<Uuid> {
        if transaction.description.trim().is_empty() {
            return Err(ServiceError::Invalid(
                "Transaction description must not be empty".into(),
            ));
        }
        if !transaction.amount.is_finite() || transaction.amount <= 0.0 {
            return Err(ServiceError::Invalid(
                "Transaction amount must be positive".into(),
            ));
        }
        if let Some(category_id) = transaction.category_id {
            if book.category(category_id).is_none() {
                return Err(FinanceError::CategoryNotFound(category_id.to_string()).into());
            }
        }
        if let Some(account_id) = transaction.account_id {
            let delta = transaction.signed_amount();
            let account = book
                .account_mut(account_id)
                .ok_or_else(|| FinanceError::AccountNotFound(account_id.to_string()))?;
            account.balance += delta;
        }
        Ok(book.add_transaction(transaction))
    }

    /// Removes a movement, reverting its effect on the account balance.
    pub fn remove(book: &mut Book, id: Uuid) -> ServiceResult<Transaction> {
        let position = book
            .transactions
            .iter()
            .position(|txn| txn.id == id)
            .ok_or_else(|| ServiceError::Invalid("Transaction not found".into()))?;
        let removed = book.transactions.remove(position);
        if let Some(account_id) = removed.account_id {
            if let Some(account) = book.account_mut(account_id) {
                account.balance -= removed.signed_amount();
            }
        }
        book.touch();
        Ok(removed)
    }

    pub fn list(book: &Book) -> Vec<&Transaction> {
        book.transactions.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::{Account, AccountKind};
    use crate::domain::transaction::TransactionKind;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn balances_follow_income_and_expense() {
        let mut book = Book::new("Movements");
        let account_id = book.add_account(Account::new("Checking", AccountKind::Checking));

        TransactionService::add(
            &mut book,
            Transaction::new("Salary", 1000.0, TransactionKind::Income, date())
                .with_account(account_id),
        )
        .unwrap();
        TransactionService::add(
            &mut book,
            Transaction::new("Groceries", 120.0, TransactionKind::Expense, date())
                .with_account(account_id),
        )
        .unwrap();
        assert_eq!(book.account(account_id).unwrap().balance, 880.0);
    }

    #[test]
    fn removal_reverts_the_balance() {
        let mut book = Book::new("Movements");
        let account_id = book.add_account(Account::new("Checking", AccountKind::Checking));
        let txn_id = TransactionService::add(
            &mut book,
            Transaction::new("Groceries", 120.0, TransactionKind::Expense, date())
                .with_account(account_id),
        )
        .unwrap();

        let removed = TransactionService::remove(&mut book, txn_id).unwrap();
        assert_eq!(removed.id, txn_id);
        assert_eq!(book.account(account_id).unwrap().balance, 0.0);
    }

    #[test]
    fn unknown_account_fails_before_insert() {
        let mut book = Book::new("Movements");
        let err = TransactionService::add(
            &mut book,
            Transaction::new("Salary", 1000.0, TransactionKind::Income, date())
                .with_account(Uuid::new_v4()),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Finance(FinanceError::AccountNotFound(_))
        ));
        assert!(book.transactions.is_empty());
    }
}
