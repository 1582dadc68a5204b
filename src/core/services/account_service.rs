use uuid::Uuid;

use crate::book::Book;
use crate::domain::account::Account;

use super::{ServiceError, ServiceResult};

pub struct AccountService;

impl AccountService {
    pub fn add(book: &mut Book, account: Account) -> ServiceResult<Uuid> {
        Self::validate_name(book, None, &account.name)?;
        Ok(book.add_account(account))
    }

    pub fn edit(book: &mut Book, id: Uuid, changes: Account) -> ServiceResult<()> {
        Self::validate_name(book, Some(id), &changes.name)?;
        let account = book
            .account_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Account not found".into()))?;
        account.name = changes.name;
        account.kind = changes.kind;
        account.balance = changes.balance;
        account.color = changes.color;
        book.touch();
        Ok(())
    }

    pub fn remove(book: &mut Book, id: Uuid) -> ServiceResult<()> {
        if book
            .transactions
            .iter()
            .any(|txn| txn.account_id == Some(id))
        {
            return Err(ServiceError::Invalid(
                "Account has linked transactions".into(),
            ));
        }
        if book.cards.iter().any(|card| card.account_id == Some(id)) {
            return Err(ServiceError::Invalid("Account has linked cards".into()));
        }
        let before = book.accounts.len();
        book.accounts.retain(|account| account.id != id);
        if book.accounts.len() == before {
            return Err(ServiceError::Invalid("Account not found".into()));
        }
        book.touch();
        Ok(())
    }

    pub fn list(book: &Book) -> Vec<&Account> {
        book.accounts.iter().collect()
    }

    fn validate_name(book: &Book, exclude: Option<Uuid>, candidate: &str) -> ServiceResult<()> {
        if candidate.trim().is_empty() {
            return Err(ServiceError::Invalid(
                "Account name must not be empty".into(),
            ));
        }
        let normalized = candidate.trim().to_ascii_lowercase();
        let duplicate = book.accounts.iter().any(|account| {
            let name = account.name.trim().to_ascii_lowercase();
            name == normalized && exclude.map_or(true, |id| account.id != id)
        });
        if duplicate {
            Err(ServiceError::Invalid(format!(
                "Account `{}` already exists",
                candidate
            )))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::AccountKind;
    use crate::domain::card::{Card, CardBrand};

    #[test]
    fn duplicate_names_are_rejected() {
        let mut book = Book::new("Accounts");
        AccountService::add(&mut book, Account::new("Checking", AccountKind::Checking)).unwrap();
        let err = AccountService::add(&mut book, Account::new(" checking ", AccountKind::Cash))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(_)));
    }

    #[test]
    fn removal_blocked_while_cards_reference_account() {
        let mut book = Book::new("Accounts");
        let account_id =
            AccountService::add(&mut book, Account::new("Checking", AccountKind::Checking))
                .unwrap();
        let card =
            Card::new("Platinum", CardBrand::Visa, 5000.0, 10, 5).with_account(account_id);
        book.add_card(card);

        let err = AccountService::remove(&mut book, account_id).unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(ref message) if message.contains("cards")));
    }

    #[test]
    fn edit_replaces_fields() {
        let mut book = Book::new("Accounts");
        let id = AccountService::add(&mut book, Account::new("Checking", AccountKind::Checking))
            .unwrap();
        let changes = Account::new("Everyday", AccountKind::Checking).with_balance(320.5);
        AccountService::edit(&mut book, id, changes).unwrap();
        let account = book.account(id).unwrap();
        assert_eq!(account.name, "Everyday");
        assert_eq!(account.balance, 320.5);
    }
}
