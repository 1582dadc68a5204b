//! Validated CRUD for credit cards.

use uuid::Uuid;

use crate::book::Book;
use crate::domain::card::Card;

use super::{ServiceError, ServiceResult};

pub struct CardService;

impl CardService {
    pub fn add(book: &mut Book, card: Card) -> ServiceResult<Uuid> {
        Self::validate(book, None, &card)?;
        Ok(book.add_card(card))
    }

    /// Replaces the card's editable fields. Changing the closing day does
    /// not reassign purchases already linked to an invoice.
    pub fn edit(book: &mut Book, id: Uuid, changes: Card) -> ServiceResult<()> {
        Self::validate(book, Some(id), &changes)?;
        let card = book
            .card_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Card not found".into()))?;
        card.name = changes.name;
        card.bank = changes.bank;
        card.brand = changes.brand;
        card.card_limit = changes.card_limit;
        card.closing_day = changes.closing_day;
        card.due_day = changes.due_day;
        card.is_active = changes.is_active;
        card.color = changes.color;
        card.account_id = changes.account_id;
        book.touch();
        Ok(())
    }

    /// Removes the card along with its invoices and card transactions.
    pub fn remove(book: &mut Book, id: Uuid) -> ServiceResult<()> {
        let before = book.cards.len();
        book.cards.retain(|card| card.id != id);
        if book.cards.len() == before {
            return Err(ServiceError::Invalid("Card not found".into()));
        }
        book.card_transactions.retain(|txn| txn.card_id != id);
        book.invoices.retain(|invoice| invoice.card_id != id);
        book.touch();
        Ok(())
    }

    pub fn list(book: &Book) -> Vec<&Card> {
        book.cards.iter().collect()
    }

    fn validate(book: &Book, exclude: Option<Uuid>, card: &Card) -> ServiceResult<()> {
        if card.name.trim().is_empty() {
            return Err(ServiceError::Invalid("Card name must not be empty".into()));
        }
        if !(1..=31).contains(&card.closing_day) {
            return Err(ServiceError::Invalid(
                "Closing day must be between 1 and 31".into(),
            ));
        }
        if !(1..=31).contains(&card.due_day) {
            return Err(ServiceError::Invalid(
                "Due day must be between 1 and 31".into(),
            ));
        }
        if !card.card_limit.is_finite() || card.card_limit < 0.0 {
            return Err(ServiceError::Invalid(
                "Card limit must be a non-negative amount".into(),
            ));
        }
        if let Some(account_id) = card.account_id {
            if book.account(account_id).is_none() {
                return Err(ServiceError::Invalid(
                    "Linked account does not exist".into(),
                ));
            }
        }
        let normalized = card.name.trim().to_ascii_lowercase();
        let duplicate = book.cards.iter().any(|existing| {
            let name = existing.name.trim().to_ascii_lowercase();
            name == normalized && exclude.map_or(true, |id| existing.id != id)
        });
        if duplicate {
            Err(ServiceError::Invalid(format!(
                "Card `{}` already exists",
                card.name
            )))
        } else {
            Ok(())
        }
    }
}
