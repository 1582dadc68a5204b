use uuid::Uuid;

use crate::book::Book;
use crate::domain::category::{Category, Tag};

use super::{ServiceError, ServiceResult};

pub struct CategoryService;

impl CategoryService {
    pub fn add(book: &mut Book, category: Category) -> ServiceResult<Uuid> {
        Self::validate_name(book, None, &category.name)?;
        Ok(book.add_category(category))
    }

    pub fn edit(book: &mut Book, id: Uuid, changes: Category) -> ServiceResult<()> {
        Self::validate_name(book, Some(id), &changes.name)?;
        let category = book
            .categories
            .iter_mut()
            .find(|category| category.id == id)
            .ok_or_else(|| ServiceError::Invalid("Category not found".into()))?;
        category.name = changes.name;
        category.kind = changes.kind;
        category.color = changes.color;
        category.icon = changes.icon;
        book.touch();
        Ok(())
    }

    pub fn remove(book: &mut Book, id: Uuid) -> ServiceResult<()> {
        let category = book
            .category(id)
            .ok_or_else(|| ServiceError::Invalid("Category not found".into()))?;
        if category.is_system {
            return Err(ServiceError::Invalid(
                "System categories cannot be removed".into(),
            ));
        }
        let referenced = book
            .transactions
            .iter()
            .any(|txn| txn.category_id == Some(id))
            || book
                .card_transactions
                .iter()
                .any(|txn| txn.category_id == Some(id))
            || book
                .fixed_bills
                .iter()
                .any(|bill| bill.category_id == Some(id));
        if referenced {
            return Err(ServiceError::Invalid(
                "Category is still in use".into(),
            ));
        }
        book.categories.retain(|category| category.id != id);
        book.touch();
        Ok(())
    }

    pub fn list(book: &Book) -> Vec<&Category> {
        book.categories.iter().collect()
    }

    fn validate_name(book: &Book, exclude: Option<Uuid>, candidate: &str) -> ServiceResult<()> {
        if candidate.trim().is_empty() {
            return Err(ServiceError::Invalid(
                "Category name must not be empty".into(),
            ));
        }
        let normalized = candidate.trim().to_ascii_lowercase();
        let duplicate = book.categories.iter().any(|category| {
            let name = category.name.trim().to_ascii_lowercase();
            name == normalized && exclude.map_or(true, |id| category.id != id)
        });
        if duplicate {
            Err(ServiceError::Invalid(format!(
                "Category `{}` already exists",
                candidate
            )))
        } else {
            Ok(())
        }
    }
}

pub struct TagService;

impl TagService {
    pub fn add(book: &mut Book, tag: Tag) -> ServiceResult<Uuid> {
        if tag.name.trim().is_empty() {
            return Err(ServiceError::Invalid("Tag name must not be empty".into()));
        }
        let normalized = tag.name.trim().to_ascii_lowercase();
        if book
            .tags
            .iter()
            .any(|existing| existing.name.trim().to_ascii_lowercase() == normalized)
        {
            return Err(ServiceError::Invalid(format!(
                "Tag `{}` already exists",
                tag.name
            )));
        }
        Ok(book.add_tag(tag))
    }

    pub fn remove(book: &mut Book, id: Uuid) -> ServiceResult<()> {
        let before = book.tags.len();
        book.tags.retain(|tag| tag.id != id);
        if book.tags.len() == before {
            return Err(ServiceError::Invalid("Tag not found".into()));
        }
        book.touch();
        Ok(())
    }

    pub fn list(book: &Book) -> Vec<&Tag> {
        book.tags.iter().collect()
    }
}
