use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Identifiable, NamedEntity};

/// Owner details for a book. At most one profile exists per book.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: String,
    pub document_number: String,
    pub document_kind: DocumentKind,
}

impl Profile {
    pub fn new(
        full_name: impl Into<String>,
        document_number: impl Into<String>,
        document_kind: DocumentKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            full_name: full_name.into(),
            document_number: document_number.into(),
            document_kind,
        }
    }
}

impl Identifiable for Profile {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Profile {
    fn name(&self) -> &str {
        &self.full_name
    }
}

/// Whether the owner registered as an individual or a company.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DocumentKind {
    Individual,
    Company,
}
