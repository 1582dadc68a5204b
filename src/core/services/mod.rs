pub mod account_service;
pub mod bill_service;
pub mod card_service;
pub mod category_service;
pub mod invoice_service;
pub mod purchase_service;
pub mod transaction_service;

pub use account_service::AccountService;
pub use bill_service::FixedBillService;
pub use card_service::CardService;
pub use category_service::{CategoryService, TagService};
pub use invoice_service::InvoiceService;
pub use purchase_service::{InstallmentRequest, NewPurchase, PurchaseService};
pub use transaction_service::TransactionService;

use crate::billing::installments::InstallmentError;
use crate::errors::FinanceError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Finance(#[from] FinanceError),
    #[error(transparent)]
    Installments(#[from] InstallmentError),
    #[error("{0}")]
    Invalid(String),
}
