pub mod account;
pub mod card;
pub mod card_transaction;
pub mod category;
pub mod common;
pub mod fixed_bill;
pub mod invoice;
pub mod profile;
pub mod transaction;

pub use account::{Account, AccountKind};
pub use card::{Card, CardBrand};
pub use card_transaction::CardTransaction;
pub use category::{Category, Tag};
pub use common::{Displayable, Identifiable, NamedEntity};
pub use fixed_bill::{BillFrequency, FixedBill};
pub use invoice::{Invoice, InvoiceStatus};
pub use profile::{DocumentKind, Profile};
pub use transaction::{Transaction, TransactionKind};
