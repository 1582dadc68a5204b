//! Pure billing computations: invoice schedule arithmetic and installment
//! amount splitting. Nothing here touches the book or the filesystem.

pub mod installments;
pub mod schedule;

pub use installments::{split_amounts, InstallmentError, CUSTOM_SUM_TOLERANCE};
pub use schedule::{installment_invoice_date, InvoiceSchedule};
