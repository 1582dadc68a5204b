//! Date arithmetic deciding which monthly invoice a purchase belongs to.

use chrono::{Datelike, NaiveDate};

/// Reference month plus the closing and due dates derived for one invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceSchedule {
    /// First day of the calendar month the invoice represents.
    pub reference_month: NaiveDate,
    pub closing_date: NaiveDate,
    pub due_date: NaiveDate,
}

impl InvoiceSchedule {
    /// Derives the invoice receiving a purchase made on `purchase_date` for
    /// a card closing on `closing_day` and due on `due_day`.
    pub fn for_purchase(purchase_date: NaiveDate, closing_day: u32, due_day: u32) -> Self {
        let reference = reference_month(purchase_date, closing_day);
        Self::for_reference_month(reference, closing_day, due_day)
    }

    /// Computes closing and due dates for an already-known reference month.
    ///
    /// The due date falls inside the reference month only when the due day
    /// comes after the closing day; otherwise it rolls into the next month.
    pub fn for_reference_month(reference_month: NaiveDate, closing_day: u32, due_day: u32) -> Self {
        let closing_date = with_day_clamped(reference_month, closing_day);
        let due_base = if due_day > closing_day {
            reference_month
        } else {
            add_months(reference_month, 1)
        };
        let due_date = with_day_clamped(due_base, due_day);
        Self {
            reference_month,
            closing_date,
            due_date,
        }
    }
}

/// First day of the month whose invoice receives a purchase made on `date`.
/// Purchases after the closing day roll into the following month.
pub fn reference_month(date: NaiveDate, closing_day: u32) -> NaiveDate {
    let base = if date.day() > closing_day {
        add_months(date, 1)
    } else {
        date
    };
    start_of_month(base)
}

/// Date used to resolve the invoice for installment `number` (1-based): the
/// purchase date advanced one calendar month per elapsed installment.
pub fn installment_invoice_date(purchase_date: NaiveDate, number: u32) -> NaiveDate {
    if number <= 1 {
        purchase_date
    } else {
        add_months(purchase_date, number as i32 - 1)
    }
}

/// Shifts `date` by `months`, clamping the day to the target month's length
/// (Jan 31 + 1 month = Feb 29 in a leap year).
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let zero_based = date.year() * 12 + date.month() as i32 - 1 + months;
    let year = zero_based.div_euclid(12);
    let month = (zero_based.rem_euclid(12) + 1) as u32;
    clamped(year, month, date.day())
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    clamped(date.year(), date.month(), 1)
}

fn with_day_clamped(date: NaiveDate, day: u32) -> NaiveDate {
    clamped(date.year(), date.month(), day)
}

fn clamped(year: i32, month: u32, day: u32) -> NaiveDate {
    let day = day.clamp(1, last_day_of_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn last_day_of_month(year: i32, month: u32) -> u32 {
    for day in (28..=31).rev() {
        if NaiveDate::from_ymd_opt(year, month, day).is_some() {
            return day;
        }
    }
    28
}
