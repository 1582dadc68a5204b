mod common;

use chrono::NaiveDate;
use finance_core::{
    book::Book,
    core::services::{InvoiceService, NewPurchase, PurchaseService},
    domain::{Card, CardBrand, InvoiceStatus},
};
use uuid::Uuid;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn book_with_card() -> (Book, Uuid) {
    let mut book = Book::new("Household");
    let card_id = book.add_card(Card::new("Platinum", CardBrand::Visa, 5000.0, 10, 5));
    (book, card_id)
}

fn purchase(book: &mut Book, card_id: Uuid, amount: f64, purchase_date: NaiveDate) {
    PurchaseService::create(
        book,
        NewPurchase {
            card_id,
            description: "Purchase".into(),
            amount,
            category_id: None,
            purchase_date,
            installments: None,
        },
    )
    .expect("create purchase");
}

#[test]
fn resolving_the_same_month_twice_reuses_one_invoice() {
    let (mut book, card_id) = book_with_card();
    let first = InvoiceService::resolve(&mut book, card_id, date(2024, 3, 15)).expect("resolve");
    let second = InvoiceService::resolve(&mut book, card_id, date(2024, 3, 20)).expect("resolve");
    assert_eq!(first, second);
    assert_eq!(book.invoices.len(), 1);
}

#[test]
fn partial_then_full_payment_flips_the_invoice_to_paid() {
    let (mut book, card_id) = book_with_card();
    purchase(&mut book, card_id, 300.0, date(2024, 3, 15));
    let invoice_id = book.invoices[0].id;

    InvoiceService::pay(&mut book, invoice_id, 120.0).expect("partial payment");
    {
        let invoice = book.invoice(invoice_id).expect("invoice");
        assert_eq!(invoice.paid_amount, 120.0);
        assert!(!invoice.is_paid);
        assert_eq!(invoice.remaining(), 180.0);
    }

    InvoiceService::pay(&mut book, invoice_id, 180.0).expect("final payment");
    let invoice = book.invoice(invoice_id).expect("invoice");
    assert!(invoice.is_paid);
    assert_eq!(invoice.status(), InvoiceStatus::Paid);
}

#[test]
fn non_positive_payments_are_rejected() {
    let (mut book, card_id) = book_with_card();
    purchase(&mut book, card_id, 300.0, date(2024, 3, 15));
    let invoice_id = book.invoices[0].id;

    assert!(InvoiceService::pay(&mut book, invoice_id, 0.0).is_err());
    assert!(InvoiceService::pay(&mut book, invoice_id, -10.0).is_err());
    assert_eq!(book.invoices[0].paid_amount, 0.0);
}

#[test]
fn closing_an_invoice_changes_its_status_only() {
    let (mut book, card_id) = book_with_card();
    purchase(&mut book, card_id, 300.0, date(2024, 3, 15));
    let invoice_id = book.invoices[0].id;

    InvoiceService::mark_closed(&mut book, invoice_id).expect("close invoice");
    let invoice = book.invoice(invoice_id).expect("invoice");
    assert!(invoice.is_closed);
    assert!(!invoice.is_paid);
    assert_eq!(invoice.status(), InvoiceStatus::Closed);
    assert_eq!(invoice.total_amount, 300.0);
}

#[test]
fn totals_follow_purchases_and_deletions() {
    let (mut book, card_id) = book_with_card();
    purchase(&mut book, card_id, 100.0, date(2024, 3, 12));
    purchase(&mut book, card_id, 50.0, date(2024, 3, 18));

    // Both days fall after the closing day, so the rows share one invoice.
    assert_eq!(book.invoices.len(), 1);
    assert_eq!(book.invoices[0].total_amount, 150.0);

    let row_id = book.card_transactions[0].id;
    PurchaseService::delete(&mut book, row_id, false).expect("delete row");
    assert_eq!(book.invoices[0].total_amount, 50.0);
}

#[test]
fn invoice_listing_is_newest_first() {
    let (mut book, card_id) = book_with_card();
    purchase(&mut book, card_id, 10.0, date(2024, 1, 5));
    purchase(&mut book, card_id, 10.0, date(2024, 3, 5));
    purchase(&mut book, card_id, 10.0, date(2024, 2, 5));

    let invoices = InvoiceService::list_for_card(&book, card_id);
    let months: Vec<NaiveDate> = invoices.iter().map(|i| i.reference_month).collect();
    assert_eq!(
        months,
        vec![date(2024, 3, 1), date(2024, 2, 1), date(2024, 1, 1)]
    );
}

#[test]
fn lifecycle_state_survives_persistence() {
    let (mut manager, _config) = common::setup_test_env();
    manager.create("household").expect("create book");

    let invoice_id = {
        let book = manager.current.as_mut().expect("current book");
        let card_id = book.add_card(Card::new("Platinum", CardBrand::Visa, 5000.0, 10, 5));
        purchase(book, card_id, 300.0, date(2024, 3, 15));
        let invoice_id = book.invoices[0].id;
        InvoiceService::pay(book, invoice_id, 120.0).expect("partial payment");
        InvoiceService::mark_closed(book, invoice_id).expect("close invoice");
        invoice_id
    };
    manager.save().expect("save book");

    manager.clear();
    manager.load("household").expect("reload book");
    let book = manager.current.as_ref().expect("current book");
    let invoice = book.invoice(invoice_id).expect("invoice");
    assert_eq!(invoice.paid_amount, 120.0);
    assert!(invoice.is_closed);
    assert_eq!(invoice.status(), InvoiceStatus::Closed);
}
