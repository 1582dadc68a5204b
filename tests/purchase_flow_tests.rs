mod common;

use chrono::NaiveDate;
use finance_core::{
    book::Book,
    core::services::{InstallmentRequest, InvoiceService, NewPurchase, PurchaseService},
    domain::{Card, CardBrand},
};
use uuid::Uuid;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn book_with_card(closing_day: u32, due_day: u32) -> (Book, Uuid) {
    let mut book = Book::new("Household");
    let card_id = book.add_card(Card::new("Platinum", CardBrand::Visa, 5000.0, closing_day, due_day));
    (book, card_id)
}

#[test]
fn single_purchase_lands_on_the_expected_invoice() {
    let (mut book, card_id) = book_with_card(10, 5);
    let ids = PurchaseService::create(
        &mut book,
        NewPurchase {
            card_id,
            description: "Groceries".into(),
            amount: 250.0,
            category_id: None,
            purchase_date: date(2024, 3, 15),
            installments: None,
        },
    )
    .expect("create purchase");
    assert_eq!(ids.len(), 1);

    let invoices = InvoiceService::list_for_card(&book, card_id);
    assert_eq!(invoices.len(), 1);
    let invoice = invoices[0];
    assert_eq!(invoice.reference_month, date(2024, 4, 1));
    assert_eq!(invoice.closing_date, date(2024, 4, 10));
    assert_eq!(invoice.due_date, date(2024, 5, 5));
    assert_eq!(invoice.total_amount, 250.0);
}

#[test]
fn purchase_on_closing_day_stays_in_the_current_cycle() {
    let (mut book, card_id) = book_with_card(10, 5);
    PurchaseService::create(
        &mut book,
        NewPurchase {
            card_id,
            description: "Fuel".into(),
            amount: 80.0,
            category_id: None,
            purchase_date: date(2024, 3, 10),
            installments: None,
        },
    )
    .expect("create purchase");

    let invoices = InvoiceService::list_for_card(&book, card_id);
    assert_eq!(invoices[0].reference_month, date(2024, 3, 1));
}

#[test]
fn installments_spread_across_consecutive_invoices() {
    let (mut book, card_id) = book_with_card(10, 5);
    let ids = PurchaseService::create(
        &mut book,
        NewPurchase {
            card_id,
            description: "Laptop".into(),
            amount: 100.0,
            category_id: None,
            purchase_date: date(2024, 3, 15),
            installments: Some(InstallmentRequest {
                count: 3,
                custom_values: None,
            }),
        },
    )
    .expect("create installments");
    assert_eq!(ids.len(), 3);

    let mut invoices = InvoiceService::list_for_card(&book, card_id);
    invoices.sort_by_key(|invoice| invoice.reference_month);
    let months: Vec<NaiveDate> = invoices.iter().map(|i| i.reference_month).collect();
    assert_eq!(
        months,
        vec![date(2024, 4, 1), date(2024, 5, 1), date(2024, 6, 1)]
    );

    let mut rows: Vec<_> = PurchaseService::list_for_card(&book, card_id);
    rows.sort_by_key(|row| row.installment_number);
    let amounts: Vec<f64> = rows.iter().map(|row| row.amount).collect();
    assert_eq!(amounts, vec![33.34, 33.33, 33.33]);
    assert!((amounts.iter().sum::<f64>() - 100.0).abs() < 1e-9);

    // Every row keeps the original purchase date.
    assert!(rows.iter().all(|row| row.purchase_date == date(2024, 3, 15)));

    // Later rows point back at the first one.
    let parent_id = rows[0].id;
    assert!(rows[0].parent_transaction_id.is_none());
    assert!(rows[1..]
        .iter()
        .all(|row| row.parent_transaction_id == Some(parent_id)));
}

#[test]
fn custom_installment_values_are_honored() {
    let (mut book, card_id) = book_with_card(10, 5);
    PurchaseService::create(
        &mut book,
        NewPurchase {
            card_id,
            description: "Sofa".into(),
            amount: 900.0,
            category_id: None,
            purchase_date: date(2024, 3, 15),
            installments: Some(InstallmentRequest {
                count: 2,
                custom_values: Some(vec![500.0, 400.0]),
            }),
        },
    )
    .expect("create installments");

    let mut rows: Vec<_> = PurchaseService::list_for_card(&book, card_id);
    rows.sort_by_key(|row| row.installment_number);
    assert_eq!(rows[0].amount, 500.0);
    assert_eq!(rows[1].amount, 400.0);
}

#[test]
fn rejected_custom_values_leave_the_book_untouched() {
    let (mut book, card_id) = book_with_card(10, 5);
    let result = PurchaseService::create(
        &mut book,
        NewPurchase {
            card_id,
            description: "Sofa".into(),
            amount: 900.0,
            category_id: None,
            purchase_date: date(2024, 3, 15),
            installments: Some(InstallmentRequest {
                count: 2,
                custom_values: Some(vec![500.0, 300.0]),
            }),
        },
    );
    assert!(result.is_err());
    assert!(book.card_transactions.is_empty());
    assert!(book.invoices.is_empty());
}

#[test]
fn deleting_the_group_removes_every_installment_and_recalculates() {
    let (mut book, card_id) = book_with_card(10, 5);
    PurchaseService::create(
        &mut book,
        NewPurchase {
            card_id,
            description: "Laptop".into(),
            amount: 100.0,
            category_id: None,
            purchase_date: date(2024, 3, 15),
            installments: Some(InstallmentRequest {
                count: 3,
                custom_values: None,
            }),
        },
    )
    .expect("create installments");

    let middle = PurchaseService::list_for_card(&book, card_id)
        .iter()
        .find(|row| row.installment_number == Some(2))
        .map(|row| row.id)
        .expect("middle installment");
    let removed = PurchaseService::delete(&mut book, middle, true).expect("delete group");
    assert_eq!(removed, 3);
    assert!(book.card_transactions.is_empty());
    assert!(book
        .invoices
        .iter()
        .all(|invoice| invoice.total_amount == 0.0));
}

#[test]
fn end_to_end_purchase_survives_persistence() {
    let (mut manager, _config) = common::setup_test_env();
    manager.create("household").expect("create book");

    {
        let book = manager.current.as_mut().expect("current book");
        let card_id = book.add_card(Card::new("Platinum", CardBrand::Visa, 5000.0, 10, 5));
        PurchaseService::create(
            book,
            NewPurchase {
                card_id,
                description: "Laptop".into(),
                amount: 100.0,
                category_id: None,
                purchase_date: date(2024, 3, 15),
                installments: Some(InstallmentRequest {
                    count: 3,
                    custom_values: None,
                }),
            },
        )
        .expect("create installments");
    }
    manager.save().expect("save book");

    manager.clear();
    manager.load("household").expect("reload book");
    let book = manager.current.as_ref().expect("current book");
    assert_eq!(book.card_transactions.len(), 3);
    assert_eq!(book.invoices.len(), 3);
    let total: f64 = book.invoices.iter().map(|i| i.total_amount).sum();
    assert!((total - 100.0).abs() < 1e-9);
}
