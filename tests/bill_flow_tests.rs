mod common;

use chrono::NaiveDate;
use finance_core::{
    core::services::FixedBillService,
    domain::{Account, AccountKind, BillFrequency, FixedBill, TransactionKind},
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[test]
fn marking_a_bill_paid_rolls_it_forward_and_debits_the_account() {
    let (mut manager, _config) = common::setup_test_env();
    manager.create("household").expect("create book");

    let (bill_id, account_id) = {
        let book = manager.current.as_mut().expect("current book");
        let account_id = book.add_account(
            Account::new("Checking", AccountKind::Checking).with_balance(2000.0),
        );
        let mut bill = FixedBill::new("Rent", 900.0, 5, BillFrequency::Monthly, date(2024, 3, 5));
        bill.account_id = Some(account_id);
        let bill_id = FixedBillService::add(book, bill).expect("add bill");
        (bill_id, account_id)
    };

    {
        let book = manager.current.as_mut().expect("current book");
        FixedBillService::mark_paid(book, bill_id, Some(account_id), date(2024, 3, 5))
            .expect("mark bill paid");
    }
    manager.save().expect("save book");

    manager.clear();
    manager.load("household").expect("reload book");
    let book = manager.current.as_ref().expect("current book");

    let bill = book.fixed_bill(bill_id).expect("bill");
    assert_eq!(bill.next_due_date, date(2024, 4, 5));
    assert!(!bill.is_paid);

    let account = book.account(account_id).expect("account");
    assert_eq!(account.balance, 1100.0);

    let payment = book
        .transactions
        .iter()
        .find(|txn| txn.description.contains("Rent"))
        .expect("payment transaction");
    assert_eq!(payment.kind, TransactionKind::Expense);
    assert!(payment.is_fixed);
    assert_eq!(payment.date, date(2024, 3, 5));
}

#[test]
fn due_by_filters_upcoming_bills() {
    let (mut manager, _config) = common::setup_test_env();
    manager.create("household").expect("create book");
    let book = manager.current.as_mut().expect("current book");

    FixedBillService::add(
        book,
        FixedBill::new("Rent", 900.0, 5, BillFrequency::Monthly, date(2024, 3, 5)),
    )
    .expect("add rent");
    FixedBillService::add(
        book,
        FixedBill::new("Insurance", 120.0, 20, BillFrequency::Monthly, date(2024, 3, 20)),
    )
    .expect("add insurance");

    let due = FixedBillService::due_by(book, date(2024, 3, 10));
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].name, "Rent");
}
