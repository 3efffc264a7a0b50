mod common;

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use spese_core::expenses::{
    ExpenseError, ExpenseFilters, ExpenseServiceTrait, ExpenseUpdate, NewExpense,
};

fn new_expense(user_id: &str, date: (i32, u32, u32), vendor: &str, amount: &str) -> NewExpense {
    NewExpense {
        id: None,
        user_id: user_id.to_string(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        vendor: vendor.to_string(),
        amount: amount.parse().unwrap(),
        category: "Groceries".to_string(),
        subcategory: String::new(),
        exclude: false,
        indispensable: false,
        avoidable: false,
        notes: String::new(),
    }
}

#[test]
fn create_and_fetch_roundtrip() {
    let ctx = common::setup();
    let user = common::create_user(&ctx, "alice");

    let created = ctx
        .expense_service
        .create_expense(new_expense(&user.id, (2024, 3, 5), "Esselunga", "45.10"))
        .unwrap();

    let fetched = ctx.expense_service.get_expense(&user.id, &created.id).unwrap();
    assert_eq!(fetched.vendor, "Esselunga");
    assert_eq!(fetched.amount, dec!(45.10));
    assert_eq!(fetched.date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
}

#[test]
fn create_rejects_non_positive_amounts() {
    let ctx = common::setup();
    let user = common::create_user(&ctx, "alice");

    let mut expense = new_expense(&user.id, (2024, 3, 5), "Esselunga", "0");
    let result = ctx.expense_service.create_expense(expense.clone());
    assert!(matches!(result, Err(ExpenseError::InvalidData(_))));

    expense.amount = dec!(-5);
    let result = ctx.expense_service.create_expense(expense);
    assert!(matches!(result, Err(ExpenseError::InvalidData(_))));
}

#[test]
fn update_replaces_fields_and_keeps_ownership() {
    let ctx = common::setup();
    let user = common::create_user(&ctx, "alice");

    let created = ctx
        .expense_service
        .create_expense(new_expense(&user.id, (2024, 3, 5), "Esselunga", "45.10"))
        .unwrap();

    let updated = ctx
        .expense_service
        .update_expense(ExpenseUpdate {
            id: created.id.clone(),
            user_id: user.id.clone(),
            date: created.date,
            vendor: "Conad".to_string(),
            amount: dec!(50.00),
            category: "Groceries".to_string(),
            subcategory: String::new(),
            exclude: true,
            indispensable: false,
            avoidable: false,
            notes: "moved".to_string(),
        })
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.vendor, "Conad");
    assert_eq!(updated.amount, dec!(50.00));
    assert!(updated.exclude);
    assert_eq!(updated.created_at, created.created_at);
}

#[test]
fn expenses_are_invisible_to_other_users() {
    let ctx = common::setup();
    let alice = common::create_user(&ctx, "alice");
    let bob = common::create_user(&ctx, "bob");

    let created = ctx
        .expense_service
        .create_expense(new_expense(&alice.id, (2024, 3, 5), "Esselunga", "45.10"))
        .unwrap();

    let result = ctx.expense_service.get_expense(&bob.id, &created.id);
    assert!(matches!(result, Err(ExpenseError::NotFound(_))));

    let result = ctx.expense_service.delete_expense(&bob.id, &created.id);
    assert!(result.is_err());

    // the failed cross-user delete left the row alone
    assert!(ctx.expense_service.get_expense(&alice.id, &created.id).is_ok());
}

#[test]
fn amount_bounds_are_inclusive() {
    let ctx = common::setup();
    let user = common::create_user(&ctx, "alice");

    for (vendor, amount) in [("A", "10.00"), ("B", "50.00"), ("C", "100.00")] {
        ctx.expense_service
            .create_expense(new_expense(&user.id, (2024, 3, 5), vendor, amount))
            .unwrap();
    }

    let results = ctx
        .expense_service
        .search_expenses(
            &user.id,
            ExpenseFilters {
                amount_min: Some(dec!(50)),
                ..Default::default()
            },
        )
        .unwrap();

    let mut amounts: Vec<_> = results.iter().map(|e| e.amount).collect();
    amounts.sort();
    assert_eq!(amounts, vec![dec!(50.00), dec!(100.00)]);
}

#[test]
fn blank_criteria_impose_no_constraint() {
    let ctx = common::setup();
    let user = common::create_user(&ctx, "alice");

    ctx.expense_service
        .create_expense(new_expense(&user.id, (2024, 3, 5), "Esselunga", "45.10"))
        .unwrap();
    ctx.expense_service
        .create_expense(new_expense(&user.id, (2024, 3, 6), "Conad", "12.00"))
        .unwrap();

    let results = ctx
        .expense_service
        .search_expenses(
            &user.id,
            ExpenseFilters {
                vendor: Some("   ".to_string()),
                category: Some(String::new()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(results.len(), 2);
}

#[test]
fn combined_filters_intersect() {
    let ctx = common::setup();
    let user = common::create_user(&ctx, "alice");

    ctx.expense_service
        .create_expense(new_expense(&user.id, (2024, 3, 5), "Esselunga", "45.10"))
        .unwrap();
    ctx.expense_service
        .create_expense(new_expense(&user.id, (2024, 3, 20), "Esselunga", "5.00"))
        .unwrap();
    ctx.expense_service
        .create_expense(new_expense(&user.id, (2024, 3, 5), "Conad", "45.10"))
        .unwrap();

    let results = ctx
        .expense_service
        .search_expenses(
            &user.id,
            ExpenseFilters {
                date_from: NaiveDate::from_ymd_opt(2024, 3, 1),
                date_to: NaiveDate::from_ymd_opt(2024, 3, 10),
                vendor: Some("Esselunga".to_string()),
                amount_min: Some(dec!(10)),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].vendor, "Esselunga");
    assert_eq!(results[0].amount, dec!(45.10));
}

#[test]
fn filter_options_fall_back_to_default_range_when_empty() {
    let ctx = common::setup();
    let user = common::create_user(&ctx, "alice");

    let options = ctx.expense_service.get_filter_options(&user.id).unwrap();
    assert!(options.vendors.is_empty());
    assert!(options.categories.is_empty());
    assert_eq!(options.amount_min, dec!(0));
    assert_eq!(options.amount_max, dec!(1000));
}

#[test]
fn filter_options_reflect_stored_expenses() {
    let ctx = common::setup();
    let user = common::create_user(&ctx, "alice");

    let mut cheap = new_expense(&user.id, (2024, 3, 5), "Esselunga", "5.00");
    cheap.category = "Groceries".to_string();
    ctx.expense_service.create_expense(cheap).unwrap();

    let mut pricey = new_expense(&user.id, (2024, 3, 6), "Trenitalia", "80.00");
    pricey.category = "Transport".to_string();
    ctx.expense_service.create_expense(pricey).unwrap();

    let options = ctx.expense_service.get_filter_options(&user.id).unwrap();
    assert_eq!(options.vendors, vec!["Esselunga", "Trenitalia"]);
    assert_eq!(options.categories, vec!["Groceries", "Transport"]);
    assert_eq!(options.amount_min, dec!(5.00));
    assert_eq!(options.amount_max, dec!(80.00));
}

#[test]
fn category_totals_align_labels_and_data() {
    let ctx = common::setup();
    let user = common::create_user(&ctx, "alice");

    let mut a = new_expense(&user.id, (2024, 3, 5), "Esselunga", "10.10");
    a.category = "Groceries".to_string();
    ctx.expense_service.create_expense(a).unwrap();

    let mut b = new_expense(&user.id, (2024, 3, 6), "Conad", "0.90");
    b.category = "Groceries".to_string();
    ctx.expense_service.create_expense(b).unwrap();

    let mut c = new_expense(&user.id, (2024, 3, 7), "Trenitalia", "12.00");
    c.category = "Transport".to_string();
    ctx.expense_service.create_expense(c).unwrap();

    let totals = ctx.expense_service.get_category_totals(&user.id).unwrap();
    assert_eq!(totals.labels, vec!["Groceries", "Transport"]);
    assert_eq!(totals.data, vec![dec!(11.00), dec!(12.00)]);
}

#[test]
fn saving_an_expense_provisions_its_category() {
    let ctx = common::setup();
    let user = common::create_user(&ctx, "alice");

    let mut expense = new_expense(&user.id, (2024, 3, 5), "Esselunga", "45.10");
    expense.category = "Groceries".to_string();
    expense.subcategory = "Food".to_string();
    ctx.expense_service.create_expense(expense).unwrap();

    use spese_core::categories::CategoryServiceTrait;
    let categories = ctx.category_service.list_categories(&user.id).unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "Groceries");

    let subcategories = ctx.category_service.list_subcategories(&user.id).unwrap();
    assert_eq!(subcategories.len(), 1);
    assert_eq!(subcategories[0].name, "Food");
    assert_eq!(subcategories[0].category_id, categories[0].id);
}

#[test]
fn upsert_ignores_amount_scale_differences() {
    use spese_core::expenses::ExpenseRepositoryTrait;

    let ctx = common::setup();
    let user = common::create_user(&ctx, "alice");

    ctx.expense_repository
        .upsert(new_expense(&user.id, (2024, 3, 5), "Esselunga", "12"))
        .unwrap();

    // 12 and 12.00 are the same amount, so the second upsert must hit the
    // natural key and update in place rather than insert
    let mut same = new_expense(&user.id, (2024, 3, 5), "Esselunga", "12.00");
    same.notes = "reimported".to_string();
    let updated = ctx.expense_repository.upsert(same).unwrap();
    assert_eq!(updated.notes, "reimported");

    let expenses = ctx.expense_service.list_expenses(&user.id).unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].amount, dec!(12.00));
}

#[test]
fn amounts_round_to_two_decimal_places() {
    let ctx = common::setup();
    let user = common::create_user(&ctx, "alice");

    let created = ctx
        .expense_service
        .create_expense(new_expense(&user.id, (2024, 3, 5), "Esselunga", "10.005"))
        .unwrap();

    // banker's rounding at 2dp
    assert_eq!(created.amount, dec!(10.00));
}
