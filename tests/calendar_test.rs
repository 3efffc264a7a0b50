mod common;

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use spese_core::calendar::{CalendarService, CalendarServiceTrait, MonthNavigation};
use spese_core::expenses::{ExpenseServiceTrait, NewExpense};

fn calendar(ctx: &common::TestContext) -> CalendarService {
    CalendarService::new(ctx.expense_repository.clone())
}

fn spend(ctx: &common::TestContext, user_id: &str, date: (i32, u32, u32), vendor: &str, amount: &str) {
    ctx.expense_service
        .create_expense(NewExpense {
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
        })
        .expect("Failed to create expense");
}

#[test]
fn february_2024_grid_shape() {
    let ctx = common::setup();
    let user = common::create_user(&ctx, "alice");

    let grid = calendar(&ctx).build_month(2024, 2, &user.id).unwrap();

    assert_eq!(grid.year, 2024);
    assert_eq!(grid.month, 2);
    // Feb 1st 2024 is a Thursday and Feb 29th is a Thursday: five
    // Monday-start weeks cover the month.
    assert_eq!(grid.weeks.len(), 5);
    for week in &grid.weeks {
        assert_eq!(week.len(), 7);
    }

    let first_week = &grid.weeks[0];
    assert!(first_week[0].is_placeholder());
    assert!(first_week[1].is_placeholder());
    assert!(first_week[2].is_placeholder());
    assert_eq!(first_week[3].day, 1);
    assert_eq!(
        first_week[3].date,
        NaiveDate::from_ymd_opt(2024, 2, 1)
    );

    let last_week = &grid.weeks[4];
    assert_eq!(last_week[3].day, 29);
    assert!(last_week[4].is_placeholder());
    assert!(last_week[5].is_placeholder());
    assert!(last_week[6].is_placeholder());
}

#[test]
fn day_totals_sum_expenses_exactly() {
    let ctx = common::setup();
    let user = common::create_user(&ctx, "alice");

    spend(&ctx, &user.id, (2024, 2, 10), "Esselunga", "10.10");
    spend(&ctx, &user.id, (2024, 2, 10), "Bar Centrale", "0.90");
    spend(&ctx, &user.id, (2024, 2, 11), "Conad", "5.00");

    let grid = calendar(&ctx).build_month(2024, 2, &user.id).unwrap();

    let day_10 = grid
        .weeks
        .iter()
        .flatten()
        .find(|cell| cell.day == 10)
        .unwrap();
    assert_eq!(day_10.total, dec!(11.00));
    assert_eq!(day_10.expenses.len(), 2);

    let day_12 = grid
        .weeks
        .iter()
        .flatten()
        .find(|cell| cell.day == 12)
        .unwrap();
    assert_eq!(day_12.total, dec!(0));
    assert!(day_12.expenses.is_empty());
}

#[test]
fn grid_only_contains_the_requesting_users_expenses() {
    let ctx = common::setup();
    let alice = common::create_user(&ctx, "alice");
    let bob = common::create_user(&ctx, "bob");

    spend(&ctx, &alice.id, (2024, 2, 10), "Esselunga", "10.00");
    spend(&ctx, &bob.id, (2024, 2, 10), "Conad", "99.00");

    let grid = calendar(&ctx).build_month(2024, 2, &alice.id).unwrap();
    let day_10 = grid
        .weeks
        .iter()
        .flatten()
        .find(|cell| cell.day == 10)
        .unwrap();
    assert_eq!(day_10.total, dec!(10.00));
    assert_eq!(day_10.expenses.len(), 1);
    assert_eq!(day_10.expenses[0].vendor, "Esselunga");
}

#[test]
fn expenses_outside_the_month_are_ignored() {
    let ctx = common::setup();
    let user = common::create_user(&ctx, "alice");

    spend(&ctx, &user.id, (2024, 1, 31), "Esselunga", "10.00");
    spend(&ctx, &user.id, (2024, 3, 1), "Conad", "20.00");

    let grid = calendar(&ctx).build_month(2024, 2, &user.id).unwrap();
    let total: rust_decimal::Decimal = grid
        .weeks
        .iter()
        .flatten()
        .map(|cell| cell.total)
        .sum();
    assert_eq!(total, dec!(0));
}

#[test]
fn navigation_rolls_over_year_boundaries() {
    let ctx = common::setup();
    let service = calendar(&ctx);

    assert_eq!(
        service.month_navigation(2024, 1).unwrap(),
        MonthNavigation {
            prev_year: 2023,
            prev_month: 12,
            next_year: 2024,
            next_month: 2,
        }
    );
    assert_eq!(
        service.month_navigation(2024, 12).unwrap(),
        MonthNavigation {
            prev_year: 2024,
            prev_month: 11,
            next_year: 2025,
            next_month: 1,
        }
    );
}

#[test]
fn invalid_month_is_rejected() {
    let ctx = common::setup();
    let service = calendar(&ctx);

    assert!(service.month_navigation(2024, 0).is_err());
    assert!(service.month_navigation(2024, 13).is_err());
    assert!(service.build_month(2024, 13, "any").is_err());
}
