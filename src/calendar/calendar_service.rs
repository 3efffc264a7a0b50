use chrono::{Datelike, Duration, NaiveDate};
use log::debug;
use num_traits::Zero;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

use crate::calendar::calendar_model::{DayCell, MonthGrid, MonthNavigation};
use crate::errors::{Error, Result, ValidationError};
use crate::expenses::{Expense, ExpenseRepositoryTrait};

/// Trait defining the contract for the calendar service
pub trait CalendarServiceTrait: Send + Sync {
    fn build_month(&self, year: i32, month: u32, user_id: &str) -> Result<MonthGrid>;
    fn month_navigation(&self, year: i32, month: u32) -> Result<MonthNavigation>;
}

pub struct CalendarService {
    expense_repository: Arc<dyn ExpenseRepositoryTrait>,
}

impl CalendarService {
    pub fn new(expense_repository: Arc<dyn ExpenseRepositoryTrait>) -> Self {
        CalendarService { expense_repository }
    }

    fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            Error::Validation(ValidationError::InvalidInput(format!(
                "Invalid calendar month: {}-{}",
                year, month
            )))
        })?;

        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        // from_ymd_opt succeeded above, so the first of the next month exists too
        let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .map(|d| d - Duration::days(1))
            .ok_or_else(|| {
                Error::Validation(ValidationError::InvalidInput(format!(
                    "Invalid calendar month: {}-{}",
                    year, month
                )))
            })?;

        Ok((first, last))
    }
}

impl CalendarServiceTrait for CalendarService {
    /// Builds the Monday-start week grid for one month of one user's
    /// expenses. Day totals are exact decimal sums.
    fn build_month(&self, year: i32, month: u32, user_id: &str) -> Result<MonthGrid> {
        let (first, last) = Self::month_bounds(year, month)?;

        let expenses = self
            .expense_repository
            .list_between(user_id, first, last)?;
        debug!(
            "Building {}-{:02} calendar for user {}: {} expenses",
            year,
            month,
            user_id,
            expenses.len()
        );

        let mut by_day: HashMap<NaiveDate, Vec<Expense>> = HashMap::new();
        for expense in expenses {
            by_day.entry(expense.date).or_default().push(expense);
        }

        let mut weeks = Vec::new();
        let mut cursor = first - Duration::days(first.weekday().num_days_from_monday() as i64);

        while cursor <= last {
            let mut week = Vec::with_capacity(7);
            for _ in 0..7 {
                if cursor.month() == month && cursor.year() == year {
                    let day_expenses = by_day.remove(&cursor).unwrap_or_default();
                    let total = day_expenses
                        .iter()
                        .fold(Decimal::zero(), |acc, e| acc + e.amount);
                    week.push(DayCell {
                        day: cursor.day(),
                        date: Some(cursor),
                        total,
                        expenses: day_expenses,
                    });
                } else {
                    week.push(DayCell::placeholder());
                }
                cursor += Duration::days(1);
            }
            weeks.push(week);
        }

        Ok(MonthGrid { year, month, weeks })
    }

    /// Previous/next month with rollover at the year boundary
    fn month_navigation(&self, year: i32, month: u32) -> Result<MonthNavigation> {
        if !(1..=12).contains(&month) {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Invalid month: {}",
                month
            ))));
        }

        let (prev_year, prev_month) = if month == 1 {
            (year - 1, 12)
        } else {
            (year, month - 1)
        };
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };

        Ok(MonthNavigation {
            prev_year,
            prev_month,
            next_year,
            next_month,
        })
    }
}
