use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::expenses::Expense;

/// One cell of the month grid. Cells padding out the leading/trailing weeks
/// carry day 0, no date, a zero total and no expenses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub day: u32,
    pub date: Option<NaiveDate>,
    pub total: Decimal,
    pub expenses: Vec<Expense>,
}

impl DayCell {
    pub(crate) fn placeholder() -> Self {
        Self {
            day: 0,
            date: None,
            total: Decimal::ZERO,
            expenses: Vec::new(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.date.is_none()
    }
}

/// Monday-start week grid covering every calendar week that intersects the
/// target month; each week holds exactly seven cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Vec<DayCell>>,
}

/// Previous/next month pointers with rollover at the year boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthNavigation {
    pub prev_year: i32,
    pub prev_month: u32,
    pub next_year: i32,
    pub next_month: u32,
}
