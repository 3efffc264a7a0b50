use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::expenses::{ExpenseError, Result};
use crate::users::User;

/// Domain model representing a single expense. Amounts are exact decimals;
/// category/subcategory are the denormalized display strings, not references
/// into the category registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub user_id: String,
    pub date: NaiveDate,
    pub vendor: String,
    pub amount: Decimal,
    pub category: String,
    pub subcategory: String,
    pub exclude: bool,
    pub indispensable: bool,
    pub avoidable: bool,
    pub notes: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for expenses. Amounts are stored as canonical 2dp text so
/// the (user, date, vendor, amount) unique index compares them exactly.
#[derive(
    Queryable,
    Selectable,
    Identifiable,
    Associations,
    Insertable,
    AsChangeset,
    PartialEq,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::expenses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(belongs_to(User))]
pub struct ExpenseDb {
    pub id: String,
    pub user_id: String,
    pub date: NaiveDate,
    pub vendor: String,
    pub amount: String,
    pub category: String,
    pub subcategory: String,
    pub exclude: bool,
    pub indispensable: bool,
    pub avoidable: bool,
    pub notes: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating (or upserting) an expense
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub id: Option<String>,
    pub user_id: String,
    pub date: NaiveDate,
    pub vendor: String,
    pub amount: Decimal,
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub exclude: bool,
    #[serde(default)]
    pub indispensable: bool,
    #[serde(default)]
    pub avoidable: bool,
    #[serde(default)]
    pub notes: String,
}

impl NewExpense {
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(ExpenseError::InvalidData(
                "User ID cannot be empty".to_string(),
            ));
        }
        if self.vendor.trim().is_empty() {
            return Err(ExpenseError::InvalidData(
                "Vendor cannot be empty".to_string(),
            ));
        }
        if self.category.trim().is_empty() {
            return Err(ExpenseError::InvalidData(
                "Please select a category".to_string(),
            ));
        }
        if self.amount <= Decimal::ZERO {
            return Err(ExpenseError::InvalidData(
                "Amount must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Input model for updating an existing expense
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseUpdate {
    pub id: String,
    pub user_id: String,
    pub date: NaiveDate,
    pub vendor: String,
    pub amount: Decimal,
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub exclude: bool,
    #[serde(default)]
    pub indispensable: bool,
    #[serde(default)]
    pub avoidable: bool,
    #[serde(default)]
    pub notes: String,
}

impl ExpenseUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ExpenseError::InvalidData(
                "Expense ID is required for updates".to_string(),
            ));
        }
        if self.vendor.trim().is_empty() {
            return Err(ExpenseError::InvalidData(
                "Vendor cannot be empty".to_string(),
            ));
        }
        if self.category.trim().is_empty() {
            return Err(ExpenseError::InvalidData(
                "Please select a category".to_string(),
            ));
        }
        if self.amount <= Decimal::ZERO {
            return Err(ExpenseError::InvalidData(
                "Amount must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Filter criteria over one user's expenses. Every field is optional; a
/// blank string means "no constraint", never "equals empty".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseFilters {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub amount_min: Option<Decimal>,
    pub amount_max: Option<Decimal>,
    pub vendor: Option<String>,
    pub category: Option<String>,
}

impl ExpenseFilters {
    /// Collapses blank text criteria into None
    pub fn normalized(mut self) -> Self {
        if self.vendor.as_deref().map_or(false, |v| v.trim().is_empty()) {
            self.vendor = None;
        }
        if self
            .category
            .as_deref()
            .map_or(false, |c| c.trim().is_empty())
        {
            self.category = None;
        }
        self
    }
}

/// Distinct pick-list values and amount bounds used to populate filter
/// controls
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub vendors: Vec<String>,
    pub categories: Vec<String>,
    pub amount_min: Decimal,
    pub amount_max: Decimal,
}

/// Per-category totals with labels and data aligned by index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub labels: Vec<String>,
    pub data: Vec<Decimal>,
}

pub(crate) fn canonical_amount(amount: Decimal) -> String {
    // Rescale after rounding: round_dp caps the scale but never pads it, and
    // the natural-key index compares these strings byte-for-byte.
    let mut canonical = amount.round_dp(DISPLAY_DECIMAL_PRECISION);
    canonical.rescale(DISPLAY_DECIMAL_PRECISION);
    canonical.to_string()
}

// Conversion implementations
impl From<ExpenseDb> for Expense {
    fn from(db: ExpenseDb) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            date: db.date,
            vendor: db.vendor,
            amount: Decimal::from_str(&db.amount).unwrap_or_default(),
            category: db.category,
            subcategory: db.subcategory,
            exclude: db.exclude,
            indispensable: db.indispensable,
            avoidable: db.avoidable,
            notes: db.notes,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewExpense> for ExpenseDb {
    fn from(domain: NewExpense) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_default(),
            user_id: domain.user_id,
            date: domain.date,
            vendor: domain.vendor,
            amount: canonical_amount(domain.amount),
            category: domain.category,
            subcategory: domain.subcategory,
            exclude: domain.exclude,
            indispensable: domain.indispensable,
            avoidable: domain.avoidable,
            notes: domain.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<ExpenseUpdate> for ExpenseDb {
    fn from(domain: ExpenseUpdate) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain.id,
            user_id: domain.user_id,
            date: domain.date,
            vendor: domain.vendor,
            amount: canonical_amount(domain.amount),
            category: domain.category,
            subcategory: domain.subcategory,
            exclude: domain.exclude,
            indispensable: domain.indispensable,
            avoidable: domain.avoidable,
            notes: domain.notes,
            created_at: now,
            updated_at: now,
        }
    }
}
