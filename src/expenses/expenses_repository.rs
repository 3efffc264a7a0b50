use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use diesel::upsert::excluded;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::get_connection;
use crate::expenses::expenses_model::*;
use crate::expenses::expenses_traits::ExpenseRepositoryTrait;
use crate::expenses::{ExpenseError, Result};
use crate::schema::expenses;

/// Repository for managing expense data in the database
pub struct ExpenseRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl ExpenseRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<crate::db::DbConnection> {
        get_connection(&self.pool).map_err(|e| ExpenseError::DatabaseError(e.to_string()))
    }
}

impl ExpenseRepositoryTrait for ExpenseRepository {
    fn create(&self, new_expense: NewExpense) -> Result<Expense> {
        new_expense.validate()?;

        let mut expense_db: ExpenseDb = new_expense.into();
        if expense_db.id.is_empty() {
            expense_db.id = Uuid::new_v4().to_string();
        }

        let mut conn = self.conn()?;
        diesel::insert_into(expenses::table)
            .values(&expense_db)
            .execute(&mut conn)?;

        Ok(expense_db.into())
    }

    /// Atomic insert-or-update keyed by (user, date, vendor, amount). The
    /// conflict target is the natural-key index, so concurrent imports of
    /// the same logical row resolve at the store, not in application code.
    fn upsert(&self, new_expense: NewExpense) -> Result<Expense> {
        new_expense.validate()?;

        let mut expense_db: ExpenseDb = new_expense.into();
        if expense_db.id.is_empty() {
            expense_db.id = Uuid::new_v4().to_string();
        }

        let mut conn = self.conn()?;
        diesel::insert_into(expenses::table)
            .values(&expense_db)
            .on_conflict((
                expenses::user_id,
                expenses::date,
                expenses::vendor,
                expenses::amount,
            ))
            .do_update()
            .set((
                expenses::category.eq(excluded(expenses::category)),
                expenses::subcategory.eq(excluded(expenses::subcategory)),
                expenses::exclude.eq(excluded(expenses::exclude)),
                expenses::indispensable.eq(excluded(expenses::indispensable)),
                expenses::avoidable.eq(excluded(expenses::avoidable)),
                expenses::notes.eq(excluded(expenses::notes)),
                expenses::updated_at.eq(excluded(expenses::updated_at)),
            ))
            .get_result::<ExpenseDb>(&mut conn)
            .map(Expense::from)
            .map_err(ExpenseError::from)
    }

    fn update(&self, expense_update: ExpenseUpdate) -> Result<Expense> {
        expense_update.validate()?;

        let mut conn = self.conn()?;

        let mut expense_db: ExpenseDb = expense_update.into();
        let existing = expenses::table
            .filter(expenses::id.eq(&expense_db.id))
            .filter(expenses::user_id.eq(&expense_db.user_id))
            .first::<ExpenseDb>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => ExpenseError::NotFound(format!(
                    "Expense with id {} not found",
                    expense_db.id
                )),
                _ => ExpenseError::DatabaseError(e.to_string()),
            })?;

        expense_db.created_at = existing.created_at;
        expense_db.updated_at = chrono::Utc::now().naive_utc();

        diesel::update(
            expenses::table
                .filter(expenses::id.eq(&expense_db.id))
                .filter(expenses::user_id.eq(&expense_db.user_id)),
        )
        .set(&expense_db)
        .execute(&mut conn)?;

        Ok(expense_db.into())
    }

    fn delete(&self, user_id: &str, expense_id: &str) -> Result<usize> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(
            expenses::table
                .filter(expenses::id.eq(expense_id))
                .filter(expenses::user_id.eq(user_id)),
        )
        .execute(&mut conn)?;

        if affected == 0 {
            return Err(ExpenseError::NotFound(format!(
                "Expense with id {} not found",
                expense_id
            )));
        }

        Ok(affected)
    }

    fn get_by_id(&self, user_id: &str, expense_id: &str) -> Result<Expense> {
        let mut conn = self.conn()?;

        expenses::table
            .filter(expenses::id.eq(expense_id))
            .filter(expenses::user_id.eq(user_id))
            .first::<ExpenseDb>(&mut conn)
            .map(Expense::from)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => ExpenseError::NotFound(format!(
                    "Expense with id {} not found",
                    expense_id
                )),
                _ => ExpenseError::DatabaseError(e.to_string()),
            })
    }

    fn list_by_user(&self, user_id: &str) -> Result<Vec<Expense>> {
        let mut conn = self.conn()?;

        expenses::table
            .filter(expenses::user_id.eq(user_id))
            .order(expenses::date.desc())
            .load::<ExpenseDb>(&mut conn)
            .map(|rows| rows.into_iter().map(Expense::from).collect())
            .map_err(ExpenseError::from)
    }

    /// Applies the relational part of the filter set. Amount bounds compare
    /// exact decimals and are applied by the service on the loaded rows.
    fn search(&self, user_id: &str, filters: &ExpenseFilters) -> Result<Vec<Expense>> {
        let mut conn = self.conn()?;

        let mut query = expenses::table
            .filter(expenses::user_id.eq(user_id))
            .into_boxed();

        if let Some(from) = filters.date_from {
            query = query.filter(expenses::date.ge(from));
        }
        if let Some(to) = filters.date_to {
            query = query.filter(expenses::date.le(to));
        }
        if let Some(ref vendor) = filters.vendor {
            query = query.filter(expenses::vendor.eq(vendor));
        }
        if let Some(ref category) = filters.category {
            query = query.filter(expenses::category.eq(category));
        }

        query
            .order(expenses::date.desc())
            .load::<ExpenseDb>(&mut conn)
            .map(|rows| rows.into_iter().map(Expense::from).collect())
            .map_err(ExpenseError::from)
    }

    fn list_between(&self, user_id: &str, from: NaiveDate, to: NaiveDate) -> Result<Vec<Expense>> {
        let mut conn = self.conn()?;

        expenses::table
            .filter(expenses::user_id.eq(user_id))
            .filter(expenses::date.ge(from))
            .filter(expenses::date.le(to))
            .order(expenses::date.asc())
            .load::<ExpenseDb>(&mut conn)
            .map(|rows| rows.into_iter().map(Expense::from).collect())
            .map_err(ExpenseError::from)
    }

    fn distinct_vendors(&self, user_id: &str) -> Result<Vec<String>> {
        let mut conn = self.conn()?;

        expenses::table
            .filter(expenses::user_id.eq(user_id))
            .select(expenses::vendor)
            .distinct()
            .order(expenses::vendor.asc())
            .load::<String>(&mut conn)
            .map_err(ExpenseError::from)
    }

    fn distinct_categories(&self, user_id: &str) -> Result<Vec<String>> {
        let mut conn = self.conn()?;

        expenses::table
            .filter(expenses::user_id.eq(user_id))
            .select(expenses::category)
            .distinct()
            .order(expenses::category.asc())
            .load::<String>(&mut conn)
            .map_err(ExpenseError::from)
    }
}
