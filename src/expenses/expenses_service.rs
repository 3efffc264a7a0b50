use log::debug;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::categories::{CategoryError, CategoryServiceTrait};
use crate::constants::{DEFAULT_AMOUNT_RANGE_MAX, DEFAULT_AMOUNT_RANGE_MIN};
use crate::expenses::expenses_model::*;
use crate::expenses::expenses_traits::{ExpenseRepositoryTrait, ExpenseServiceTrait};
use crate::expenses::{ExpenseError, Result};

/// Service for managing expenses
pub struct ExpenseService {
    repository: Arc<dyn ExpenseRepositoryTrait>,
    category_service: Arc<dyn CategoryServiceTrait>,
}

impl ExpenseService {
    pub fn new(
        repository: Arc<dyn ExpenseRepositoryTrait>,
        category_service: Arc<dyn CategoryServiceTrait>,
    ) -> Self {
        Self {
            repository,
            category_service,
        }
    }

    /// Registers the expense's free-text category/subcategory in the lookup
    /// tables. The expense's own strings stay untouched; a missing parent
    /// category just leaves the subcategory unprovisioned.
    fn provision_categories(&self, expense: &Expense) -> Result<()> {
        self.category_service
            .ensure_category(&expense.user_id, &expense.category)
            .map_err(|e| ExpenseError::DatabaseError(e.to_string()))?;

        if !expense.subcategory.trim().is_empty() {
            match self.category_service.ensure_subcategory(
                &expense.user_id,
                &expense.category,
                &expense.subcategory,
            ) {
                Ok(_) => {}
                Err(CategoryError::NotFound(msg)) => {
                    debug!("Subcategory not provisioned: {}", msg);
                }
                Err(e) => return Err(ExpenseError::DatabaseError(e.to_string())),
            }
        }

        Ok(())
    }
}

impl ExpenseServiceTrait for ExpenseService {
    fn create_expense(&self, new_expense: NewExpense) -> Result<Expense> {
        let expense = self.repository.create(new_expense)?;
        self.provision_categories(&expense)?;
        Ok(expense)
    }

    fn update_expense(&self, expense_update: ExpenseUpdate) -> Result<Expense> {
        let expense = self.repository.update(expense_update)?;
        self.provision_categories(&expense)?;
        Ok(expense)
    }

    fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<()> {
        self.repository.delete(user_id, expense_id)?;
        Ok(())
    }

    fn get_expense(&self, user_id: &str, expense_id: &str) -> Result<Expense> {
        self.repository.get_by_id(user_id, expense_id)
    }

    fn list_expenses(&self, user_id: &str) -> Result<Vec<Expense>> {
        self.repository.list_by_user(user_id)
    }

    /// Returns the expenses matching every supplied criterion. Omitted or
    /// blank criteria impose no constraint.
    fn search_expenses(&self, user_id: &str, filters: ExpenseFilters) -> Result<Vec<Expense>> {
        let filters = filters.normalized();
        let mut results = self.repository.search(user_id, &filters)?;

        if let Some(min) = filters.amount_min {
            results.retain(|e| e.amount >= min);
        }
        if let Some(max) = filters.amount_max {
            results.retain(|e| e.amount <= max);
        }

        Ok(results)
    }

    fn get_filter_options(&self, user_id: &str) -> Result<FilterOptions> {
        let vendors = self.repository.distinct_vendors(user_id)?;
        let categories = self.repository.distinct_categories(user_id)?;

        let expenses = self.repository.list_by_user(user_id)?;
        let (amount_min, amount_max) = if expenses.is_empty() {
            (
                Decimal::from(DEFAULT_AMOUNT_RANGE_MIN),
                Decimal::from(DEFAULT_AMOUNT_RANGE_MAX),
            )
        } else {
            let mut min = expenses[0].amount;
            let mut max = expenses[0].amount;
            for expense in &expenses[1..] {
                if expense.amount < min {
                    min = expense.amount;
                }
                if expense.amount > max {
                    max = expense.amount;
                }
            }
            (min, max)
        };

        Ok(FilterOptions {
            vendors,
            categories,
            amount_min,
            amount_max,
        })
    }

    /// Exact decimal totals per category string, labels and data aligned by
    /// index
    fn get_category_totals(&self, user_id: &str) -> Result<CategoryTotals> {
        let expenses = self.repository.list_by_user(user_id)?;

        let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
        for expense in expenses {
            *totals.entry(expense.category).or_insert(Decimal::ZERO) += expense.amount;
        }

        let mut labels = Vec::with_capacity(totals.len());
        let mut data = Vec::with_capacity(totals.len());
        for (category, total) in totals {
            labels.push(category);
            data.push(total);
        }

        Ok(CategoryTotals { labels, data })
    }
}
