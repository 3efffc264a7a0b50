use chrono::NaiveDate;

use super::expenses_model::{
    CategoryTotals, Expense, ExpenseFilters, ExpenseUpdate, FilterOptions, NewExpense,
};
use super::Result;

/// Trait defining the contract for expense repository operations.
pub trait ExpenseRepositoryTrait: Send + Sync {
    fn create(&self, new_expense: NewExpense) -> Result<Expense>;
    fn upsert(&self, new_expense: NewExpense) -> Result<Expense>;
    fn update(&self, expense_update: ExpenseUpdate) -> Result<Expense>;
    fn delete(&self, user_id: &str, expense_id: &str) -> Result<usize>;
    fn get_by_id(&self, user_id: &str, expense_id: &str) -> Result<Expense>;
    fn list_by_user(&self, user_id: &str) -> Result<Vec<Expense>>;
    fn search(&self, user_id: &str, filters: &ExpenseFilters) -> Result<Vec<Expense>>;
    fn list_between(&self, user_id: &str, from: NaiveDate, to: NaiveDate) -> Result<Vec<Expense>>;
    fn distinct_vendors(&self, user_id: &str) -> Result<Vec<String>>;
    fn distinct_categories(&self, user_id: &str) -> Result<Vec<String>>;
}

/// Trait defining the contract for expense service operations.
pub trait ExpenseServiceTrait: Send + Sync {
    fn create_expense(&self, new_expense: NewExpense) -> Result<Expense>;
    fn update_expense(&self, expense_update: ExpenseUpdate) -> Result<Expense>;
    fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<()>;
    fn get_expense(&self, user_id: &str, expense_id: &str) -> Result<Expense>;
    fn list_expenses(&self, user_id: &str) -> Result<Vec<Expense>>;
    fn search_expenses(&self, user_id: &str, filters: ExpenseFilters) -> Result<Vec<Expense>>;
    fn get_filter_options(&self, user_id: &str) -> Result<FilterOptions>;
    fn get_category_totals(&self, user_id: &str) -> Result<CategoryTotals>;
}
