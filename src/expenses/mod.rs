pub(crate) mod expenses_errors;
pub(crate) mod expenses_model;
pub(crate) mod expenses_repository;
pub(crate) mod expenses_service;
pub(crate) mod expenses_traits;

pub use expenses_errors::{ExpenseError, Result};
pub use expenses_model::{
    CategoryTotals, Expense, ExpenseDb, ExpenseFilters, ExpenseUpdate, FilterOptions, NewExpense,
};
pub use expenses_repository::ExpenseRepository;
pub use expenses_service::ExpenseService;
pub use expenses_traits::{ExpenseRepositoryTrait, ExpenseServiceTrait};
