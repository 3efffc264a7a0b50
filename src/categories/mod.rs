pub(crate) mod categories_errors;
pub(crate) mod categories_model;
pub(crate) mod categories_repository;
pub(crate) mod categories_service;
pub(crate) mod categories_traits;

pub use categories_errors::{CategoryError, Result};
pub use categories_model::{Category, NewCategory, NewSubcategory, Subcategory};
pub use categories_repository::CategoryRepository;
pub use categories_service::CategoryService;
pub use categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
