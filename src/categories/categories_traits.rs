use super::categories_model::{Category, NewCategory, NewSubcategory, Subcategory};
use super::Result;

/// Trait defining the contract for category repository operations.
pub trait CategoryRepositoryTrait: Send + Sync {
    fn get_or_create(&self, user_id: &str, name: &str) -> Result<Category>;
    fn find_by_name(&self, user_id: &str, name: &str) -> Result<Option<Category>>;
    fn list_by_user(&self, user_id: &str) -> Result<Vec<Category>>;
    fn get_or_create_subcategory(
        &self,
        user_id: &str,
        category_id: &str,
        name: &str,
    ) -> Result<Subcategory>;
    fn list_subcategories_by_user(&self, user_id: &str) -> Result<Vec<Subcategory>>;
    fn delete(&self, user_id: &str, category_id: &str) -> Result<usize>;
}

/// Trait defining the contract for category service operations.
pub trait CategoryServiceTrait: Send + Sync {
    fn ensure_category(&self, user_id: &str, name: &str) -> Result<Category>;
    fn ensure_subcategory(&self, user_id: &str, category_name: &str, name: &str)
        -> Result<Subcategory>;
    fn create_category(&self, new_category: NewCategory) -> Result<Category>;
    fn create_subcategory(&self, new_subcategory: NewSubcategory) -> Result<Subcategory>;
    fn list_categories(&self, user_id: &str) -> Result<Vec<Category>>;
    fn list_subcategories(&self, user_id: &str) -> Result<Vec<Subcategory>>;
    fn delete_category(&self, user_id: &str, category_id: &str) -> Result<()>;
}
