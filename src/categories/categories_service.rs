use log::debug;
use std::sync::Arc;

use crate::categories::categories_model::{Category, NewCategory, NewSubcategory, Subcategory};
use crate::categories::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::categories::{CategoryError, Result};

/// Service that keeps the category/subcategory registry in sync with the
/// free-text strings users type on expenses.
pub struct CategoryService {
    repository: Arc<dyn CategoryRepositoryTrait>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepositoryTrait>) -> Self {
        Self { repository }
    }
}

impl CategoryServiceTrait for CategoryService {
    /// Get-or-create a category for this user. Never duplicates by
    /// (user, name) and never rewrites any expense's stored strings.
    fn ensure_category(&self, user_id: &str, name: &str) -> Result<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CategoryError::InvalidData(
                "Category name cannot be empty".to_string(),
            ));
        }
        self.repository.get_or_create(user_id, name)
    }

    /// Get-or-create a subcategory under an existing category. Fails with
    /// NotFound when the parent category does not exist for this user;
    /// callers saving an expense treat that as "not provisioned" and move on.
    fn ensure_subcategory(
        &self,
        user_id: &str,
        category_name: &str,
        name: &str,
    ) -> Result<Subcategory> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CategoryError::InvalidData(
                "Subcategory name cannot be empty".to_string(),
            ));
        }

        let category = self
            .repository
            .find_by_name(user_id, category_name.trim())?
            .ok_or_else(|| {
                CategoryError::NotFound(format!(
                    "Category '{}' not found for user",
                    category_name.trim()
                ))
            })?;

        self.repository
            .get_or_create_subcategory(user_id, &category.id, name)
    }

    fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        new_category.validate()?;
        debug!(
            "Adding category '{}' for user {}",
            new_category.name, new_category.user_id
        );
        self.ensure_category(&new_category.user_id, &new_category.name)
    }

    fn create_subcategory(&self, new_subcategory: NewSubcategory) -> Result<Subcategory> {
        new_subcategory.validate()?;
        self.ensure_subcategory(
            &new_subcategory.user_id,
            &new_subcategory.category_name,
            &new_subcategory.name,
        )
    }

    fn list_categories(&self, user_id: &str) -> Result<Vec<Category>> {
        self.repository.list_by_user(user_id)
    }

    fn list_subcategories(&self, user_id: &str) -> Result<Vec<Subcategory>> {
        self.repository.list_subcategories_by_user(user_id)
    }

    fn delete_category(&self, user_id: &str, category_id: &str) -> Result<()> {
        self.repository.delete(user_id, category_id)?;
        Ok(())
    }
}
