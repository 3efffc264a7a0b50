use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::categories::categories_model::{Category, Subcategory};
use crate::categories::categories_traits::CategoryRepositoryTrait;
use crate::categories::{CategoryError, Result};
use crate::db::get_connection;
use crate::schema::{categories, subcategories};

/// Repository for managing category and subcategory rows
pub struct CategoryRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl CategoryRepository {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }
}

impl CategoryRepositoryTrait for CategoryRepository {
    /// Idempotent get-or-create keyed by (user, name). The insert rides on
    /// the unique index, so two concurrent callers cannot duplicate a row.
    fn get_or_create(&self, user_id: &str, name: &str) -> Result<Category> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;

        let candidate = Category {
            id: format!("cat_{}", &Uuid::new_v4().simple().to_string()[..12]),
            user_id: user_id.to_string(),
            name: name.to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        };

        diesel::insert_into(categories::table)
            .values(&candidate)
            .on_conflict((categories::user_id, categories::name))
            .do_nothing()
            .execute(&mut conn)?;

        categories::table
            .filter(categories::user_id.eq(user_id))
            .filter(categories::name.eq(name))
            .first::<Category>(&mut conn)
            .map_err(CategoryError::from)
    }

    fn find_by_name(&self, user_id: &str, name: &str) -> Result<Option<Category>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;

        categories::table
            .filter(categories::user_id.eq(user_id))
            .filter(categories::name.eq(name))
            .first::<Category>(&mut conn)
            .optional()
            .map_err(CategoryError::from)
    }

    fn list_by_user(&self, user_id: &str) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;

        categories::table
            .filter(categories::user_id.eq(user_id))
            .order(categories::name.asc())
            .load::<Category>(&mut conn)
            .map_err(CategoryError::from)
    }

    /// Idempotent get-or-create keyed by (user, category, name)
    fn get_or_create_subcategory(
        &self,
        user_id: &str,
        category_id: &str,
        name: &str,
    ) -> Result<Subcategory> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;

        let candidate = Subcategory {
            id: format!("sub_{}", &Uuid::new_v4().simple().to_string()[..12]),
            user_id: user_id.to_string(),
            category_id: category_id.to_string(),
            name: name.to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        };

        diesel::insert_into(subcategories::table)
            .values(&candidate)
            .on_conflict((
                subcategories::user_id,
                subcategories::category_id,
                subcategories::name,
            ))
            .do_nothing()
            .execute(&mut conn)?;

        subcategories::table
            .filter(subcategories::user_id.eq(user_id))
            .filter(subcategories::category_id.eq(category_id))
            .filter(subcategories::name.eq(name))
            .first::<Subcategory>(&mut conn)
            .map_err(CategoryError::from)
    }

    fn list_subcategories_by_user(&self, user_id: &str) -> Result<Vec<Subcategory>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;

        subcategories::table
            .filter(subcategories::user_id.eq(user_id))
            .order(subcategories::name.asc())
            .load::<Subcategory>(&mut conn)
            .map_err(CategoryError::from)
    }

    fn delete(&self, user_id: &str, category_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;

        // Child subcategories go with the category (FK cascade).
        let affected = diesel::delete(
            categories::table
                .filter(categories::id.eq(category_id))
                .filter(categories::user_id.eq(user_id)),
        )
        .execute(&mut conn)?;

        if affected == 0 {
            return Err(CategoryError::NotFound(format!(
                "Category with id {} not found",
                category_id
            )));
        }

        Ok(affected)
    }
}
