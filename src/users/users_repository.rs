use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::get_connection;
use crate::schema::users;
use crate::users::users_model::{NewUser, User};
use crate::users::users_traits::UserRepositoryTrait;
use crate::users::{Result, UserError};

/// Repository for managing user data in the database
pub struct UserRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl UserRepository {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }
}

impl UserRepositoryTrait for UserRepository {
    fn create(&self, new_user: NewUser) -> Result<User> {
        new_user.validate()?;

        let user = User {
            id: new_user.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            username: new_user.username.trim().to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        };

        let mut conn = get_connection(&self.pool)
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        diesel::insert_into(users::table)
            .values(&user)
            .execute(&mut conn)?;

        Ok(user)
    }

    fn get_by_id(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        users::table
            .find(user_id)
            .first::<User>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    UserError::NotFound(format!("User with id {} not found", user_id))
                }
                _ => UserError::DatabaseError(e.to_string()),
            })
    }

    fn get_by_username(&self, name: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        users::table
            .filter(users::username.eq(name))
            .first::<User>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    UserError::NotFound(format!("User '{}' not found", name))
                }
                _ => UserError::DatabaseError(e.to_string()),
            })
    }

    /// Deletes a user; categories, subcategories and expenses cascade via
    /// foreign keys.
    fn delete(&self, user_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        let affected = diesel::delete(users::table.find(user_id)).execute(&mut conn)?;

        if affected == 0 {
            return Err(UserError::NotFound(format!(
                "User with id {} not found",
                user_id
            )));
        }

        Ok(affected)
    }
}
