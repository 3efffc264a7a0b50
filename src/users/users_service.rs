use log::debug;
use std::sync::Arc;

use crate::users::users_model::{NewUser, User};
use crate::users::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::users::Result;

/// Service for managing users
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { repository }
    }
}

impl UserServiceTrait for UserService {
    fn create_user(&self, new_user: NewUser) -> Result<User> {
        debug!("Creating user '{}'", new_user.username);
        self.repository.create(new_user)
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository.get_by_id(user_id)
    }

    fn get_user_by_username(&self, name: &str) -> Result<User> {
        self.repository.get_by_username(name)
    }

    fn delete_user(&self, user_id: &str) -> Result<()> {
        self.repository.delete(user_id)?;
        Ok(())
    }
}
