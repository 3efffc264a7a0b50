use super::users_model::{NewUser, User};
use super::Result;

/// Trait defining the contract for User repository operations.
pub trait UserRepositoryTrait: Send + Sync {
    fn create(&self, new_user: NewUser) -> Result<User>;
    fn get_by_id(&self, user_id: &str) -> Result<User>;
    fn get_by_username(&self, name: &str) -> Result<User>;
    fn delete(&self, user_id: &str) -> Result<usize>;
}

/// Trait defining the contract for User service operations.
pub trait UserServiceTrait: Send + Sync {
    fn create_user(&self, new_user: NewUser) -> Result<User>;
    fn get_user(&self, user_id: &str) -> Result<User>;
    fn get_user_by_username(&self, name: &str) -> Result<User>;
    fn delete_user(&self, user_id: &str) -> Result<()>;
}
