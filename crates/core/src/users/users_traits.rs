use crate::errors::Result;
use crate::users::users_model::{NewUser, User};
use async_trait::async_trait;

/// Trait for user repository operations.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// Fails with `DatabaseError::NotFound` when no such user exists.
    fn get_by_id(&self, user_id: &str) -> Result<User>;
    async fn create(&self, new_user: NewUser) -> Result<User>;
}

/// Trait for user service operations.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    fn get_user(&self, user_id: &str) -> Result<User>;
    async fn create_user(&self, new_user: NewUser) -> Result<User>;
}
