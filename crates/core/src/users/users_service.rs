use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::errors::{Result, ValidationError};
use crate::transactions::DEFAULT_CURRENCY_CODE;
use crate::users::users_model::{NewUser, User};
use crate::users::users_traits::{UserRepositoryTrait, UserServiceTrait};

pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    fn get_user(&self, user_id: &str) -> Result<User> {
        if user_id.trim().is_empty() {
            return Err(ValidationError::MissingField("userId".to_string()).into());
        }
        self.repository.get_by_id(user_id)
    }

    async fn create_user(&self, mut new_user: NewUser) -> Result<User> {
        let currency = new_user
            .currency
            .take()
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY_CODE.to_string());
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidInput(format!(
                "currency must be a three-letter code, got '{}'",
                currency
            ))
            .into());
        }
        new_user.currency = Some(currency);
        debug!("Creating user with currency {:?}", new_user.currency);
        self.repository.create(new_user).await
    }
}
