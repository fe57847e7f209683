//! Users module - owners of transaction histories.

mod users_model;
mod users_service;
mod users_traits;

pub use users_model::{NewUser, User};
pub use users_service::UserService;
pub use users_traits::{UserRepositoryTrait, UserServiceTrait};
