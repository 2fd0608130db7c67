use crate::model::{
    id::UserId,
    user::{
        event::{CreateUser, UpdateUserPassword, UpdateUserProfile},
        User,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>>;
    async fn create(&self, event: CreateUser) -> AppResult<User>;
    async fn update_profile(&self, event: UpdateUserProfile) -> AppResult<()>;
    async fn update_password(&self, event: UpdateUserPassword) -> AppResult<()>;
}
