use crate::model::{id::UserId, role::Role};
use derive_new::new;

#[derive(new)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(new)]
pub struct UpdateUserProfile {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
}

#[derive(new)]
pub struct UpdateUserPassword {
    pub user_id: UserId,
    pub current_password: String,
    pub new_password: String,
}
