use crate::model::{id::UserId, role::Role};

pub mod event;

#[derive(Debug, PartialEq, Eq)]
pub struct User {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl User {
    pub fn identity(&self) -> crate::model::auth::Identity {
        crate::model::auth::Identity::new(self.user_id, self.role)
    }
}
