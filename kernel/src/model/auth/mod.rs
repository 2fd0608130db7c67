use crate::model::{id::UserId, role::Role};

pub mod event;

pub struct AccessToken(pub String);

/// The caller on whose behalf an operation runs, as established by the access guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
}

impl Identity {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    // 本人か管理者であれば操作できる
    pub fn can_manage(&self, owner: UserId) -> bool {
        self.user_id == owner || self.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_and_admin_can_manage() {
        let owner = UserId::new();
        assert!(Identity::new(owner, Role::User).can_manage(owner));
        assert!(Identity::new(UserId::new(), Role::Admin).can_manage(owner));
        assert!(!Identity::new(UserId::new(), Role::User).can_manage(owner));
    }
}
