use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::UserId,
    role::Role,
    user::{
        event::{CreateUser, UpdateUserPassword, UpdateUserProfile},
        User,
    },
};
use serde::{Deserialize, Serialize};
use strum::VariantNames;

#[derive(Debug, Serialize, Deserialize, VariantNames, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RoleName {
    Admin,
    User,
}

impl From<Role> for RoleName {
    fn from(value: Role) -> Self {
        match value {
            Role::Admin => Self::Admin,
            Role::User => Self::User,
        }
    }
}

impl From<RoleName> for Role {
    fn from(value: RoleName) -> Self {
        match value {
            RoleName::Admin => Self::Admin,
            RoleName::User => Self::User,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: RoleName,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        let User {
            user_id,
            name,
            email,
            role,
        } = value;
        Self {
            id: user_id,
            name,
            email,
            role: RoleName::from(role),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserMessageResponse {
    pub message: String,
    pub user: UserResponse,
}

impl UserMessageResponse {
    pub fn new(message: &str, user: User) -> Self {
        Self {
            message: message.into(),
            user: user.into(),
        }
    }
}

// 新規登録は常に一般ユーザーとして作る
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[garde(length(min = 1))]
    name: String,
    #[garde(email)]
    email: String,
    #[garde(length(min = 6))]
    password: String,
}

impl From<SignupRequest> for CreateUser {
    fn from(value: SignupRequest) -> Self {
        let SignupRequest {
            name,
            email,
            password,
        } = value;
        Self {
            name,
            email,
            password,
            role: Role::User,
        }
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[garde(length(min = 1))]
    name: String,
    #[garde(email)]
    email: String,
}

#[derive(new)]
pub struct UpdateProfileRequestWithUserId(UserId, UpdateProfileRequest);

impl From<UpdateProfileRequestWithUserId> for UpdateUserProfile {
    fn from(value: UpdateProfileRequestWithUserId) -> Self {
        let UpdateProfileRequestWithUserId(user_id, UpdateProfileRequest { name, email }) = value;
        Self {
            user_id,
            name,
            email,
        }
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[garde(length(min = 1))]
    current_password: String,
    #[garde(length(min = 6))]
    new_password: String,
}

#[derive(new)]
pub struct ChangePasswordRequestWithUserId(UserId, ChangePasswordRequest);

impl From<ChangePasswordRequestWithUserId> for UpdateUserPassword {
    fn from(value: ChangePasswordRequestWithUserId) -> Self {
        let ChangePasswordRequestWithUserId(
            user_id,
            ChangePasswordRequest {
                current_password,
                new_password,
            },
        ) = value;
        Self {
            user_id,
            current_password,
            new_password,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn signup_creates_regular_user() {
        let req: SignupRequest = serde_json::from_value(json!({
            "name": "Test User",
            "email": "user@test.com",
            "password": "user123"
        }))
        .unwrap();
        assert!(req.validate(&()).is_ok());
        assert_eq!(CreateUser::from(req).role, Role::User);
    }

    #[test]
    fn signup_rejects_short_password_and_bad_email() {
        let req: SignupRequest = serde_json::from_value(json!({
            "name": "Test User",
            "email": "not-an-email",
            "password": "12345"
        }))
        .unwrap();
        let report = req.validate(&()).unwrap_err().to_string();
        assert!(report.contains("email"));
        assert!(report.contains("password"));
    }

    #[test]
    fn new_password_needs_six_characters() {
        let req: ChangePasswordRequest = serde_json::from_value(json!({
            "currentPassword": "user123",
            "newPassword": "short"
        }))
        .unwrap();
        assert!(req.validate(&()).is_err());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_value(RoleName::Admin).unwrap(), "admin");
        assert_eq!(RoleName::VARIANTS, &["admin", "user"]);
    }
}
