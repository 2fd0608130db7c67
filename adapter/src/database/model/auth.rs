use crate::redis::model::{RedisKey, RedisValue};
use kernel::model::{
    auth::{event::CreateToken, AccessToken},
    id::UserId,
};
use shared::error::AppError;
use std::str::FromStr;

pub struct AuthorizationKey(String);
pub struct AuthorizedUserId(UserId);

pub fn from(event: CreateToken) -> (AuthorizationKey, AuthorizedUserId) {
    (
        AuthorizationKey(event.access_token),
        AuthorizedUserId(event.user_id),
    )
}

impl From<AuthorizationKey> for AccessToken {
    fn from(key: AuthorizationKey) -> Self {
        Self(key.0)
    }
}

impl From<AccessToken> for AuthorizationKey {
    fn from(token: AccessToken) -> Self {
        Self(token.0)
    }
}

impl From<&AccessToken> for AuthorizationKey {
    fn from(token: &AccessToken) -> Self {
        Self(token.0.to_string())
    }
}

impl RedisKey for AuthorizationKey {
    type Value = AuthorizedUserId;

    fn inner(&self) -> String {
        self.0.clone()
    }
}

impl RedisValue for AuthorizedUserId {
    fn inner(&self) -> String {
        self.0.to_string()
    }
}

impl TryFrom<String> for AuthorizedUserId {
    type Error = AppError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Ok(Self(UserId::from_str(&s)?))
    }
}

impl AuthorizedUserId {
    pub fn into_inner(self) -> UserId {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_maps_key_to_user_id() {
        let user_id = UserId::new();
        let event = CreateToken::new(user_id);
        let token = event.access_token.clone();

        let (key, value) = from(event);
        assert_eq!(key.inner(), token);
        assert_eq!(value.inner(), user_id.to_string());

        let restored = AuthorizedUserId::try_from(value.inner()).unwrap();
        assert_eq!(restored.into_inner(), user_id);
    }

    #[test]
    fn reject_corrupted_value() {
        assert!(AuthorizedUserId::try_from("not-a-uuid".to_string()).is_err());
    }
}
