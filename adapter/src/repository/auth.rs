use super::user::verify_password;
use crate::{
    database::{
        model::{
            auth::{from, AuthorizationKey},
            user::UserCredentialRow,
        },
        ConnectionPool,
    },
    redis::RedisClient,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    auth::{event::CreateToken, AccessToken},
    id::UserId,
};
use kernel::repository::auth::AuthRepository;
use shared::error::{AppError, AppResult};
use std::sync::Arc;

#[derive(new)]
pub struct AuthRepositoryImpl {
    db: ConnectionPool,
    kv: Arc<RedisClient>,
    ttl: u64,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn fetch_user_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<UserId>> {
        let key: AuthorizationKey = access_token.into();
        self.kv
            .get(&key)
            .await
            .map(|x| x.map(|value| value.into_inner()))
    }

    async fn verify_user(&self, email: &str, password: &str) -> AppResult<UserId> {
        let user_item: UserCredentialRow = sqlx::query_as(
            r#"
                SELECT user_id, password_hash FROM users
                WHERE email = $1;
            "#,
        )
        .bind(email)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .ok_or(AppError::UnauthenticatedError)?;

        verify_password(password, &user_item.password_hash)?;

        Ok(user_item.user_id)
    }

    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken> {
        let (key, value) = from(event);
        self.kv.set_ex(&key, &value, self.ttl).await?;
        Ok(key.into())
    }

    async fn delete_token(&self, access_token: AccessToken) -> AppResult<()> {
        let key: AuthorizationKey = access_token.into();
        self.kv.delete(&key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::user::UserRepositoryImpl;
    use kernel::model::{role::Role, user::event::CreateUser};
    use kernel::repository::user::UserRepository;
    use shared::config::RedisConfig;

    fn repo(pool: sqlx::PgPool) -> AuthRepositoryImpl {
        // verify_user は Redis に接続しない
        let kv = RedisClient::new(&RedisConfig {
            host: "localhost".into(),
            port: 6379,
        })
        .unwrap();
        AuthRepositoryImpl::new(ConnectionPool::new(pool), Arc::new(kv), 60)
    }

    #[sqlx::test]
    async fn test_verify_user(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let users = UserRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let user = users
            .create(CreateUser::new(
                "Test User".into(),
                "user@test.com".into(),
                "user123".into(),
                Role::User,
            ))
            .await?;

        let auth = repo(pool);
        assert_eq!(auth.verify_user("user@test.com", "user123").await?, user.user_id);
        assert!(matches!(
            auth.verify_user("user@test.com", "wrong").await,
            Err(AppError::UnauthenticatedError)
        ));
        assert!(matches!(
            auth.verify_user("nobody@test.com", "user123").await,
            Err(AppError::UnauthenticatedError)
        ));
        Ok(())
    }
}
