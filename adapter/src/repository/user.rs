use crate::database::{model::user::UserRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::UserId,
    user::{
        event::{CreateUser, UpdateUserPassword, UpdateUserProfile},
        User,
    },
};
use kernel::repository::user::UserRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
                SELECT user_id, name, email, role
                FROM users
                WHERE user_id = $1
            "#,
        )
        .bind(current_user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(User::try_from).transpose()
    }

    async fn create(&self, event: CreateUser) -> AppResult<User> {
        let user_id = UserId::new();
        let hashed_password = hash_password(&event.password)?;

        sqlx::query(
            r#"
                INSERT INTO users (user_id, name, email, password_hash, role)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user_id)
        .bind(&event.name)
        .bind(&event.email)
        .bind(&hashed_password)
        .bind(event.role.as_ref())
        .execute(self.db.inner_ref())
        .await
        .map_err(|e| map_email_conflict(e, "User already exists"))?;

        Ok(User {
            user_id,
            name: event.name,
            email: event.email,
            role: event.role,
        })
    }

    async fn update_profile(&self, event: UpdateUserProfile) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE users
                SET name = $2, email = $3
                WHERE user_id = $1
            "#,
        )
        .bind(event.user_id)
        .bind(&event.name)
        .bind(&event.email)
        .execute(self.db.inner_ref())
        .await
        .map_err(|e| map_email_conflict(e, "Email already in use"))?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound("User not found".into()));
        }

        Ok(())
    }

    async fn update_password(&self, event: UpdateUserPassword) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let original_password_hash: String = sqlx::query_scalar(
            r#"
                SELECT password_hash FROM users WHERE user_id = $1
            "#,
        )
        .bind(event.user_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?
        .ok_or_else(|| AppError::EntityNotFound("User not found".into()))?;

        verify_password(&event.current_password, &original_password_hash)?;

        let new_password_hash = hash_password(&event.new_password)?;
        sqlx::query(
            r#"
                UPDATE users SET password_hash = $2 WHERE user_id = $1
            "#,
        )
        .bind(event.user_id)
        .bind(&new_password_hash)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }
}

fn hash_password(password: &str) -> AppResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(AppError::from)
}

pub(crate) fn verify_password(password: &str, hash: &str) -> AppResult<()> {
    let valid = bcrypt::verify(password, hash)?;
    if !valid {
        return Err(AppError::UnauthenticatedError);
    }
    Ok(())
}

fn map_email_conflict(e: sqlx::Error, message: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict(message.into())
        }
        _ => AppError::SpecificOperationError(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::role::Role;
    use std::str::FromStr;

    #[sqlx::test(fixtures("common"))]
    async fn test_find_current_user(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool));

        let admin_id = UserId::from_str("5b4c96ac-316a-4bee-8e69-cac5eb84ff4c")?;
        let user = repo.find_current_user(admin_id).await?.unwrap();
        assert_eq!(user.name, "Admin User");
        assert_eq!(user.email, "admin@hotel.com");
        assert_eq!(user.role, Role::Admin);

        assert!(repo.find_current_user(UserId::new()).await?.is_none());
        Ok(())
    }

    #[sqlx::test(fixtures("common"))]
    async fn test_create_user_and_reject_duplicate_email(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool));

        let user = repo
            .create(CreateUser::new(
                "Carol".into(),
                "carol@test.com".into(),
                "secret1".into(),
                Role::User,
            ))
            .await?;
        assert_eq!(repo.find_current_user(user.user_id).await?, Some(user));

        let res = repo
            .create(CreateUser::new(
                "Another Alice".into(),
                "alice@test.com".into(),
                "secret1".into(),
                Role::User,
            ))
            .await;
        assert!(matches!(res, Err(AppError::Conflict(_))));
        Ok(())
    }

    #[sqlx::test]
    async fn test_update_profile_and_password(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool));

        let user = repo
            .create(CreateUser::new(
                "Dave".into(),
                "dave@test.com".into(),
                "before1".into(),
                Role::User,
            ))
            .await?;

        repo.update_profile(UpdateUserProfile::new(
            user.user_id,
            "David".into(),
            "david@test.com".into(),
        ))
        .await?;
        let updated = repo.find_current_user(user.user_id).await?.unwrap();
        assert_eq!(updated.name, "David");
        assert_eq!(updated.email, "david@test.com");

        let res = repo
            .update_password(UpdateUserPassword::new(
                user.user_id,
                "wrong".into(),
                "after1".into(),
            ))
            .await;
        assert!(matches!(res, Err(AppError::UnauthenticatedError)));

        repo.update_password(UpdateUserPassword::new(
            user.user_id,
            "before1".into(),
            "after1".into(),
        ))
        .await?;
        Ok(())
    }
}
