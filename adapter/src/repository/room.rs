use crate::database::{model::room::RoomRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::RoomId,
    room::{
        event::{CreateRoom, DeleteRoom, UpdateRoom},
        Room,
    },
};
use kernel::repository::room::RoomRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct RoomRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl RoomRepository for RoomRepositoryImpl {
    async fn create(&self, event: CreateRoom) -> AppResult<RoomId> {
        let taken: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM rooms WHERE room_number = $1)")
                .bind(&event.room_number)
                .fetch_one(self.db.inner_ref())
                .await
                .map_err(AppError::SpecificOperationError)?;
        if taken {
            return Err(duplicate_room_number());
        }

        let room_id = RoomId::new();
        // 事前チェックをすり抜けた同時登録は一意制約違反として同じエラーにする
        sqlx::query(
            r#"
                INSERT INTO rooms
                (room_id, room_number, room_type, price, description, amenities)
                VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(room_id)
        .bind(&event.room_number)
        .bind(event.room_type.as_ref())
        .bind(event.price)
        .bind(&event.description)
        .bind(&event.amenities)
        .execute(self.db.inner_ref())
        .await
        .map_err(map_write_error)?;

        tracing::info!(%room_id, room_number = %event.room_number, "room registered");
        Ok(room_id)
    }

    async fn find_all(&self) -> AppResult<Vec<Room>> {
        let rows: Vec<RoomRow> = sqlx::query_as(
            r#"
                SELECT
                    room_id,
                    room_number,
                    room_type,
                    price,
                    description,
                    amenities,
                    availability,
                    created_at
                FROM rooms
                ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Room::try_from).collect()
    }

    async fn find_available(&self) -> AppResult<Vec<Room>> {
        let rows: Vec<RoomRow> = sqlx::query_as(
            r#"
                SELECT
                    room_id,
                    room_number,
                    room_type,
                    price,
                    description,
                    amenities,
                    availability,
                    created_at
                FROM rooms
                WHERE availability = TRUE
                ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Room::try_from).collect()
    }

    async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>> {
        let row: Option<RoomRow> = sqlx::query_as(
            r#"
                SELECT
                    room_id,
                    room_number,
                    room_type,
                    price,
                    description,
                    amenities,
                    availability,
                    created_at
                FROM rooms
                WHERE room_id = $1
            "#,
        )
        .bind(room_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Room::try_from).transpose()
    }

    async fn update(&self, event: UpdateRoom) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE rooms
                SET
                    room_number = $2,
                    room_type = $3,
                    price = $4,
                    description = $5,
                    availability = $6,
                    amenities = $7
                WHERE room_id = $1
            "#,
        )
        .bind(event.room_id)
        .bind(&event.room_number)
        .bind(event.room_type.as_ref())
        .bind(event.price)
        .bind(&event.description)
        .bind(event.availability)
        .bind(&event.amenities)
        .execute(self.db.inner_ref())
        .await
        .map_err(map_write_error)?;

        if res.rows_affected() < 1 {
            return Err(room_not_found());
        }

        Ok(())
    }

    async fn delete(&self, event: DeleteRoom) -> AppResult<()> {
        // 参照中の予約があっても削除する。予約側の部屋情報は以後 None になる
        let res = sqlx::query("DELETE FROM rooms WHERE room_id = $1")
            .bind(event.room_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(room_not_found());
        }

        tracing::info!(room_id = %event.room_id, "room deleted");
        Ok(())
    }
}

fn room_not_found() -> AppError {
    AppError::EntityNotFound("Room not found".into())
}

fn duplicate_room_number() -> AppError {
    AppError::Conflict("Room number already exists".into())
}

fn map_write_error(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => duplicate_room_number(),
        _ => AppError::SpecificOperationError(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::room::RoomType;
    use std::str::FromStr;

    const ROOM_101: &str = "c1a5f3b2-8d4e-4c1f-9a6b-1d2e3f4a5b61";
    const ROOM_201: &str = "c1a5f3b2-8d4e-4c1f-9a6b-1d2e3f4a5b62";

    fn suite(room_number: &str) -> CreateRoom {
        CreateRoom::new(
            room_number.into(),
            RoomType::Suite,
            250.0,
            "Luxurious suite with separate living area".into(),
            vec!["WiFi".into(), "Mini Bar".into()],
        )
    }

    #[sqlx::test]
    async fn test_register_room(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = RoomRepositoryImpl::new(ConnectionPool::new(pool));

        let room_id = repo.create(suite("301")).await?;

        let res = repo.find_all().await?;
        assert_eq!(res.len(), 1);

        let res = repo.find_by_id(room_id).await?;
        assert!(res.is_some());

        let Room {
            room_id: id,
            room_number,
            room_type,
            price,
            description,
            amenities,
            availability,
            created_at: _,
        } = res.unwrap();
        assert_eq!(id, room_id);
        assert_eq!(room_number, "301");
        assert_eq!(room_type, RoomType::Suite);
        assert_eq!(price, 250.0);
        assert_eq!(description, "Luxurious suite with separate living area");
        assert_eq!(amenities, vec!["WiFi".to_string(), "Mini Bar".to_string()]);
        assert!(availability);
        Ok(())
    }

    #[sqlx::test(fixtures("common"))]
    async fn test_reject_duplicate_room_number(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = RoomRepositoryImpl::new(ConnectionPool::new(pool));

        let res = repo.create(suite("101")).await;
        assert!(matches!(res, Err(AppError::Conflict(_))));
        assert_eq!(repo.find_all().await?.len(), 3);
        Ok(())
    }

    #[sqlx::test(fixtures("common"))]
    async fn test_list_newest_first_and_available(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = RoomRepositoryImpl::new(ConnectionPool::new(pool));

        let all: Vec<String> = repo
            .find_all()
            .await?
            .into_iter()
            .map(|r| r.room_number)
            .collect();
        assert_eq!(all, vec!["401", "201", "101"]);

        let available: Vec<String> = repo
            .find_available()
            .await?
            .into_iter()
            .map(|r| r.room_number)
            .collect();
        assert_eq!(available, vec!["201", "101"]);
        Ok(())
    }

    #[sqlx::test(fixtures("common"))]
    async fn test_update_replaces_all_fields(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = RoomRepositoryImpl::new(ConnectionPool::new(pool));
        let room_id = RoomId::from_str(ROOM_101)?;

        repo.update(UpdateRoom::new(
            room_id,
            "102".into(),
            RoomType::Double,
            120.0,
            "Renovated double room".into(),
            false,
            vec![],
        ))
        .await?;

        let room = repo.find_by_id(room_id).await?.unwrap();
        assert_eq!(room.room_number, "102");
        assert_eq!(room.room_type, RoomType::Double);
        assert_eq!(room.price, 120.0);
        assert_eq!(room.description, "Renovated double room");
        assert!(!room.availability);
        assert!(room.amenities.is_empty());
        Ok(())
    }

    #[sqlx::test(fixtures("common"))]
    async fn test_update_to_taken_number_conflicts(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = RoomRepositoryImpl::new(ConnectionPool::new(pool));

        let res = repo
            .update(UpdateRoom::new(
                RoomId::from_str(ROOM_201)?,
                "101".into(),
                RoomType::Double,
                150.0,
                "Spacious double room with balcony".into(),
                true,
                vec![],
            ))
            .await;
        assert!(matches!(res, Err(AppError::Conflict(_))));
        Ok(())
    }

    #[sqlx::test(fixtures("common"))]
    async fn test_update_and_delete_missing_room(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = RoomRepositoryImpl::new(ConnectionPool::new(pool));
        let missing = RoomId::new();

        let res = repo
            .update(UpdateRoom::new(
                missing,
                "999".into(),
                RoomType::Single,
                80.0,
                "Nowhere".into(),
                true,
                vec![],
            ))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));

        let res = repo.delete(DeleteRoom::new(missing)).await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
        Ok(())
    }

    #[sqlx::test(fixtures("common"))]
    async fn test_delete_room(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = RoomRepositoryImpl::new(ConnectionPool::new(pool));
        let room_id = RoomId::from_str(ROOM_201)?;

        repo.delete(DeleteRoom::new(room_id)).await?;

        assert!(repo.find_by_id(room_id).await?.is_none());
        assert_eq!(repo.find_all().await?.len(), 2);
        Ok(())
    }
}
