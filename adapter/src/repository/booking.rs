use crate::database::{
    model::booking::{BookingRow, BookingStateRow},
    ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    booking::{
        event::{CancelBooking, CreateBooking, UpdateBookingStatus},
        status::{authorize_cancellation, AvailabilityEffect, StatusTransition},
        Booking, BookingStatus,
    },
    id::{BookingId, RoomId, UserId},
};
use kernel::repository::booking::BookingRepository;
use shared::error::{AppError, AppResult};

const SELECT_BOOKINGS: &str = r#"
    SELECT
        b.booking_id,
        b.user_id,
        b.room_id,
        b.check_in,
        b.check_out,
        b.total_price,
        b.status,
        b.created_at,
        r.room_number,
        r.room_type,
        r.price AS room_price,
        r.description AS room_description,
        u.name AS user_name,
        u.email AS user_email
    FROM bookings AS b
    LEFT JOIN rooms AS r ON b.room_id = r.room_id
    INNER JOIN users AS u ON b.user_id = u.user_id
"#;

#[derive(new)]
pub struct BookingRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BookingRepository for BookingRepositoryImpl {
    async fn create(&self, event: CreateBooking) -> AppResult<BookingId> {
        let mut tx = self.db.begin().await?;

        // 予約可能な部屋に限り availability を false にする。
        // 対象行はロックされるため、同じ部屋への同時予約は後続側の更新件数が 0 になる
        {
            let reserved = sqlx::query(
                r#"
                    UPDATE rooms
                    SET availability = FALSE
                    WHERE room_id = $1 AND availability = TRUE
                "#,
            )
            .bind(event.room_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if reserved.rows_affected() < 1 {
                let exists: bool =
                    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM rooms WHERE room_id = $1)")
                        .bind(event.room_id)
                        .fetch_one(&mut *tx)
                        .await
                        .map_err(AppError::SpecificOperationError)?;

                return Err(if exists {
                    tracing::warn!(room_id = %event.room_id, "room is already reserved");
                    AppError::Conflict("Room is not available".into())
                } else {
                    AppError::EntityNotFound("Room not found".into())
                });
            }
        }

        let booking_id = BookingId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO bookings
                (booking_id, user_id, room_id, check_in, check_out, total_price, status)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(booking_id)
        .bind(event.booked_by)
        .bind(event.room_id)
        .bind(event.check_in)
        .bind(event.check_out)
        .bind(event.total_price)
        .bind(BookingStatus::Confirmed.as_ref())
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No booking record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        tracing::info!(%booking_id, room_id = %event.room_id, "booking confirmed");
        Ok(booking_id)
    }

    async fn cancel(&self, event: CancelBooking) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let state = lock_booking(&mut tx, event.booking_id).await?;
        let transition =
            authorize_cancellation(state.user_id, state.status()?, &event.requested_by)?;
        apply_transition(&mut tx, event.booking_id, state.room_id, transition).await?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        tracing::info!(booking_id = %event.booking_id, "booking cancelled");
        Ok(())
    }

    async fn update_status(&self, event: UpdateBookingStatus) -> AppResult<()> {
        if !event.requested_by.is_admin() {
            return Err(AppError::ForbiddenOperation);
        }

        let mut tx = self.db.begin().await?;

        let state = lock_booking(&mut tx, event.booking_id).await?;
        let transition = state.status()?.admin_transition(event.status);
        apply_transition(&mut tx, event.booking_id, state.room_id, transition).await?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        tracing::info!(
            booking_id = %event.booking_id,
            from = transition.from.as_ref(),
            to = transition.to.as_ref(),
            "booking status updated"
        );
        Ok(())
    }

    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>> {
        let sql = format!("{SELECT_BOOKINGS} WHERE b.booking_id = $1");
        let row: Option<BookingRow> = sqlx::query_as(&sql)
            .bind(booking_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        row.map(Booking::try_from).transpose()
    }

    async fn find_all(&self) -> AppResult<Vec<Booking>> {
        let sql = format!("{SELECT_BOOKINGS} ORDER BY b.created_at DESC");
        let rows: Vec<BookingRow> = sqlx::query_as(&sql)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Booking>> {
        let sql = format!("{SELECT_BOOKINGS} WHERE b.user_id = $1 ORDER BY b.created_at DESC");
        let rows: Vec<BookingRow> = sqlx::query_as(&sql)
            .bind(user_id)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Booking::try_from).collect()
    }
}

// 状態遷移が終わるまで予約行をロックしておく
async fn lock_booking(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    booking_id: BookingId,
) -> AppResult<BookingStateRow> {
    sqlx::query_as(
        r#"
            SELECT user_id, room_id, status
            FROM bookings
            WHERE booking_id = $1
            FOR UPDATE
        "#,
    )
    .bind(booking_id)
    .fetch_optional(&mut **tx)
    .await
    .map_err(AppError::SpecificOperationError)?
    .ok_or_else(|| AppError::EntityNotFound("Booking not found".into()))
}

async fn apply_transition(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    booking_id: BookingId,
    room_id: RoomId,
    transition: StatusTransition,
) -> AppResult<()> {
    let res = sqlx::query("UPDATE bookings SET status = $2 WHERE booking_id = $1")
        .bind(booking_id)
        .bind(transition.to.as_ref())
        .execute(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

    if res.rows_affected() < 1 {
        return Err(AppError::NoRowsAffectedError(
            "No booking record has been updated".into(),
        ));
    }

    if transition.availability == AvailabilityEffect::Release {
        release_room(tx, room_id).await?;
    }

    Ok(())
}

// 部屋を押さえている予約が他に残っていなければ予約可能に戻す。
// 部屋が削除済みなら更新対象がないだけなので件数は見ない
async fn release_room(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    room_id: RoomId,
) -> AppResult<()> {
    // 先に部屋行をロックし、同時に進む予約作成のコミットを待ってから
    // 次の文で最新の予約状況を確認する
    sqlx::query("SELECT 1 FROM rooms WHERE room_id = $1 FOR UPDATE")
        .bind(room_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

    let holding: Vec<String> = BookingStatus::room_holding()
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect();
    let res = sqlx::query(
        r#"
            UPDATE rooms
            SET availability = TRUE
            WHERE room_id = $1
            AND NOT EXISTS (
                SELECT 1 FROM bookings
                WHERE room_id = $1 AND status = ANY($2)
            )
        "#,
    )
    .bind(room_id)
    .bind(&holding)
    .execute(&mut **tx)
    .await
    .map_err(AppError::SpecificOperationError)?;

    if res.rows_affected() < 1 {
        tracing::debug!(%room_id, "room kept unavailable or already removed");
    }

    Ok(())
}
