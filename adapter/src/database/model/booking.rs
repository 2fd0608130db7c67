use super::room::parse_room_type;
use kernel::model::{
    booking::{Booking, BookingRoom, BookingStatus, BookingUser},
    id::{BookingId, RoomId, UserId},
};
use shared::error::AppError;
use sqlx::types::chrono::{DateTime, NaiveDate, Utc};
use std::str::FromStr;

// 予約の状態遷移時に行ロックを取って読み出す型
#[derive(sqlx::FromRow)]
pub struct BookingStateRow {
    pub user_id: UserId,
    pub room_id: RoomId,
    pub status: String,
}

impl BookingStateRow {
    pub fn status(&self) -> Result<BookingStatus, AppError> {
        parse_status(&self.status)
    }
}

// 部屋とユーザーを結合した予約一覧の型
// 部屋が削除済みの場合は room_ で始まる列がすべて NULL になる
#[derive(sqlx::FromRow)]
pub struct BookingRow {
    pub booking_id: BookingId,
    pub user_id: UserId,
    pub room_id: RoomId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_price: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub room_number: Option<String>,
    pub room_type: Option<String>,
    pub room_price: Option<f64>,
    pub room_description: Option<String>,
    pub user_name: String,
    pub user_email: String,
}

impl TryFrom<BookingRow> for Booking {
    type Error = AppError;

    fn try_from(value: BookingRow) -> Result<Self, Self::Error> {
        let BookingRow {
            booking_id,
            user_id,
            room_id,
            check_in,
            check_out,
            total_price,
            status,
            created_at,
            room_number,
            room_type,
            room_price,
            room_description,
            user_name,
            user_email,
        } = value;

        let room = match (room_number, room_type, room_price, room_description) {
            (Some(room_number), Some(room_type), Some(price), Some(description)) => {
                Some(BookingRoom {
                    room_id,
                    room_number,
                    room_type: parse_room_type(&room_type)?,
                    price,
                    description,
                })
            }
            _ => None,
        };

        Ok(Booking {
            booking_id,
            booked_by: user_id,
            room_id,
            check_in,
            check_out,
            total_price,
            status: parse_status(&status)?,
            created_at,
            room,
            user: BookingUser {
                user_id,
                name: user_name,
                email: user_email,
            },
        })
    }
}

fn parse_status(value: &str) -> Result<BookingStatus, AppError> {
    BookingStatus::from_str(value)
        .map_err(|_| AppError::ConversionEntityError(format!("unknown booking status: {value}")))
}
