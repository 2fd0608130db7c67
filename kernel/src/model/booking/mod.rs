use crate::model::{
    id::{BookingId, RoomId, UserId},
    room::RoomType,
};
use chrono::{DateTime, NaiveDate, Utc};

pub mod event;
pub mod status;

pub use status::BookingStatus;

#[derive(Debug)]
pub struct Booking {
    pub booking_id: BookingId,
    pub booked_by: UserId,
    pub room_id: RoomId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_price: f64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    // 部屋が削除されている場合は None
    pub room: Option<BookingRoom>,
    pub user: BookingUser,
}

// 表示用に予約へ結合する部屋の情報
#[derive(Debug)]
pub struct BookingRoom {
    pub room_id: RoomId,
    pub room_number: String,
    pub room_type: RoomType,
    pub price: f64,
    pub description: String,
}

#[derive(Debug)]
pub struct BookingUser {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
}
