use crate::model::id::RoomId;
use chrono::{DateTime, Utc};
use strum::{AsRefStr, EnumString};

pub mod event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
pub enum RoomType {
    Single,
    Double,
    Suite,
    Deluxe,
}

#[derive(Debug)]
pub struct Room {
    pub room_id: RoomId,
    pub room_number: String,
    pub room_type: RoomType,
    pub price: f64,
    pub description: String,
    pub amenities: Vec<String>,
    // 確定済みの予約がある間は false
    pub availability: bool,
    pub created_at: DateTime<Utc>,
}
