use kernel::model::{
    id::RoomId,
    room::{Room, RoomType},
};
use shared::error::AppError;
use sqlx::types::chrono::{DateTime, Utc};
use std::str::FromStr;

#[derive(sqlx::FromRow)]
pub struct RoomRow {
    pub room_id: RoomId,
    pub room_number: String,
    pub room_type: String,
    pub price: f64,
    pub description: String,
    pub amenities: Vec<String>,
    pub availability: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<RoomRow> for Room {
    type Error = AppError;

    fn try_from(value: RoomRow) -> Result<Self, Self::Error> {
        let RoomRow {
            room_id,
            room_number,
            room_type,
            price,
            description,
            amenities,
            availability,
            created_at,
        } = value;
        Ok(Room {
            room_id,
            room_number,
            room_type: parse_room_type(&room_type)?,
            price,
            description,
            amenities,
            availability,
            created_at,
        })
    }
}

pub(crate) fn parse_room_type(value: &str) -> Result<RoomType, AppError> {
    RoomType::from_str(value)
        .map_err(|_| AppError::ConversionEntityError(format!("unknown room type: {value}")))
}
