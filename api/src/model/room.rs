use super::positive_amount;
use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::RoomId,
    room::{
        event::{CreateRoom, UpdateRoom},
        Room, RoomType,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomTypeName {
    Single,
    Double,
    Suite,
    Deluxe,
}

impl From<RoomType> for RoomTypeName {
    fn from(value: RoomType) -> Self {
        match value {
            RoomType::Single => Self::Single,
            RoomType::Double => Self::Double,
            RoomType::Suite => Self::Suite,
            RoomType::Deluxe => Self::Deluxe,
        }
    }
}

impl From<RoomTypeName> for RoomType {
    fn from(value: RoomTypeName) -> Self {
        match value {
            RoomTypeName::Single => Self::Single,
            RoomTypeName::Double => Self::Double,
            RoomTypeName::Suite => Self::Suite,
            RoomTypeName::Deluxe => Self::Deluxe,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    #[garde(length(min = 1))]
    pub room_number: String,
    #[serde(rename = "type")]
    #[garde(skip)]
    pub room_type: RoomTypeName,
    #[garde(custom(positive_amount))]
    pub price: f64,
    #[garde(length(min = 1))]
    pub description: String,
    #[serde(default)]
    #[garde(inner(length(min = 1)))]
    pub amenities: Vec<String>,
}

impl From<CreateRoomRequest> for CreateRoom {
    fn from(value: CreateRoomRequest) -> Self {
        let CreateRoomRequest {
            room_number,
            room_type,
            price,
            description,
            amenities,
        } = value;
        CreateRoom {
            room_number,
            room_type: room_type.into(),
            price,
            description,
            amenities,
        }
    }
}

// 部屋情報は全項目を置き換える
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    #[garde(length(min = 1))]
    pub room_number: String,
    #[serde(rename = "type")]
    #[garde(skip)]
    pub room_type: RoomTypeName,
    #[garde(custom(positive_amount))]
    pub price: f64,
    #[garde(length(min = 1))]
    pub description: String,
    #[garde(skip)]
    pub availability: bool,
    #[serde(default)]
    #[garde(inner(length(min = 1)))]
    pub amenities: Vec<String>,
}

#[derive(new)]
pub struct UpdateRoomRequestWithId(RoomId, UpdateRoomRequest);

impl From<UpdateRoomRequestWithId> for UpdateRoom {
    fn from(value: UpdateRoomRequestWithId) -> Self {
        let UpdateRoomRequestWithId(
            room_id,
            UpdateRoomRequest {
                room_number,
                room_type,
                price,
                description,
                availability,
                amenities,
            },
        ) = value;
        UpdateRoom {
            room_id,
            room_number,
            room_type: room_type.into(),
            price,
            description,
            availability,
            amenities,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub id: RoomId,
    pub room_number: String,
    #[serde(rename = "type")]
    pub room_type: RoomTypeName,
    pub price: f64,
    pub description: String,
    pub amenities: Vec<String>,
    pub availability: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Room> for RoomResponse {
    fn from(value: Room) -> Self {
        let Room {
            room_id,
            room_number,
            room_type,
            price,
            description,
            amenities,
            availability,
            created_at,
        } = value;
        Self {
            id: room_id,
            room_number,
            room_type: room_type.into(),
            price,
            description,
            amenities,
            availability,
            created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RoomsResponse {
    pub rooms: Vec<RoomResponse>,
}

impl From<Vec<Room>> for RoomsResponse {
    fn from(value: Vec<Room>) -> Self {
        Self {
            rooms: value.into_iter().map(RoomResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RoomDetailResponse {
    pub room: RoomResponse,
}

impl From<Room> for RoomDetailResponse {
    fn from(value: Room) -> Self {
        Self { room: value.into() }
    }
}

#[derive(Debug, Serialize)]
pub struct RoomMessageResponse {
    pub message: String,
    pub room: RoomResponse,
}

impl RoomMessageResponse {
    pub fn new(message: &str, room: Room) -> Self {
        Self {
            message: message.into(),
            room: room.into(),
        }
    }
}
