use crate::model::{id::RoomId, room::RoomType};
use derive_new::new;

#[derive(new)]
pub struct CreateRoom {
    pub room_number: String,
    pub room_type: RoomType,
    pub price: f64,
    pub description: String,
    pub amenities: Vec<String>,
}

// 全項目を置き換える。availability は管理者による上書き
#[derive(Debug, new)]
pub struct UpdateRoom {
    pub room_id: RoomId,
    pub room_number: String,
    pub room_type: RoomType,
    pub price: f64,
    pub description: String,
    pub availability: bool,
    pub amenities: Vec<String>,
}

#[derive(Debug, new)]
pub struct DeleteRoom {
    pub room_id: RoomId,
}
