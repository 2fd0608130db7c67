use super::{positive_amount, room::RoomTypeName};
use chrono::{DateTime, NaiveDate, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    booking::{event::CreateBooking, Booking, BookingRoom, BookingStatus, BookingUser},
    id::{BookingId, RoomId, UserId},
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatusName {
    Confirmed,
    Cancelled,
    Completed,
}

impl From<BookingStatus> for BookingStatusName {
    fn from(value: BookingStatus) -> Self {
        match value {
            BookingStatus::Confirmed => Self::Confirmed,
            BookingStatus::Cancelled => Self::Cancelled,
            BookingStatus::Completed => Self::Completed,
        }
    }
}

impl From<BookingStatusName> for BookingStatus {
    fn from(value: BookingStatusName) -> Self {
        match value {
            BookingStatusName::Confirmed => Self::Confirmed,
            BookingStatusName::Cancelled => Self::Cancelled,
            BookingStatusName::Completed => Self::Completed,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[garde(skip)]
    pub room_id: RoomId,
    #[garde(skip)]
    pub check_in: NaiveDate,
    #[garde(skip)]
    pub check_out: NaiveDate,
    #[garde(custom(positive_amount))]
    pub total_price: f64,
}

impl CreateBookingRequest {
    pub fn ensure_stay_period(&self) -> AppResult<()> {
        if self.check_out <= self.check_in {
            return Err(AppError::InvalidInput(
                "Check-out date must be after check-in date".into(),
            ));
        }
        Ok(())
    }
}

#[derive(new)]
pub struct CreateBookingRequestWithUserId(UserId, CreateBookingRequest);

impl From<CreateBookingRequestWithUserId> for CreateBooking {
    fn from(value: CreateBookingRequestWithUserId) -> Self {
        let CreateBookingRequestWithUserId(
            booked_by,
            CreateBookingRequest {
                room_id,
                check_in,
                check_out,
                total_price,
            },
        ) = value;
        CreateBooking {
            room_id,
            booked_by,
            check_in,
            check_out,
            total_price,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatusName,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: BookingId,
    pub user_id: UserId,
    pub room_id: RoomId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_price: f64,
    pub status: BookingStatusName,
    pub created_at: DateTime<Utc>,
    pub room: Option<BookingRoomResponse>,
    pub user: BookingUserResponse,
}

impl From<Booking> for BookingResponse {
    fn from(value: Booking) -> Self {
        let Booking {
            booking_id,
            booked_by,
            room_id,
            check_in,
            check_out,
            total_price,
            status,
            created_at,
            room,
            user,
        } = value;
        Self {
            id: booking_id,
            user_id: booked_by,
            room_id,
            check_in,
            check_out,
            total_price,
            status: status.into(),
            created_at,
            room: room.map(BookingRoomResponse::from),
            user: user.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRoomResponse {
    pub id: RoomId,
    pub room_number: String,
    #[serde(rename = "type")]
    pub room_type: RoomTypeName,
    pub price: f64,
    pub description: String,
}

impl From<BookingRoom> for BookingRoomResponse {
    fn from(value: BookingRoom) -> Self {
        let BookingRoom {
            room_id,
            room_number,
            room_type,
            price,
            description,
        } = value;
        Self {
            id: room_id,
            room_number,
            room_type: room_type.into(),
            price,
            description,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingUserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl From<BookingUser> for BookingUserResponse {
    fn from(value: BookingUser) -> Self {
        let BookingUser {
            user_id,
            name,
            email,
        } = value;
        Self {
            id: user_id,
            name,
            email,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookingsResponse {
    pub bookings: Vec<BookingResponse>,
}

impl From<Vec<Booking>> for BookingsResponse {
    fn from(value: Vec<Booking>) -> Self {
        Self {
            bookings: value.into_iter().map(BookingResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookingMessageResponse {
    pub message: String,
    pub booking: BookingResponse,
}

impl BookingMessageResponse {
    pub fn new(message: &str, booking: Booking) -> Self {
        Self {
            message: message.into(),
            booking: booking.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::room::RoomType;
    use serde_json::json;

    fn request(check_in: &str, check_out: &str, total_price: f64) -> CreateBookingRequest {
        serde_json::from_value(json!({
            "roomId": RoomId::new(),
            "checkIn": check_in,
            "checkOut": check_out,
            "totalPrice": total_price,
        }))
        .unwrap()
    }

    #[test]
    fn stay_must_end_after_it_starts() {
        assert!(request("2024-01-01", "2024-01-03", 200.0)
            .ensure_stay_period()
            .is_ok());
        assert!(matches!(
            request("2024-01-03", "2024-01-03", 100.0).ensure_stay_period(),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            request("2024-01-05", "2024-01-03", 100.0).ensure_stay_period(),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn total_price_must_be_positive() {
        assert!(request("2024-01-01", "2024-01-03", 200.0).validate(&()).is_ok());
        assert!(request("2024-01-01", "2024-01-03", -1.0).validate(&()).is_err());
    }

    #[test]
    fn request_becomes_event_owned_by_caller() {
        let user_id = UserId::new();
        let req = request("2024-01-01", "2024-01-03", 200.0);
        let room_id = req.room_id;

        let event = CreateBooking::from(CreateBookingRequestWithUserId::new(user_id, req));
        assert_eq!(event.booked_by, user_id);
        assert_eq!(event.room_id, room_id);
        assert_eq!(event.check_in, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn status_request_accepts_only_known_statuses() {
        let req: UpdateBookingStatusRequest =
            serde_json::from_value(json!({ "status": "completed" })).unwrap();
        assert_eq!(BookingStatus::from(req.status), BookingStatus::Completed);

        assert!(
            serde_json::from_value::<UpdateBookingStatusRequest>(json!({ "status": "paid" }))
                .is_err()
        );
    }

    #[test]
    fn booking_response_includes_joined_projections() {
        let room_id = RoomId::new();
        let user_id = UserId::new();
        let booking = Booking {
            booking_id: BookingId::new(),
            booked_by: user_id,
            room_id,
            check_in: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            total_price: 200.0,
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
            room: Some(BookingRoom {
                room_id,
                room_number: "101".into(),
                room_type: RoomType::Single,
                price: 100.0,
                description: "Cozy single room".into(),
            }),
            user: BookingUser {
                user_id,
                name: "Alice".into(),
                email: "alice@test.com".into(),
            },
        };

        let value = serde_json::to_value(BookingResponse::from(booking)).unwrap();
        assert_eq!(value["status"], "confirmed");
        assert_eq!(value["checkIn"], "2024-01-01");
        assert_eq!(value["totalPrice"], 200.0);
        assert_eq!(value["room"]["roomNumber"], "101");
        assert_eq!(value["room"]["type"], "Single");
        assert_eq!(value["user"]["email"], "alice@test.com");
    }
}
