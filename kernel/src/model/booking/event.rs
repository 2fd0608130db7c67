use crate::model::{
    auth::Identity,
    booking::BookingStatus,
    id::{BookingId, RoomId, UserId},
};
use chrono::NaiveDate;
use derive_new::new;

#[derive(new)]
pub struct CreateBooking {
    pub room_id: RoomId,
    pub booked_by: UserId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_price: f64,
}

#[derive(new)]
pub struct CancelBooking {
    pub booking_id: BookingId,
    pub requested_by: Identity,
}

#[derive(new)]
pub struct UpdateBookingStatus {
    pub booking_id: BookingId,
    pub status: BookingStatus,
    pub requested_by: Identity,
}
