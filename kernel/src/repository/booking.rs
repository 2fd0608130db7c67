use crate::model::{
    booking::{
        event::{CancelBooking, CreateBooking, UpdateBookingStatus},
        Booking,
    },
    id::{BookingId, UserId},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Reserves the room and records a confirmed booking in one step.
    /// Fails without writing anything when the room is missing or already unavailable.
    async fn create(&self, event: CreateBooking) -> AppResult<BookingId>;
    /// Owner or admin cancellation. Releases the room.
    async fn cancel(&self, event: CancelBooking) -> AppResult<()>;
    /// Admin status override. Releases the room for cancelled/completed.
    async fn update_status(&self, event: UpdateBookingStatus) -> AppResult<()>;
    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>>;
    async fn find_all(&self) -> AppResult<Vec<Booking>>;
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Booking>>;
}
