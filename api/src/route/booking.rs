use axum::{
    routing::{get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::booking::{
    cancel_booking, create_booking, show_all_bookings, show_my_bookings, update_booking_status,
};

pub fn build_booking_routers() -> Router<AppRegistry> {
    let bookings_routers = Router::new()
        .route("/", post(create_booking))
        .route("/my-bookings", get(show_my_bookings))
        .route("/all", get(show_all_bookings))
        .route("/:booking_id/cancel", put(cancel_booking))
        .route("/:booking_id/status", put(update_booking_status));

    Router::new().nest("/bookings", bookings_routers)
}
