use crate::{
    extractor::AuthorizedUser,
    model::booking::{
        BookingMessageResponse, BookingsResponse, CreateBookingRequest,
        CreateBookingRequestWithUserId, UpdateBookingStatusRequest,
    },
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use garde::Validate;
use kernel::model::{
    booking::{
        event::{CancelBooking, UpdateBookingStatus},
        Booking,
    },
    id::BookingId,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn create_booking(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    WithRejection(Json(req), _): WithRejection<Json<CreateBookingRequest>, AppError>,
) -> AppResult<(StatusCode, Json<BookingMessageResponse>)> {
    req.validate(&())?;
    req.ensure_stay_period()?;

    let create_booking = CreateBookingRequestWithUserId::new(user.id(), req);
    let booking_id = registry
        .booking_repository()
        .create(create_booking.into())
        .await?;
    let booking = find_booking(&registry, booking_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookingMessageResponse::new(
            "Booking created successfully",
            booking,
        )),
    ))
}

pub async fn show_my_bookings(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingsResponse>> {
    registry
        .booking_repository()
        .find_by_user_id(user.id())
        .await
        .map(BookingsResponse::from)
        .map(Json)
}

pub async fn show_all_bookings(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingsResponse>> {
    user.require_admin()?;

    registry
        .booking_repository()
        .find_all()
        .await
        .map(BookingsResponse::from)
        .map(Json)
}

pub async fn cancel_booking(
    user: AuthorizedUser,
    WithRejection(Path(booking_id), _): WithRejection<Path<BookingId>, AppError>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingMessageResponse>> {
    registry
        .booking_repository()
        .cancel(CancelBooking::new(booking_id, user.identity()))
        .await?;
    let booking = find_booking(&registry, booking_id).await?;

    Ok(Json(BookingMessageResponse::new(
        "Booking cancelled successfully",
        booking,
    )))
}

pub async fn update_booking_status(
    user: AuthorizedUser,
    WithRejection(Path(booking_id), _): WithRejection<Path<BookingId>, AppError>,
    State(registry): State<AppRegistry>,
    WithRejection(Json(req), _): WithRejection<Json<UpdateBookingStatusRequest>, AppError>,
) -> AppResult<Json<BookingMessageResponse>> {
    user.require_admin()?;

    registry
        .booking_repository()
        .update_status(UpdateBookingStatus::new(
            booking_id,
            req.status.into(),
            user.identity(),
        ))
        .await?;
    let booking = find_booking(&registry, booking_id).await?;

    Ok(Json(BookingMessageResponse::new(
        "Booking status updated",
        booking,
    )))
}

async fn find_booking(registry: &AppRegistry, booking_id: BookingId) -> AppResult<Booking> {
    registry
        .booking_repository()
        .find_by_id(booking_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Booking not found".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::Request,
        response::Response,
        routing::put,
        Router,
    };
    use tower::ServiceExt;

    // 状態更新と同じ抽出器の組み合わせを持つルーター
    fn status_router() -> Router {
        Router::new().route(
            "/bookings/:booking_id/status",
            put(
                |WithRejection(Path(booking_id), _): WithRejection<Path<BookingId>, AppError>,
                 WithRejection(Json(req), _): WithRejection<
                    Json<UpdateBookingStatusRequest>,
                    AppError,
                >| async move { format!("{booking_id} {:?}", req.status) },
            ),
        )
    }

    async fn send(uri: &str, body: &str) -> Response {
        let req = Request::builder()
            .method("PUT")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        status_router().oneshot(req).await.unwrap()
    }

    async fn json_body(res: Response) -> serde_json::Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn accepts_well_formed_request() {
        let booking_id = BookingId::new();
        let res = send(
            &format!("/bookings/{booking_id}/status"),
            r#"{"status": "completed"}"#,
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_status_is_reported_as_validation_error() {
        let booking_id = BookingId::new();
        let res = send(
            &format!("/bookings/{booking_id}/status"),
            r#"{"status": "pending"}"#,
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = json_body(res).await;
        assert_eq!(body["kind"], "validation");
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn malformed_body_is_reported_as_validation_error() {
        let booking_id = BookingId::new();
        let res = send(&format!("/bookings/{booking_id}/status"), "{").await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(res).await["kind"], "validation");
    }

    #[tokio::test]
    async fn bad_booking_id_is_reported_as_validation_error() {
        let res = send("/bookings/not-a-uuid/status", r#"{"status": "completed"}"#).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(res).await["kind"], "validation");
    }
}
