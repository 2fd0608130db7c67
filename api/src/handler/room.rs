use crate::{
    extractor::AuthorizedUser,
    model::{
        room::{
            CreateRoomRequest, RoomDetailResponse, RoomMessageResponse, RoomsResponse,
            UpdateRoomRequest, UpdateRoomRequestWithId,
        },
        MessageResponse,
    },
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use garde::Validate;
use kernel::model::{id::RoomId, room::event::DeleteRoom, room::Room};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn show_room_list(State(registry): State<AppRegistry>) -> AppResult<Json<RoomsResponse>> {
    registry
        .room_repository()
        .find_all()
        .await
        .map(RoomsResponse::from)
        .map(Json)
}

pub async fn show_available_room_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RoomsResponse>> {
    registry
        .room_repository()
        .find_available()
        .await
        .map(RoomsResponse::from)
        .map(Json)
}

pub async fn show_room(
    WithRejection(Path(room_id), _): WithRejection<Path<RoomId>, AppError>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RoomDetailResponse>> {
    find_room(&registry, room_id)
        .await
        .map(RoomDetailResponse::from)
        .map(Json)
}

pub async fn register_room(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    WithRejection(Json(req), _): WithRejection<Json<CreateRoomRequest>, AppError>,
) -> AppResult<(StatusCode, Json<RoomMessageResponse>)> {
    user.require_admin()?;
    req.validate(&())?;

    let room_id = registry.room_repository().create(req.into()).await?;
    let room = find_room(&registry, room_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(RoomMessageResponse::new("Room added successfully", room)),
    ))
}

pub async fn update_room(
    user: AuthorizedUser,
    WithRejection(Path(room_id), _): WithRejection<Path<RoomId>, AppError>,
    State(registry): State<AppRegistry>,
    WithRejection(Json(req), _): WithRejection<Json<UpdateRoomRequest>, AppError>,
) -> AppResult<Json<RoomMessageResponse>> {
    user.require_admin()?;
    req.validate(&())?;

    let update_room = UpdateRoomRequestWithId::new(room_id, req);
    registry.room_repository().update(update_room.into()).await?;
    let room = find_room(&registry, room_id).await?;

    Ok(Json(RoomMessageResponse::new("Room updated successfully", room)))
}

pub async fn delete_room(
    user: AuthorizedUser,
    WithRejection(Path(room_id), _): WithRejection<Path<RoomId>, AppError>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<MessageResponse>> {
    user.require_admin()?;

    registry
        .room_repository()
        .delete(DeleteRoom::new(room_id))
        .await
        .map(|_| Json(MessageResponse::new("Room deleted successfully")))
}

async fn find_room(registry: &AppRegistry, room_id: RoomId) -> AppResult<Room> {
    registry
        .room_repository()
        .find_by_id(room_id)
        .await
        .and_then(|room| match room {
            Some(room) => Ok(room),
            None => Err(AppError::EntityNotFound("Room not found".into())),
        })
}
