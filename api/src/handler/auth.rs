use crate::{
    extractor::AuthorizedUser,
    model::{
        auth::{AccessTokenResponse, LoginRequest},
        user::{
            ChangePasswordRequest, ChangePasswordRequestWithUserId, SignupRequest,
            UpdateProfileRequest, UpdateProfileRequestWithUserId, UserMessageResponse,
            UserResponse,
        },
        MessageResponse,
    },
};
use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use garde::Validate;
use kernel::model::{auth::event::CreateToken, id::UserId, user::User};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn signup(
    State(registry): State<AppRegistry>,
    WithRejection(Json(req), _): WithRejection<Json<SignupRequest>, AppError>,
) -> AppResult<(StatusCode, Json<AccessTokenResponse>)> {
    req.validate(&())?;

    let user = registry.user_repository().create(req.into()).await?;
    let access_token = registry
        .auth_repository()
        .create_token(CreateToken::new(user.user_id))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AccessTokenResponse {
            access_token: access_token.0,
            user: user.into(),
        }),
    ))
}

pub async fn login(
    State(registry): State<AppRegistry>,
    WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, AppError>,
) -> AppResult<Json<AccessTokenResponse>> {
    let user_id = registry
        .auth_repository()
        .verify_user(&req.email, &req.password)
        .await?;
    let access_token = registry
        .auth_repository()
        .create_token(CreateToken::new(user_id))
        .await?;
    let user = find_user(&registry, user_id).await?;

    Ok(Json(AccessTokenResponse {
        access_token: access_token.0,
        user: user.into(),
    }))
}

pub async fn logout(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .auth_repository()
        .delete_token(user.access_token)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_current_user(user: AuthorizedUser) -> Json<UserResponse> {
    Json(UserResponse::from(user.user))
}

pub async fn update_profile(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    WithRejection(Json(req), _): WithRejection<Json<UpdateProfileRequest>, AppError>,
) -> AppResult<Json<UserMessageResponse>> {
    req.validate(&())?;

    registry
        .user_repository()
        .update_profile(UpdateProfileRequestWithUserId::new(user.id(), req).into())
        .await?;
    let updated = find_user(&registry, user.id()).await?;

    Ok(Json(UserMessageResponse::new(
        "Profile updated successfully",
        updated,
    )))
}

pub async fn change_password(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    WithRejection(Json(req), _): WithRejection<Json<ChangePasswordRequest>, AppError>,
) -> AppResult<Json<MessageResponse>> {
    req.validate(&())?;

    registry
        .user_repository()
        .update_password(ChangePasswordRequestWithUserId::new(user.id(), req).into())
        .await?;

    Ok(Json(MessageResponse::new("Password changed successfully")))
}

async fn find_user(registry: &AppRegistry, user_id: UserId) -> AppResult<User> {
    registry
        .user_repository()
        .find_current_user(user_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("User not found".into()))
}
