use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::user_dto::{CreateUserPayload, LoginPayload, LoginResponse, UserResponse},
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Authenticated", body = Json<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let (user, token) = state
        .user_service
        .authenticate(&payload.email, &payload.password)
        .await?;
    Ok(Json(LoginResponse {
        token,
        user: UserResponse::from(user),
    }))
}

/// Provisions a user; the temporary password travels only inside the
/// notification payload for the email relay.
#[utoipa::path(
    post,
    path = "/api/admin/users",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "User created", body = Json<UserResponse>),
        (status = 409, description = "Email already in use")
    )
)]
#[axum::debug_handler]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let (user, temp_password) = state.user_service.create(payload).await?;

    let notification = serde_json::json!({
        "user_id": user.id,
        "email": user.email,
        "name": user.name,
        "temp_password": temp_password,
    });
    if let Err(err) = state
        .notification_service
        .enqueue("user_created", &notification)
        .await
    {
        tracing::warn!(error = ?err, "failed to enqueue user_created notification");
    }

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

#[utoipa::path(
    get,
    path = "/api/admin/users",
    responses((status = 200, description = "List of HR users"))
)]
#[axum::debug_handler]
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let users = state.user_service.list().await?;
    let items: Vec<UserResponse> = users.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/api/admin/users/{id}/reset-password",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Password reset", body = Json<UserResponse>),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn reset_password(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let (user, temp_password) = state.user_service.reset_password(id).await?;

    let notification = serde_json::json!({
        "user_id": user.id,
        "email": user.email,
        "temp_password": temp_password,
    });
    if let Err(err) = state
        .notification_service
        .enqueue("password_reset", &notification)
        .await
    {
        tracing::warn!(error = ?err, "failed to enqueue password_reset notification");
    }

    Ok(Json(UserResponse::from(user)))
}

#[utoipa::path(
    post,
    path = "/api/admin/users/{id}/deactivate",
    params(("id" = Uuid, Path, description = "User ID")),
    responses((status = 200, description = "User deactivated", body = Json<UserResponse>))
)]
#[axum::debug_handler]
pub async fn deactivate_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.deactivate(id).await?;
    Ok(Json(UserResponse::from(user)))
}
