//! User account routes
//!
//! Authentication, registration, CRUD, and password change. These paths are
//! on the public allow-list, so mutating handlers take [`OptionalAuthUser`]
//! to stamp the acting principal when a valid token is present.

use crate::auth::OptionalAuthUser;
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use user_management_shared::models::User;
use user_management_shared::types::{
    AuthenticateRequest, AuthenticationResponse, ChangePasswordRequest, MessageResponse,
    RegisterUserRequest, UpdateUserRequest,
};

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/authenticate", post(authenticate))
        .route("/users", post(register).get(list_users))
        .route(
            "/users/:id",
            get(get_user)
                .put(update_user)
                .patch(change_password)
                .delete(delete_user),
        )
}

/// POST /authenticate - verify credentials and issue a token
async fn authenticate(
    State(state): State<AppState>,
    Json(req): Json<AuthenticateRequest>,
) -> ApiResult<Json<AuthenticationResponse>> {
    let response =
        UserService::authenticate(&state.db, state.jwt(), &req.login_id, &req.password).await?;
    Ok(Json(response))
}

/// POST /users - register a new user
///
/// 400 when the payload violates policy, 409 on a duplicate login id.
async fn register(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Json(req): Json<RegisterUserRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = UserService::register(
        &state.db,
        &req.login_id,
        &req.password,
        req.email.as_deref(),
        auth.principal(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users/{id}
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<User>> {
    let user = UserService::get_user(&state.db, id).await?;
    Ok(Json(user))
}

/// GET /users
async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = UserService::list_users(&state.db).await?;
    Ok(Json(users))
}

/// PUT /users/{id} - update login id and email, never the password
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    auth: OptionalAuthUser,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<User>> {
    let user = UserService::update_user(
        &state.db,
        id,
        &req.login_id,
        req.email.as_deref(),
        auth.principal(),
    )
    .await?;
    Ok(Json(user))
}

/// PATCH /users/{id} - change password after verifying the old one
async fn change_password(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    auth: OptionalAuthUser,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    UserService::change_password(
        &state.db,
        id,
        &req.old_password,
        &req.new_password,
        auth.principal(),
    )
    .await?;
    Ok(Json(MessageResponse {
        message: "Password changed successfully".to_string(),
    }))
}

/// DELETE /users/{id} - 204 on success, 404 when the id is absent
/// (including a repeated delete of the same id)
async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    UserService::delete_user(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
