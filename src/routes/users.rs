use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::http::StatusCode;

use crate::error::AppError;
use crate::request::{CreateUserRequest, GetUsersRequest, UpdateUserRequest};
use crate::response::{UserResponse, map_users, transform_user};
use crate::store::UserStore;

pub async fn create(
    store: UserStore,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let Json(req) = body?;
    req.validate()?;

    let user = store.create(&req).await?;
    tracing::info!(user_id = user.id, "User created");

    Ok((StatusCode::CREATED, Json(transform_user(user))))
}

pub async fn list(
    store: UserStore,
    query: Result<Query<GetUsersRequest>, QueryRejection>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let Query(req) = query?;
    let users = store.list(&req.list_params()).await?;
    Ok(Json(map_users(users, transform_user)))
}

pub async fn get(
    store: UserStore,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<UserResponse>, AppError> {
    let Path(user_id) = path?;
    let user = store.get_by_id(&user_id).await?;
    Ok(Json(transform_user(user)))
}

pub async fn update(
    store: UserStore,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, AppError> {
    let Path(user_id) = path?;
    let Json(req) = body?;
    let req = req.with_id(user_id);
    req.validate()?;

    let user = store.update(&req).await?;
    tracing::info!(user_id = user.id, "User updated");

    Ok(Json(transform_user(user)))
}

pub async fn delete(
    store: UserStore,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<&'static str>, AppError> {
    let Path(user_id) = path?;
    let id: i64 = user_id.parse().map_err(AppError::parse_form)?;
    if id <= 0 {
        return Err(AppError::parse_form(format!(
            "user id must be a positive integer, got {id}"
        )));
    }

    store.delete(id).await?;
    tracing::info!(user_id = id, "User deleted");

    Ok(Json("deleted"))
}
