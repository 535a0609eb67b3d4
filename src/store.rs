use std::convert::Infallible;
use std::future::Future;
use std::sync::OnceLock;
use std::time::Duration;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sqlx::PgPool;
use tokio::time::Instant;

use crate::db;
use crate::error::AppError;
use crate::models::User;
use crate::request::{CreateUserRequest, ListParams, UpdateUserRequest};
use crate::state::SharedState;

/// Request-scoped access to the `users` table.
///
/// Built fresh for every request from the shared pool. The deadline starts
/// with the first store call and covers all later ones, so time spent reading
/// the request body does not count against it. Dropping the request future
/// (client went away) cancels whatever query is in flight.
pub struct UserStore {
    pool: PgPool,
    timeout: Duration,
    deadline: OnceLock<Instant>,
}

impl UserStore {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self {
            pool,
            timeout,
            deadline: OnceLock::new(),
        }
    }

    fn deadline(&self) -> Instant {
        *self.deadline.get_or_init(|| Instant::now() + self.timeout)
    }

    async fn within_deadline<T>(&self, fut: impl Future<Output = T>) -> Result<T, AppError> {
        tokio::time::timeout_at(self.deadline(), fut)
            .await
            .map_err(|_| AppError::DeadlineExceeded)
    }

    pub async fn create(&self, req: &CreateUserRequest) -> Result<User, AppError> {
        self.within_deadline(db::users::create(
            &self.pool,
            &req.first_name,
            &req.last_name,
            &req.email,
            &req.password,
        ))
        .await?
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::DuplicateKey {
                    email: req.email.clone(),
                }
            }
            _ => AppError::from(e),
        })
    }

    /// An empty page is not an error.
    pub async fn list(&self, params: &ListParams) -> Result<Vec<User>, AppError> {
        self.within_deadline(db::users::list(&self.pool, params))
            .await?
            .map_err(|e| {
                tracing::warn!("Failed to list users: {e}");
                AppError::NotFound(e.to_string())
            })
    }

    pub async fn get_by_id(&self, id: &str) -> Result<User, AppError> {
        let Ok(id) = id.parse::<i64>() else {
            return Err(user_not_found());
        };
        self.within_deadline(db::users::find_by_id(&self.pool, id))
            .await??
            .ok_or_else(user_not_found)
    }

    /// Returns the row as it reads after the update.
    pub async fn update(&self, req: &UpdateUserRequest) -> Result<User, AppError> {
        let Ok(id) = req.id.parse::<i64>() else {
            return Err(object_not_found());
        };
        self.within_deadline(db::users::update(
            &self.pool,
            id,
            req.first_name.as_deref(),
            req.last_name.as_deref(),
            req.email.as_deref(),
        ))
        .await?
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::DuplicateKey {
                    email: req.email.clone().unwrap_or_default(),
                }
            }
            _ => AppError::from(e),
        })?
        .ok_or_else(object_not_found)
    }

    /// Non-positive ids are ignored. Deleting a missing row succeeds.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if id <= 0 {
            return Ok(());
        }
        let removed = self
            .within_deadline(db::users::delete(&self.pool, id))
            .await?
            .map_err(|e| {
                tracing::warn!("Failed to delete user {id}: {e}");
                AppError::BadRequest("not found".to_string())
            })?;
        tracing::debug!(user_id = id, removed, "delete executed");
        Ok(())
    }
}

fn user_not_found() -> AppError {
    AppError::NotFound("User not found".to_string())
}

fn object_not_found() -> AppError {
    AppError::NotFound("Object does not exist".to_string())
}

impl FromRequestParts<SharedState> for UserStore {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        Ok(UserStore::new(state.pool.clone(), state.config.query_timeout))
    }
}
