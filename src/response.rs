use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::User;

/// Public view of a [`User`]. The password never leaves the service.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub fn transform_user(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        first_name: user.first_name,
        last_name: user.last_name,
        email: user.email,
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

/// Apply `transform` to each item, keeping input order.
pub fn map_users<T, R>(items: Vec<T>, transform: impl Fn(T) -> R) -> Vec<R> {
    items.into_iter().map(transform).collect()
}
