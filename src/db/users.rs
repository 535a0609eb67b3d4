use sqlx::PgPool;

use crate::models::User;
use crate::request::{ListParams, UserFilter};

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (first_name, last_name, email, password)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(first_name)
    .bind(last_name)
    .bind(email)
    .bind(password)
    .fetch_one(executor)
    .await
}

pub async fn list(pool: &PgPool, params: &ListParams) -> Result<Vec<User>, sqlx::Error> {
    match &params.filter {
        Some(UserFilter::Email(email)) => {
            sqlx::query_as::<_, User>(
                "SELECT * FROM users WHERE email = $1
                 ORDER BY id LIMIT $2 OFFSET $3",
            )
            .bind(email)
            .bind(params.limit)
            .bind(params.offset)
            .fetch_all(pool)
            .await
        }
        Some(UserFilter::FirstNameContains(fragment)) => {
            sqlx::query_as::<_, User>(
                "SELECT * FROM users WHERE strpos(first_name, $1) > 0
                 ORDER BY id LIMIT $2 OFFSET $3",
            )
            .bind(fragment)
            .bind(params.limit)
            .bind(params.offset)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id LIMIT $1 OFFSET $2")
                .bind(params.limit)
                .bind(params.offset)
                .fetch_all(pool)
                .await
        }
    }
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// `None` fields keep their stored value. Returns `None` when no row matched.
pub async fn update(
    pool: &PgPool,
    id: i64,
    first_name: Option<&str>,
    last_name: Option<&str>,
    email: Option<&str>,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "UPDATE users SET
             first_name = COALESCE($2, first_name),
             last_name = COALESCE($3, last_name),
             email = COALESCE($4, email),
             updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(first_name)
    .bind(last_name)
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
