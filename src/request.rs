use std::sync::LazyLock;

use regex::Regex;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::error::AppError;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default, alias = "firstName")]
    pub first_name: String,
    #[serde(default, alias = "lastName")]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut problems = Vec::new();
        require("first_name", &self.first_name, &mut problems);
        require("last_name", &self.last_name, &mut problems);
        if require("email", &self.email, &mut problems) {
            check_email(&self.email, &mut problems);
        }
        require("password", &self.password, &mut problems);
        finish(problems)
    }
}

/// Query-string parameters for `GET /users`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetUsersRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "firstName")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub page: Option<i64>,
    #[serde(default, alias = "pageSize", deserialize_with = "blank_as_none")]
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFilter {
    Email(String),
    FirstNameContains(String),
}

/// Normalized listing: at most one filter plus a bounded window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub filter: Option<UserFilter>,
    pub limit: i64,
    pub offset: i64,
}

impl GetUsersRequest {
    /// 1-based; anything below 1 means the first page.
    pub fn page(&self) -> i64 {
        match self.page {
            Some(page) if page > 0 => page,
            _ => 1,
        }
    }

    pub fn page_size(&self) -> i64 {
        match self.page_size {
            Some(size) if size > MAX_PAGE_SIZE => MAX_PAGE_SIZE,
            Some(size) if size > 0 => size,
            _ => DEFAULT_PAGE_SIZE,
        }
    }

    /// Email wins over first name when both are present.
    pub fn filter(&self) -> Option<UserFilter> {
        let email = self.email.as_deref().filter(|e| !e.is_empty());
        let first_name = self.first_name.as_deref().filter(|n| !n.is_empty());
        match (email, first_name) {
            (Some(email), _) => Some(UserFilter::Email(email.to_string())),
            (None, Some(name)) => Some(UserFilter::FirstNameContains(name.to_string())),
            (None, None) => None,
        }
    }

    pub fn list_params(&self) -> ListParams {
        let limit = self.page_size();
        ListParams {
            filter: self.filter(),
            limit,
            offset: (self.page() - 1).saturating_mul(limit),
        }
    }
}

/// Partial update. The identifier always comes from the request path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(skip_deserializing)]
    pub id: String,
    #[serde(default, alias = "firstName")]
    pub first_name: Option<String>,
    #[serde(default, alias = "lastName")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UpdateUserRequest {
    pub fn with_id(mut self, id: String) -> Self {
        self.id = id;
        self
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let mut problems = Vec::new();
        require("id", &self.id, &mut problems);
        if let Some(first_name) = &self.first_name {
            require("first_name", first_name, &mut problems);
        }
        if let Some(last_name) = &self.last_name {
            require("last_name", last_name, &mut problems);
        }
        if let Some(email) = &self.email {
            if require("email", email, &mut problems) {
                check_email(email, &mut problems);
            }
        }
        finish(problems)
    }
}

fn require(field: &str, value: &str, problems: &mut Vec<String>) -> bool {
    if value.trim().is_empty() {
        problems.push(format!("{field} is required"));
        return false;
    }
    true
}

fn check_email(email: &str, problems: &mut Vec<String>) {
    if !EMAIL_RE.is_match(email) {
        problems.push(format!("email '{email}' is not a valid address"));
    }
}

fn finish(problems: Vec<String>) -> Result<(), AppError> {
    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(problems))
    }
}

/// Form values arrive as strings; an empty one is treated as unset.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(D::Error::custom),
    }
}
